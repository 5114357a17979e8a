//! Pickup items
//!
//! - Item state machine + per-state part properties
//! - Area sphere overlaps with characters
//! - Pickup curve toward the character camera
//!
//! Presentation reads `PickupWidget`, `ItemMesh::visible` and the events.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod interp;
pub mod overlap;
pub mod properties;

pub use components::{item_bundle, AreaSphere, Item, ItemMesh, ItemRarity, ItemState, PickupWidget};
pub use events::{ItemAreaEntered, ItemAreaExited, ItemInterpFinished, ItemPickupStarted};
pub use interp::{curve_height, start_item_curve, ItemInterp};
pub use overlap::sphere_overlaps_capsule;
pub use properties::ItemProperties;

use crate::ShooterSet;

/// Item Plugin
///
/// Order:
/// 1. detect_area_overlaps (Overlaps): enter/exit events for characters
/// 2. item_interp (ItemMotion): curve + finish event
/// 3. apply_item_properties → sync_item_rapier (Properties): state presets
pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Item>()
            .register_type::<ItemMesh>()
            .register_type::<AreaSphere>()
            .register_type::<PickupWidget>()
            .register_type::<ItemInterp>();

        app.add_event::<ItemAreaEntered>()
            .add_event::<ItemAreaExited>()
            .add_event::<ItemPickupStarted>()
            .add_event::<ItemInterpFinished>();

        app.add_systems(
            FixedUpdate,
            overlap::detect_area_overlaps.in_set(ShooterSet::Overlaps),
        );
        app.add_systems(FixedUpdate, interp::item_interp.in_set(ShooterSet::ItemMotion));
        app.add_systems(
            FixedUpdate,
            (properties::apply_item_properties, properties::sync_item_rapier)
                .chain()
                .in_set(ShooterSet::Properties),
        );
    }
}
