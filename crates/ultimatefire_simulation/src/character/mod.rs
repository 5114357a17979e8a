//! Shooter character
//!
//! - input: ShooterInput → aim, look rotation, movement input
//! - camera: follow camera pose, aim zoom, crosshair trace
//! - crosshair: spread multiplier
//! - pickup: overlap count, item tracing, select → pickup curve

use bevy::prelude::*;

pub mod camera;
pub mod components;
pub mod crosshair;
pub mod input;
pub mod pickup;


pub use camera::{trace_under_crosshairs, CrosshairTrace};
pub use components::{Aiming, CharacterCapsule, LookRates, OverlappedItems, ShooterCharacter, TracedItem};
pub use crosshair::{CrosshairFiring, CrosshairSpread, SpreadInputs};

use crate::components::{CameraBoom, CameraZoom, ItemCameraTarget, KinematicController};
use crate::config::ShooterConfig;
use crate::physics::character_rapier_bundle;
use crate::weapon::SpawnDefaultWeapon;
use crate::ShooterSet;

/// Spawns a shooter character standing at `transform`
///
/// Config-driven components replace the required defaults. With
/// `weapon.spawn_default_weapon` the character gets its default weapon on
/// the next tick.
pub fn spawn_shooter_character(commands: &mut Commands, config: &ShooterConfig, transform: Transform) -> Entity {
    let capsule = CharacterCapsule::from_config(&config.movement);

    let mut entity = commands.spawn((
        ShooterCharacter,
        transform,
        KinematicController::from_config(&config.movement),
        capsule,
        CameraBoom::from_config(&config.camera),
        CameraZoom::from_config(&config.camera),
        ItemCameraTarget {
            distance: config.camera.item_interp_distance,
            elevation: config.camera.item_interp_elevation,
        },
        LookRates::from_config(&config.look),
        character_rapier_bundle(capsule.radius, capsule.half_height - capsule.radius),
    ));

    if config.weapon.spawn_default_weapon {
        entity.insert(SpawnDefaultWeapon {
            name: config.weapon.default_weapon_name.clone(),
        });
    }

    let id = entity.id();
    crate::log(&format!("Spawned shooter character {:?} at {:?}", id, transform.translation));
    id
}

/// Character Plugin
///
/// Order inside the shooter schedule:
/// 1. Input: aim → look rates → look → face yaw → move
/// 2. Camera: follow camera pose, FOV
/// 3. Overlaps (after item overlap detection): overlapped count
/// 4. Pickup: trace for items → select
/// 5. Crosshair: spread
/// 6. Cleanup: clear input edges
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CharacterCapsule>()
            .register_type::<Aiming>()
            .register_type::<LookRates>()
            .register_type::<OverlappedItems>()
            .register_type::<TracedItem>()
            .register_type::<CrosshairSpread>();

        app.add_systems(
            FixedUpdate,
            (
                input::apply_aim_input,
                input::set_look_rates,
                input::apply_look_input,
                input::face_control_yaw,
                input::apply_move_input,
            )
                .chain()
                .in_set(ShooterSet::Input),
        );

        app.add_systems(
            FixedUpdate,
            (camera::update_follow_camera, camera::calculate_and_set_fov)
                .chain()
                .in_set(ShooterSet::Camera),
        );

        app.add_systems(
            FixedUpdate,
            pickup::update_overlapped_items
                .in_set(ShooterSet::Overlaps)
                .after(crate::item::overlap::detect_area_overlaps),
        );

        app.add_systems(
            FixedUpdate,
            (pickup::trace_for_items, pickup::select_button_pressed)
                .chain()
                .in_set(ShooterSet::Pickup),
        );

        app.add_systems(
            FixedUpdate,
            crosshair::calculate_crosshair_spread.in_set(ShooterSet::Crosshair),
        );

        app.add_systems(FixedUpdate, input::clear_input_edges.in_set(ShooterSet::Cleanup));
    }
}
