//! Item components
//!
//! An item is one entity carrying all of its parts:
//! - `Item`: name, count, rarity, state
//! - `ItemMesh`: physics/visibility/collision of the visual mesh
//! - `AreaSphere`: overlap volume that enables item tracing for characters
//! - `TraceShape`: the collision box that crosshair traces hit
//! - `PickupWidget`: HUD widget visibility flag

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::PhysicsBody;
use crate::config::ItemConfig;
use crate::physics::{CollisionSettings, TraceShape};

/// Item rarity (drives the star row on the pickup widget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ItemRarity {
    Damaged,
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl ItemRarity {
    pub fn star_count(self) -> usize {
        match self {
            ItemRarity::Damaged => 1,
            ItemRarity::Common => 2,
            ItemRarity::Uncommon => 3,
            ItemRarity::Rare => 4,
            ItemRarity::Legendary => 5,
        }
    }

    /// Five star flags, lit from the left
    pub fn active_stars(self) -> [bool; 5] {
        let lit = self.star_count();
        std::array::from_fn(|index| index < lit)
    }
}

/// Item lifecycle state
///
/// Pickup → EquipInterping → Equipped → Falling → Pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ItemState {
    /// Lying in the world, can be traced and picked up
    #[default]
    Pickup,
    /// Flying toward the camera after the select button
    EquipInterping,
    /// Stored (not in the world)
    PickedUp,
    /// Held by a character
    Equipped,
    /// Thrown, physics on
    Falling,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(ItemMesh, AreaSphere, PickupWidget, PhysicsBody)]
pub struct Item {
    pub name: String,
    pub count: u32,
    pub rarity: ItemRarity,
    state: ItemState,
}

impl Default for Item {
    fn default() -> Self {
        Self::new("Default", ItemRarity::Common)
    }
}

impl Item {
    pub fn new(name: impl Into<String>, rarity: ItemRarity) -> Self {
        Self {
            name: name.into(),
            count: ItemConfig::default().default_count,
            rarity,
            state: ItemState::Pickup,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    /// Stores the new state. `apply_item_properties` updates the parts
    /// (collision, physics, widget) later in the same tick.
    pub fn set_state(&mut self, state: ItemState) {
        self.state = state;
    }

    pub fn active_stars(&self) -> [bool; 5] {
        self.rarity.active_stars()
    }
}

/// Visual mesh of an item
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ItemMesh {
    pub simulate_physics: bool,
    pub enable_gravity: bool,
    pub visible: bool,
    pub gravity: f32,
    pub collision: CollisionSettings,
}

impl Default for ItemMesh {
    fn default() -> Self {
        Self {
            simulate_physics: false,
            enable_gravity: false,
            visible: true,
            gravity: -9.81,
            collision: CollisionSettings::DISABLED,
        }
    }
}

/// Overlap sphere; characters inside it trace for items
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AreaSphere {
    pub radius: f32,
    pub collision: CollisionSettings,
    /// Characters currently overlapping (sorted by entity)
    pub overlapping: Vec<Entity>,
}

impl Default for AreaSphere {
    fn default() -> Self {
        Self {
            radius: ItemConfig::default().area_radius,
            collision: CollisionSettings::DISABLED,
            overlapping: Vec::new(),
        }
    }
}

/// Pickup HUD widget (hidden until the item is traced)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PickupWidget {
    pub visible: bool,
}

/// Components of a fresh item in `state`
///
/// Properties for `state` are applied on the first tick.
pub fn item_bundle(item: Item, transform: Transform, config: &ItemConfig) -> impl Bundle {
    let half_extents = Vec3::from_array(config.collision_box_half_extents);
    (
        item,
        transform,
        AreaSphere {
            radius: config.area_radius,
            ..default()
        },
        TraceShape::cuboid(half_extents, CollisionSettings::DISABLED),
        // Rapier mirror (see apply_item_properties)
        RigidBody::Fixed,
        Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
        GravityScale(0.0),
        CollisionGroups::default(),
        Velocity::default(),
    )
}
