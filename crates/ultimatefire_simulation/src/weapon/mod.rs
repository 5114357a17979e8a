//! Weapons: an item subtype a character can hold, drop and swap

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

#[cfg(test)]
mod weapon_tests;

pub use components::{weapon_bundle, EquippedWeapon, HeldBy, SpawnDefaultWeapon, Weapon, WeaponFallTimer};
pub use events::{ItemStored, WeaponDropped, WeaponEquipped};
pub use systems::{level_to_yaw, sample_throw_yaw, stop_falling, throw_weapon, WeaponHands};

use crate::ShooterSet;

/// Weapon Plugin
///
/// Order (Weapons set):
/// 1. spawn_default_weapons
/// 2. get_pickup_item: finished pickup curves → swap
/// 3. drop_button_pressed
/// 4. tick_falling_weapons: upright + throw timer → Pickup
/// 5. follow_hand_socket
pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Weapon>()
            .register_type::<EquippedWeapon>()
            .register_type::<HeldBy>()
            .register_type::<WeaponFallTimer>();

        app.add_event::<WeaponEquipped>()
            .add_event::<WeaponDropped>()
            .add_event::<ItemStored>();

        app.add_systems(
            FixedUpdate,
            (
                systems::spawn_default_weapons,
                systems::get_pickup_item,
                systems::drop_button_pressed,
                systems::tick_falling_weapons,
                systems::follow_hand_socket,
            )
                .chain()
                .in_set(ShooterSet::Weapons),
        );
    }
}
