//! Shooting: fire button, automatic fire, beam end
//!
//! No projectiles: a shot is an instant trace. Presentation draws the beam
//! from `WeaponFired`.

use bevy::prelude::*;

pub mod beam;
pub mod events;
pub mod fire_control;
pub mod systems;

pub use beam::{beam_end_location, BeamEnd};
pub use events::{WeaponDryFired, WeaponFired};
pub use fire_control::FireControl;

use crate::ShooterSet;

pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FireControl>();

        app.add_event::<WeaponFired>().add_event::<WeaponDryFired>();

        app.add_systems(FixedUpdate, systems::fire_weapon.in_set(ShooterSet::Combat));
    }
}
