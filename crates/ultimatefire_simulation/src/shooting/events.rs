//! Shooting events (simulation → presentation)

use bevy::prelude::*;

/// A round left the barrel
///
/// Presentation: fire sound, muzzle flash at `muzzle`, beam from the muzzle
/// to `beam_end`, impact particles at `beam_end`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    /// Who fired
    pub shooter: Entity,

    pub weapon: Entity,

    /// Barrel socket transform at the time of the shot
    pub muzzle: Transform,

    /// None when the crosshair could not be deprojected
    pub beam_end: Option<Vec3>,

    /// What the beam stopped on
    pub hit: Option<Entity>,

    pub ammo_left: u32,
}

/// Trigger pulled on an empty weapon
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponDryFired {
    pub shooter: Entity,
    pub weapon: Entity,
}
