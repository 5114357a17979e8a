//! Player control marker component

use bevy::prelude::Component;

/// Marker component for the player-controlled character
///
/// Input systems use `With<Player>`; the windowed client writes
/// `ShooterInput` only for this entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
