//! Item events

use bevy::prelude::*;

/// A character entered an item's area sphere
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAreaEntered {
    pub item: Entity,
    pub character: Entity,
}

/// A character left an item's area sphere (or the sphere was disabled)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAreaExited {
    pub item: Entity,
    pub character: Entity,
}

/// Item started flying toward a character's camera (select button)
///
/// Presentation plays the pickup sound here.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPickupStarted {
    pub item: Entity,
    pub character: Entity,
}

/// Item finished its curve: hand it to the character
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInterpFinished {
    pub item: Entity,
    pub character: Entity,
}
