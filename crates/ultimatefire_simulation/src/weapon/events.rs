//! Weapon events (presentation: equip sound, drop sound)

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponEquipped {
    pub character: Entity,
    pub weapon: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponDropped {
    pub character: Entity,
    pub weapon: Entity,
}

/// Non-weapon item stored by a character after its pickup curve
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStored {
    pub character: Entity,
    pub item: Entity,
}
