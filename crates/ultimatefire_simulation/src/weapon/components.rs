//! Weapon components

use bevy::prelude::*;

use crate::config::{ShooterConfig, WeaponConfig};
use crate::item::{item_bundle, Item, ItemRarity};

/// Weapon item (lives on the same entity as `Item`)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Item)]
pub struct Weapon {
    pub ammo: u32,
    /// Muzzle socket relative to the weapon origin
    pub barrel_offset: Vec3,
    /// Right-hand socket relative to the holder's origin
    pub hand_offset: Vec3,
    /// Seconds a thrown weapon stays `Falling`
    pub throw_time: f32,
    /// Thrown and not yet settled back into `Pickup`
    pub falling: bool,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::from_config(&WeaponConfig::default())
    }
}

impl Weapon {
    pub fn from_config(config: &WeaponConfig) -> Self {
        Self {
            ammo: config.default_ammo,
            barrel_offset: Vec3::from_array(config.barrel_offset),
            hand_offset: Vec3::from_array(config.hand_offset),
            throw_time: config.throw_time,
            falling: false,
        }
    }

    pub fn with_ammo(mut self, ammo: u32) -> Self {
        self.ammo = ammo;
        self
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    /// Takes one round; false when empty
    pub fn consume_round(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    /// World transform of the barrel socket
    pub fn barrel_transform(&self, weapon_transform: &Transform) -> Transform {
        weapon_transform.mul_transform(Transform::from_translation(self.barrel_offset))
    }

    /// World transform of the weapon held by a character at `holder`
    pub fn held_transform(&self, holder: &Transform) -> Transform {
        holder.mul_transform(Transform::from_translation(self.hand_offset))
    }
}

/// Falling window of a thrown weapon
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WeaponFallTimer(pub Timer);

/// Weapon held by a character (at most one)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct EquippedWeapon(pub Option<Entity>);

/// Character holding this weapon
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct HeldBy(pub Entity);

/// Character spawns and equips this weapon on its first tick
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SpawnDefaultWeapon {
    pub name: String,
}

/// Components of a weapon lying in the world
pub fn weapon_bundle(
    name: impl Into<String>,
    rarity: ItemRarity,
    transform: Transform,
    config: &ShooterConfig,
) -> impl Bundle {
    let weapon = Weapon::from_config(&config.weapon);
    let item = Item::new(name, rarity).with_count(weapon.ammo);
    (item_bundle(item, transform, &config.items), weapon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_consume_round_until_empty() {
        let mut weapon = Weapon::default().with_ammo(2);
        assert!(weapon.consume_round());
        assert!(weapon.consume_round());
        assert!(!weapon.has_ammo());
        assert!(!weapon.consume_round());
        assert_eq!(weapon.ammo, 0);
    }

    #[test]
    fn test_barrel_socket_follows_weapon_rotation() {
        let weapon = Weapon {
            barrel_offset: Vec3::new(0.0, 0.0, -0.6),
            ..default()
        };
        // Turned 90° left: forward (-Z) becomes -X
        let transform = Transform::from_xyz(1.0, 1.0, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let muzzle = weapon.barrel_transform(&transform);
        assert_relative_eq!(muzzle.translation.x, 0.4, epsilon = 1e-5);
        assert_relative_eq!(muzzle.translation.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(muzzle.translation.y, 1.0, epsilon = 1e-5);
    }
}
