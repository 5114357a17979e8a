//! Weapon lifecycle systems
//!
//! Equipped → (drop) → Falling → (throw timer) → Pickup → (curve) → Equipped

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::Rng;

use super::components::{EquippedWeapon, HeldBy, SpawnDefaultWeapon, Weapon, WeaponFallTimer};
use super::events::{ItemStored, WeaponDropped, WeaponEquipped};
use crate::character::ShooterCharacter;
use crate::components::{PhysicsBody, ShooterInput};
use crate::config::{ShooterConfig, WeaponConfig};
use crate::item::{item_bundle, Item, ItemInterpFinished, ItemRarity, ItemState};
use crate::math::rotate_angle_axis;
use crate::{log, log_error, DeterministicRng};

// ============================================================================
// Throw
// ============================================================================

/// Drops pitch and roll, keeps yaw
pub fn level_to_yaw(rotation: Quat) -> Quat {
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_rotation_y(yaw)
}

/// Random extra yaw of a throw, in [0, max)
pub fn sample_throw_yaw(rng: &mut impl Rng, max_degrees: f32) -> f32 {
    if max_degrees > 0.0 {
        rng.gen_range(0.0..max_degrees)
    } else {
        0.0
    }
}

/// Levels the weapon and launches it sideways
///
/// Direction: weapon right, tilted by `throw_tilt` around weapon forward,
/// then turned by `random_yaw` around up. Returns the launch velocity.
pub fn throw_weapon(
    weapon: &mut Weapon,
    transform: &mut Transform,
    body: &mut PhysicsBody,
    random_yaw: f32,
    config: &WeaponConfig,
) -> Vec3 {
    transform.rotation = level_to_yaw(transform.rotation);
    let forward = transform.rotation * Vec3::NEG_Z;
    let right = transform.rotation * Vec3::X;

    let direction = rotate_angle_axis(right, config.throw_tilt, forward);
    let direction = rotate_angle_axis(direction, random_yaw, Vec3::Y);

    body.velocity = direction * config.throw_speed;
    weapon.falling = true;
    body.velocity
}

/// Throw window is over: the weapon can be picked up again
pub fn stop_falling(weapon: &mut Weapon, item: &mut Item) {
    weapon.falling = false;
    item.set_state(ItemState::Pickup);
}

// ============================================================================
// Equip / drop / swap
// ============================================================================

/// Everything needed to move weapons in and out of a character's hand
#[derive(SystemParam)]
pub struct WeaponHands<'w, 's> {
    commands: Commands<'w, 's>,
    weapons: Query<
        'w,
        's,
        (&'static mut Item, &'static mut Weapon, &'static mut Transform, &'static mut PhysicsBody),
        Without<ShooterCharacter>,
    >,
    rng: ResMut<'w, DeterministicRng>,
    config: Res<'w, ShooterConfig>,
    equipped_events: EventWriter<'w, WeaponEquipped>,
    dropped_events: EventWriter<'w, WeaponDropped>,
}

impl WeaponHands<'_, '_> {
    pub fn is_weapon(&self, entity: Entity) -> bool {
        self.weapons.contains(entity)
    }

    /// Puts `weapon_entity` in the character's hand
    pub fn equip(&mut self, character: Entity, equipped: &mut EquippedWeapon, weapon_entity: Entity) -> bool {
        let Ok((mut item, mut weapon, _, mut body)) = self.weapons.get_mut(weapon_entity) else {
            log_error(&format!("Entity {:?} is not a weapon, cannot equip", weapon_entity));
            return false;
        };

        item.set_state(ItemState::Equipped);
        weapon.falling = false;
        body.velocity = Vec3::ZERO;
        self.commands
            .entity(weapon_entity)
            .insert(HeldBy(character))
            .remove::<WeaponFallTimer>();
        equipped.0 = Some(weapon_entity);

        self.equipped_events.write(WeaponEquipped {
            character,
            weapon: weapon_entity,
        });
        log(&format!("Character {:?} equipped {} ({:?})", character, item.name, weapon_entity));
        true
    }

    /// Detaches and throws the equipped weapon; false with empty hands
    pub fn drop(&mut self, character: Entity, equipped: &mut EquippedWeapon) -> bool {
        let Some(weapon_entity) = equipped.0.take() else {
            return false;
        };
        let Ok((mut item, mut weapon, mut transform, mut body)) = self.weapons.get_mut(weapon_entity) else {
            log_error(&format!(
                "Character {:?}: equipped weapon {:?} no longer exists",
                character, weapon_entity
            ));
            return false;
        };

        item.set_state(ItemState::Falling);
        let random_yaw = sample_throw_yaw(&mut self.rng.rng, self.config.weapon.throw_random_yaw);
        let velocity = throw_weapon(
            &mut weapon,
            &mut transform,
            &mut body,
            random_yaw,
            &self.config.weapon,
        );
        self.commands
            .entity(weapon_entity)
            .remove::<HeldBy>()
            .insert(WeaponFallTimer(Timer::from_seconds(weapon.throw_time, TimerMode::Once)));

        self.dropped_events.write(WeaponDropped {
            character,
            weapon: weapon_entity,
        });
        log(&format!(
            "Character {:?} dropped {} ({:?}), velocity {:?}",
            character, item.name, weapon_entity, velocity
        ));
        true
    }

    /// Drops the current weapon (if any) and equips `new_weapon`
    pub fn swap(&mut self, character: Entity, equipped: &mut EquippedWeapon, new_weapon: Entity) -> bool {
        if equipped.0 == Some(new_weapon) {
            return false;
        }
        self.drop(character, equipped);
        self.equip(character, equipped, new_weapon)
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Spawns + equips the default weapon of freshly spawned characters
pub fn spawn_default_weapons(
    mut commands: Commands,
    mut characters: Query<(Entity, &SpawnDefaultWeapon, &Transform, &mut EquippedWeapon)>,
    config: Res<ShooterConfig>,
    mut equipped_events: EventWriter<WeaponEquipped>,
) {
    for (character, default_weapon, transform, mut equipped) in characters.iter_mut() {
        commands.entity(character).remove::<SpawnDefaultWeapon>();

        if let Some(current) = equipped.0 {
            crate::log_warning(&format!(
                "Character {:?} already holds {:?}, default weapon skipped",
                character, current
            ));
            continue;
        }

        let weapon = Weapon::from_config(&config.weapon);
        let item = Item::new(default_weapon.name.clone(), ItemRarity::Common)
            .with_count(weapon.ammo)
            .with_state(ItemState::Equipped);
        let held = weapon.held_transform(transform);

        let weapon_entity = commands
            .spawn((item_bundle(item, held, &config.items), weapon, HeldBy(character)))
            .id();
        equipped.0 = Some(weapon_entity);

        equipped_events.write(WeaponEquipped {
            character,
            weapon: weapon_entity,
        });
        log(&format!(
            "Character {:?} spawned default weapon {} ({:?})",
            character, default_weapon.name, weapon_entity
        ));
    }
}

/// Pickup curve finished: weapons are swapped in, other items stored
pub fn get_pickup_item(
    mut finished: EventReader<ItemInterpFinished>,
    mut characters: Query<&mut EquippedWeapon, With<ShooterCharacter>>,
    mut hands: WeaponHands,
    mut items: Query<&mut Item, (Without<Weapon>, Without<ShooterCharacter>)>,
    mut stored: EventWriter<ItemStored>,
) {
    for event in finished.read() {
        let Ok(mut equipped) = characters.get_mut(event.character) else {
            log_error(&format!(
                "Item {:?} finished its curve but character {:?} is gone",
                event.item, event.character
            ));
            continue;
        };

        if hands.is_weapon(event.item) {
            hands.swap(event.character, &mut equipped, event.item);
        } else if let Ok(mut item) = items.get_mut(event.item) {
            item.set_state(ItemState::PickedUp);
            stored.write(ItemStored {
                character: event.character,
                item: event.item,
            });
            log(&format!("Character {:?} stored {}", event.character, item.name));
        }
    }
}

/// Drop button: throw the equipped weapon
pub fn drop_button_pressed(
    mut characters: Query<(Entity, &ShooterInput, &mut EquippedWeapon), With<ShooterCharacter>>,
    mut hands: WeaponHands,
) {
    for (character, input, mut equipped) in characters.iter_mut() {
        if input.drop.just_pressed() {
            hands.drop(character, &mut equipped);
        }
    }
}

/// Keeps thrown weapons upright and ends the throw window
pub fn tick_falling_weapons(
    mut commands: Commands,
    mut weapons: Query<(Entity, &mut Item, &mut Weapon, &mut Transform, Option<&mut WeaponFallTimer>)>,
    time: Res<Time>,
) {
    for (entity, mut item, mut weapon, mut transform, timer) in weapons.iter_mut() {
        if item.state() == ItemState::Falling && weapon.falling {
            transform.rotation = level_to_yaw(transform.rotation);
        }

        let Some(mut timer) = timer else {
            continue;
        };
        timer.0.tick(time.delta());
        if timer.0.finished() {
            stop_falling(&mut weapon, &mut item);
            commands.entity(entity).remove::<WeaponFallTimer>();
        }
    }
}

/// Held weapons follow their holder's right-hand socket
pub fn follow_hand_socket(
    mut weapons: Query<(&HeldBy, &Weapon, &mut Transform), Without<ShooterCharacter>>,
    characters: Query<&Transform, With<ShooterCharacter>>,
) {
    for (held_by, weapon, mut transform) in weapons.iter_mut() {
        if let Ok(holder) = characters.get(held_by.0) {
            *transform = weapon.held_transform(holder);
        }
    }
}
