//! Tests for weapon throw, equip/drop/swap and the falling window.

use std::time::Duration;

use approx::assert_relative_eq;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::components::{weapon_bundle, EquippedWeapon, HeldBy, SpawnDefaultWeapon, Weapon, WeaponFallTimer};
use super::events::{ItemStored, WeaponDropped, WeaponEquipped};
use super::systems::*;
use crate::character::ShooterCharacter;
use crate::components::{PhysicsBody, ShooterInput};
use crate::config::{ShooterConfig, WeaponConfig};
use crate::item::{item_bundle, Item, ItemInterpFinished, ItemRarity, ItemState};
use crate::DeterministicRng;

fn weapon_world(delta: f32) -> World {
    let mut world = World::new();
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(delta));
    world.insert_resource(time);
    world.insert_resource(ShooterConfig::default());
    world.insert_resource(DeterministicRng::new(7));
    world.init_resource::<Events<WeaponEquipped>>();
    world.init_resource::<Events<WeaponDropped>>();
    world.init_resource::<Events<ItemStored>>();
    world.init_resource::<Events<ItemInterpFinished>>();
    world
}

fn spawn_weapon(world: &mut World, name: &str, state: ItemState) -> Entity {
    let config = ShooterConfig::default();
    let entity = world
        .spawn(weapon_bundle(name, ItemRarity::Common, Transform::from_xyz(0.0, 1.0, -2.0), &config))
        .id();
    world.get_mut::<Item>(entity).unwrap().set_state(state);
    entity
}

fn no_random_yaw() -> WeaponConfig {
    WeaponConfig {
        throw_random_yaw: 0.0,
        ..default()
    }
}

#[test]
fn test_throw_goes_right_and_up() {
    let mut weapon = Weapon::default();
    let mut body = PhysicsBody::default();
    // Pitched and rolled in hand: the throw levels it first
    let mut transform =
        Transform::from_rotation(Quat::from_euler(EulerRot::YXZ, 0.0, 0.4, -0.3));

    let velocity = throw_weapon(&mut weapon, &mut transform, &mut body, 0.0, &no_random_yaw());

    let tilt = 20.0_f32.to_radians();
    assert_relative_eq!(velocity.x, 4.0 * tilt.cos(), epsilon = 1e-4);
    assert_relative_eq!(velocity.y, 4.0 * tilt.sin(), epsilon = 1e-4);
    assert_relative_eq!(velocity.z, 0.0, epsilon = 1e-4);
    assert_eq!(body.velocity, velocity);
    assert!(weapon.falling);
    assert!(transform.rotation.abs_diff_eq(Quat::IDENTITY, 1e-5));
}

#[test]
fn test_throw_random_yaw_turns_around_up() {
    let mut weapon = Weapon::default();
    let mut body = PhysicsBody::default();
    let mut transform = Transform::default();

    let velocity = throw_weapon(&mut weapon, &mut transform, &mut body, 90.0, &no_random_yaw());

    // Right (+X) turned 90° counter-clockwise seen from above → -Z
    assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(velocity.z, -4.0 * 20.0_f32.to_radians().cos(), epsilon = 1e-4);
    assert_relative_eq!(velocity.length(), 4.0, epsilon = 1e-4);
}

#[test]
fn test_throw_yaw_sample_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..200 {
        let yaw = sample_throw_yaw(&mut rng, 30.0);
        assert!((0.0..30.0).contains(&yaw), "yaw {}", yaw);
    }
    assert_eq!(sample_throw_yaw(&mut rng, 0.0), 0.0);
}

#[test]
fn test_level_to_yaw_keeps_heading() {
    let rotation = Quat::from_euler(EulerRot::YXZ, 1.2, -0.5, 0.8);
    let level = level_to_yaw(rotation);
    let (yaw, pitch, roll) = level.to_euler(EulerRot::YXZ);
    assert_relative_eq!(yaw, 1.2, epsilon = 1e-5);
    assert_relative_eq!(pitch, 0.0, epsilon = 1e-5);
    assert_relative_eq!(roll, 0.0, epsilon = 1e-5);
}

#[test]
fn test_finished_curve_equips_weapon() {
    let mut world = weapon_world(1.0 / 60.0);
    let character = world.spawn(ShooterCharacter).id();
    let weapon = spawn_weapon(&mut world, "AssaultRifle", ItemState::EquipInterping);

    world.send_event(ItemInterpFinished {
        item: weapon,
        character,
    });
    world.run_system_once(get_pickup_item).unwrap();

    assert_eq!(world.get::<EquippedWeapon>(character).unwrap().0, Some(weapon));
    assert_eq!(world.get::<Item>(weapon).unwrap().state(), ItemState::Equipped);
    assert_eq!(world.get::<HeldBy>(weapon), Some(&HeldBy(character)));
    assert_eq!(world.resource::<Events<WeaponEquipped>>().len(), 1);
    assert!(world.resource::<Events<WeaponDropped>>().is_empty());
}

#[test]
fn test_finished_curve_swaps_weapons() {
    let mut world = weapon_world(1.0 / 60.0);
    let character = world.spawn(ShooterCharacter).id();
    let old = spawn_weapon(&mut world, "SubmachineGun", ItemState::Equipped);
    let new = spawn_weapon(&mut world, "AssaultRifle", ItemState::EquipInterping);
    world.entity_mut(old).insert(HeldBy(character));
    world.get_mut::<EquippedWeapon>(character).unwrap().0 = Some(old);

    world.send_event(ItemInterpFinished { item: new, character });
    world.run_system_once(get_pickup_item).unwrap();

    assert_eq!(world.get::<EquippedWeapon>(character).unwrap().0, Some(new));
    assert_eq!(world.get::<Item>(old).unwrap().state(), ItemState::Falling);
    assert!(world.get::<HeldBy>(old).is_none());
    assert!(world.get::<WeaponFallTimer>(old).is_some());
    assert!(world.get::<Weapon>(old).unwrap().falling);
    assert_relative_eq!(world.get::<PhysicsBody>(old).unwrap().velocity.length(), 4.0, epsilon = 1e-4);
    assert_eq!(world.resource::<Events<WeaponDropped>>().len(), 1);
}

#[test]
fn test_finished_curve_stores_plain_item() {
    let mut world = weapon_world(1.0 / 60.0);
    let character = world.spawn(ShooterCharacter).id();
    let config = ShooterConfig::default();
    let ammo = world
        .spawn(item_bundle(
            Item::new("9mm Ammo", ItemRarity::Common).with_state(ItemState::EquipInterping),
            Transform::default(),
            &config.items,
        ))
        .id();

    world.send_event(ItemInterpFinished { item: ammo, character });
    world.run_system_once(get_pickup_item).unwrap();

    assert_eq!(world.get::<Item>(ammo).unwrap().state(), ItemState::PickedUp);
    assert_eq!(world.get::<EquippedWeapon>(character).unwrap().0, None);
    assert_eq!(world.resource::<Events<ItemStored>>().len(), 1);
}

#[test]
fn test_drop_button_throws_equipped_weapon() {
    let mut world = weapon_world(1.0 / 60.0);
    let weapon = spawn_weapon(&mut world, "SubmachineGun", ItemState::Equipped);
    let mut input = ShooterInput::default();
    input.drop.press();
    let character = world
        .spawn((ShooterCharacter, input, EquippedWeapon(Some(weapon))))
        .id();
    world.entity_mut(weapon).insert(HeldBy(character));

    world.run_system_once(drop_button_pressed).unwrap();

    assert_eq!(world.get::<EquippedWeapon>(character).unwrap().0, None);
    assert_eq!(world.get::<Item>(weapon).unwrap().state(), ItemState::Falling);
    assert!(world.get::<HeldBy>(weapon).is_none());
    let timer = world.get::<WeaponFallTimer>(weapon).unwrap();
    assert_relative_eq!(timer.0.duration().as_secs_f32(), 0.7, epsilon = 1e-6);

    // Second press with empty hands
    world.run_system_once(drop_button_pressed).unwrap();
    assert_eq!(world.resource::<Events<WeaponDropped>>().len(), 1);
}

#[test]
fn test_fall_timer_returns_weapon_to_pickup() {
    let mut world = weapon_world(0.4);
    let weapon = spawn_weapon(&mut world, "SubmachineGun", ItemState::Falling);
    world.get_mut::<Weapon>(weapon).unwrap().falling = true;
    world.get_mut::<Transform>(weapon).unwrap().rotation = Quat::from_euler(EulerRot::YXZ, 0.5, 0.7, 0.2);
    world
        .entity_mut(weapon)
        .insert(WeaponFallTimer(Timer::from_seconds(0.7, TimerMode::Once)));

    world.run_system_once(tick_falling_weapons).unwrap();
    assert_eq!(world.get::<Item>(weapon).unwrap().state(), ItemState::Falling);
    let (yaw, pitch, roll) = world.get::<Transform>(weapon).unwrap().rotation.to_euler(EulerRot::YXZ);
    assert_relative_eq!(yaw, 0.5, epsilon = 1e-5);
    assert_relative_eq!(pitch, 0.0, epsilon = 1e-5);
    assert_relative_eq!(roll, 0.0, epsilon = 1e-5);

    world.run_system_once(tick_falling_weapons).unwrap();
    assert_eq!(world.get::<Item>(weapon).unwrap().state(), ItemState::Pickup);
    assert!(!world.get::<Weapon>(weapon).unwrap().falling);
    assert!(world.get::<WeaponFallTimer>(weapon).is_none());
}

#[test]
fn test_default_weapon_spawned_in_hand() {
    let mut world = weapon_world(1.0 / 60.0);
    let character = world
        .spawn((
            ShooterCharacter,
            Transform::from_xyz(2.0, 0.0, 0.0),
            SpawnDefaultWeapon {
                name: "SubmachineGun".into(),
            },
        ))
        .id();

    world.run_system_once(spawn_default_weapons).unwrap();

    let weapon = world.get::<EquippedWeapon>(character).unwrap().0.unwrap();
    assert!(world.get::<SpawnDefaultWeapon>(character).is_none());
    let item = world.get::<Item>(weapon).unwrap();
    assert_eq!(item.name, "SubmachineGun");
    assert_eq!(item.count, 30);
    assert_eq!(item.state(), ItemState::Equipped);
    assert_eq!(world.get::<Weapon>(weapon).unwrap().ammo, 30);
    assert_relative_eq!(world.get::<Transform>(weapon).unwrap().translation.x, 2.25, epsilon = 1e-5);
}

#[test]
fn test_held_weapon_follows_hand() {
    let mut world = weapon_world(1.0 / 60.0);
    let character = world
        .spawn((
            ShooterCharacter,
            Transform::from_xyz(0.0, 0.0, 5.0).with_rotation(Quat::from_rotation_y(std::f32::consts::PI)),
        ))
        .id();
    let weapon = spawn_weapon(&mut world, "SubmachineGun", ItemState::Equipped);
    world.entity_mut(weapon).insert(HeldBy(character));

    world.run_system_once(follow_hand_socket).unwrap();

    // Facing +Z: hand offset (0.25, 1.1, -0.3) mirrored in x and z
    let translation = world.get::<Transform>(weapon).unwrap().translation;
    assert_relative_eq!(translation.x, -0.25, epsilon = 1e-5);
    assert_relative_eq!(translation.y, 1.1, epsilon = 1e-5);
    assert_relative_eq!(translation.z, 5.3, epsilon = 1e-5);
}
