//! Tests for kinematic movement systems.

use std::time::Duration;

use approx::assert_relative_eq;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use super::movement::*;
use crate::components::{KinematicController, MovementInput, PhysicsBody};
use crate::item::ItemMesh;
use crate::physics::collision::{CollisionChannel, CollisionEnabled, CollisionResponse, CollisionSettings};

fn world_with_delta(seconds: f32) -> World {
    let mut world = World::new();
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(seconds));
    world.insert_resource(time);
    world
}

#[test]
fn test_input_accelerates_up_to_walk_speed() {
    let mut world = world_with_delta(0.1);
    let entity = world
        .spawn((
            KinematicController::default(),
            MovementInput {
                direction: Vec3::NEG_Z,
                jump: false,
            },
        ))
        .id();

    world.run_system_once(apply_movement_input).unwrap();

    let body = world.get::<PhysicsBody>(entity).unwrap();
    // 20.48 m/s² × 0.1 s
    assert_relative_eq!(body.velocity.z, -2.048, epsilon = 1e-4);
    assert_relative_eq!(body.acceleration.length(), 20.48, epsilon = 1e-4);

    for _ in 0..10 {
        world.get_mut::<MovementInput>(entity).unwrap().direction = Vec3::NEG_Z;
        world.run_system_once(apply_movement_input).unwrap();
    }
    let body = world.get::<PhysicsBody>(entity).unwrap();
    assert_relative_eq!(body.lateral_speed(), 6.0, epsilon = 1e-4);
}

#[test]
fn test_no_input_brakes_to_stop() {
    let mut world = world_with_delta(0.1);
    let entity = world
        .spawn((
            KinematicController::default(),
            MovementInput::default(),
            PhysicsBody {
                velocity: Vec3::new(1.0, 0.0, 0.0),
                acceleration: Vec3::ZERO,
            },
        ))
        .id();

    world.run_system_once(apply_movement_input).unwrap();

    let body = world.get::<PhysicsBody>(entity).unwrap();
    assert_eq!(body.velocity, Vec3::ZERO);
    assert_eq!(body.acceleration, Vec3::ZERO);
}

#[test]
fn test_air_control_scales_acceleration() {
    let mut world = world_with_delta(0.1);
    let entity = world
        .spawn((
            KinematicController {
                grounded: false,
                ..default()
            },
            MovementInput {
                direction: Vec3::X,
                jump: false,
            },
        ))
        .id();

    world.run_system_once(apply_movement_input).unwrap();

    let body = world.get::<PhysicsBody>(entity).unwrap();
    assert_relative_eq!(body.acceleration.x, 20.48 * 0.2, epsilon = 1e-4);
}

#[test]
fn test_jump_then_land() {
    let mut world = world_with_delta(0.05);
    let entity = world
        .spawn((
            KinematicController::default(),
            MovementInput {
                direction: Vec3::ZERO,
                jump: true,
            },
            Transform::default(),
        ))
        .id();

    world.run_system_once(apply_jump).unwrap();
    assert!(!world.get::<KinematicController>(entity).unwrap().grounded);
    assert_relative_eq!(world.get::<PhysicsBody>(entity).unwrap().velocity.y, 6.0);

    world.get_mut::<MovementInput>(entity).unwrap().jump = false;

    let mut peak: f32 = 0.0;
    for _ in 0..60 {
        world.run_system_once(apply_gravity).unwrap();
        world.run_system_once(integrate_velocity_to_transform).unwrap();
        world.run_system_once(ground_detection).unwrap();
        peak = peak.max(world.get::<Transform>(entity).unwrap().translation.y);
    }

    // v²/2g ≈ 1.83 m
    assert!(peak > 1.5 && peak < 2.0, "peak {}", peak);
    assert_eq!(world.get::<Transform>(entity).unwrap().translation.y, 0.0);
    assert!(world.get::<KinematicController>(entity).unwrap().grounded);
}

fn falling_mesh() -> ItemMesh {
    ItemMesh {
        simulate_physics: true,
        enable_gravity: true,
        visible: true,
        gravity: -9.81,
        collision: CollisionSettings::only(
            CollisionEnabled::QueryAndPhysics,
            CollisionChannel::WorldStatic,
            CollisionResponse::Block,
        ),
    }
}

#[test]
fn test_falling_item_lands_on_floor() {
    let mut world = world_with_delta(0.05);
    let entity = world
        .spawn((
            falling_mesh(),
            PhysicsBody {
                velocity: Vec3::new(2.0, 0.0, 0.0),
                acceleration: Vec3::ZERO,
            },
            Transform::from_xyz(0.0, 1.0, 0.0),
        ))
        .id();

    for _ in 0..40 {
        world.run_system_once(integrate_item_bodies).unwrap();
    }

    let transform = world.get::<Transform>(entity).unwrap();
    assert_eq!(transform.translation.y, 0.0);
    assert!(transform.translation.x > 0.0);
    assert_eq!(world.get::<PhysicsBody>(entity).unwrap().velocity, Vec3::ZERO);
}

#[test]
fn test_item_without_physics_stays_put() {
    let mut world = world_with_delta(0.05);
    let entity = world
        .spawn((
            ItemMesh {
                simulate_physics: false,
                ..falling_mesh()
            },
            PhysicsBody {
                velocity: Vec3::new(2.0, 3.0, 0.0),
                acceleration: Vec3::ZERO,
            },
            Transform::from_xyz(0.0, 1.0, 0.0),
        ))
        .id();

    world.run_system_once(integrate_item_bodies).unwrap();

    assert_eq!(world.get::<Transform>(entity).unwrap().translation, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(world.get::<PhysicsBody>(entity).unwrap().velocity, Vec3::ZERO);
}
