//! Kinematic character movement + free-falling item bodies
//!
//! No Rapier solver step: velocities are integrated here, Rapier components
//! only mirror the result for a physics host.
//!
//! Floor is the plane y = 0 (WorldStatic).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{KinematicController, MovementInput, PhysicsBody};
use crate::item::ItemMesh;
use crate::physics::collision::CollisionChannel;

/// Tolerance for "standing on the floor"
pub const GROUND_TOLERANCE: f32 = 1.0e-3;

/// Movement input → lateral acceleration + velocity
///
/// Grounded: accelerate up to max walk speed, brake when there is no input.
/// Airborne: acceleration scaled by `air_control`, no braking.
pub fn apply_movement_input(
    mut query: Query<(&KinematicController, &mut MovementInput, &mut PhysicsBody)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (controller, mut input, mut body) in query.iter_mut() {
        let direction = input.consume();
        let control = if controller.grounded { 1.0 } else { controller.air_control };
        let acceleration = Vec3::new(direction.x, 0.0, direction.z) * controller.max_acceleration * control;
        body.acceleration = acceleration;

        let mut lateral = body.lateral_velocity();
        if acceleration.length_squared() > 0.0 {
            lateral += acceleration * delta;
            lateral = lateral.clamp_length_max(controller.max_walk_speed);
        } else if controller.grounded {
            let speed = lateral.length();
            let braked = (speed - controller.braking_deceleration * delta).max(0.0);
            lateral = lateral.normalize_or_zero() * braked;
        }

        body.velocity.x = lateral.x;
        body.velocity.z = lateral.z;
    }
}

/// Jump impulse while jump is held and the character stands on the floor
pub fn apply_jump(mut query: Query<(&mut KinematicController, &MovementInput, &mut PhysicsBody)>) {
    for (mut controller, input, mut body) in query.iter_mut() {
        if input.jump && controller.grounded {
            body.velocity.y = controller.jump_velocity;
            controller.grounded = false;
        }
    }
}

pub fn apply_gravity(mut query: Query<(&KinematicController, &mut PhysicsBody)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (controller, mut body) in query.iter_mut() {
        if !controller.grounded {
            body.velocity.y += controller.gravity * delta;
        }
    }
}

/// velocity → Transform, landing on the floor
pub fn integrate_velocity_to_transform(
    mut query: Query<(&mut PhysicsBody, &mut Transform), With<KinematicController>>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut body, mut transform) in query.iter_mut() {
        let velocity = body.velocity;
        transform.translation += velocity * delta;

        if transform.translation.y < 0.0 {
            transform.translation.y = 0.0;
            body.velocity.y = body.velocity.y.max(0.0);
        }
    }
}

pub fn ground_detection(mut query: Query<(&Transform, &PhysicsBody, &mut KinematicController)>) {
    for (transform, body, mut controller) in query.iter_mut() {
        controller.grounded = transform.translation.y <= GROUND_TOLERANCE && body.velocity.y <= 0.0;
    }
}

/// Physics-simulated item meshes (Falling weapons)
///
/// Items without physics keep whatever velocity they had frozen.
pub fn integrate_item_bodies(
    mut query: Query<(&ItemMesh, &mut PhysicsBody, &mut Transform), Without<KinematicController>>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mesh, mut body, mut transform) in query.iter_mut() {
        if !mesh.simulate_physics {
            body.velocity = Vec3::ZERO;
            continue;
        }

        if mesh.enable_gravity {
            body.velocity.y += mesh.gravity * delta;
        }
        let velocity = body.velocity;
        transform.translation += velocity * delta;

        if transform.translation.y < 0.0 && mesh.collision.blocks(CollisionChannel::WorldStatic) {
            transform.translation.y = 0.0;
            body.velocity = Vec3::ZERO;
        }
    }
}

/// Mirror simulated velocity onto Rapier for a physics host
pub fn sync_velocity_to_rapier(mut query: Query<(&PhysicsBody, &mut Velocity)>) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}

/// Rapier bundle for a walking character (kinematic capsule, Pawn channel)
pub fn character_rapier_bundle(radius: f32, half_height: f32) -> impl Bundle {
    (
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(half_height, radius),
        CollisionGroups::new(
            CollisionChannel::Pawn.group(),
            CollisionChannel::WorldStatic.group() | CollisionChannel::Pawn.group(),
        ),
        Velocity::default(),
    )
}
