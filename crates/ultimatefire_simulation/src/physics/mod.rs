//! Physics module
//!
//! Kinematic character movement, item free-fall, collision presets and
//! line traces. Rapier components are attached for a physics host but the
//! simulation integrates velocities itself.

use bevy::prelude::*;

pub mod collision;
pub mod movement;
pub mod trace;

#[cfg(test)]
mod movement_tests;

pub use collision::{CollisionChannel, CollisionEnabled, CollisionResponse, CollisionSettings};
pub use movement::{character_rapier_bundle, GROUND_TOLERANCE};
pub use trace::{
    deproject_screen_to_world, trace_shapes, LineTrace, SceneTracer, ShapeKind, TraceHit, TraceShape,
    Viewport, WorldRay,
};

use crate::ShooterSet;

/// Registers movement integration in FixedUpdate
///
/// Order:
/// 1. apply_movement_input: input → lateral velocity
/// 2. apply_jump
/// 3. apply_gravity
/// 4. integrate_velocity_to_transform
/// 5. ground_detection
/// 6. integrate_item_bodies: Falling items
/// 7. sync_velocity_to_rapier
pub struct KinematicControllerPlugin;

impl Plugin for KinematicControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                movement::apply_movement_input,
                movement::apply_jump,
                movement::apply_gravity,
                movement::integrate_velocity_to_transform,
                movement::ground_detection,
                movement::integrate_item_bodies,
                movement::sync_velocity_to_rapier,
            )
                .chain()
                .in_set(ShooterSet::Movement),
        );
    }
}
