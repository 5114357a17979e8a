//! Animation-state bridge
//!
//! The simulation does not blend animations. It publishes the values an
//! animation graph reads (`ShooterAnimState`) and montage requests.

use bevy::prelude::*;

use crate::character::{Aiming, ShooterCharacter};
use crate::components::{ControlRotation, KinematicController, PhysicsBody};
use crate::math::{normalize_axis, yaw_of};
use crate::ShooterSet;

/// Per-tick animation inputs of a shooter character
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ShooterAnimState {
    /// Lateral speed (m/s)
    pub speed: f32,
    pub is_in_air: bool,
    pub is_accelerating: bool,
    pub is_aiming: bool,
    /// Movement heading relative to the aim heading, degrees in (-180, 180]
    pub movement_offset_yaw: f32,
    /// Offset of the last tick the character was moving (stop animations)
    pub last_movement_offset_yaw: f32,
}

impl ShooterAnimState {
    pub fn update(&mut self, body: &PhysicsBody, grounded: bool, aiming: bool, aim_yaw: f32) {
        let lateral = body.lateral_velocity();
        self.speed = lateral.length();
        self.is_in_air = !grounded;
        self.is_accelerating = body.acceleration.length() > 0.0;
        self.is_aiming = aiming;

        if self.speed > 0.0 {
            self.movement_offset_yaw = normalize_axis(yaw_of(lateral) - aim_yaw);
            self.last_movement_offset_yaw = self.movement_offset_yaw;
        }
    }
}

/// Play a montage section on a character's animation graph
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct MontageRequested {
    pub entity: Entity,
    pub montage: &'static str,
    pub section: &'static str,
}

impl MontageRequested {
    pub const HIP_FIRE: &'static str = "HipFire";
    pub const START_FIRE: &'static str = "StartFire";

    pub fn hip_fire(entity: Entity) -> Self {
        Self {
            entity,
            montage: Self::HIP_FIRE,
            section: Self::START_FIRE,
        }
    }
}

/// System: refresh animation state from movement + aim
pub fn update_animation_properties(
    mut query: Query<
        (&PhysicsBody, &KinematicController, &Aiming, &ControlRotation, &mut ShooterAnimState),
        With<ShooterCharacter>,
    >,
) {
    for (body, controller, aiming, rotation, mut state) in query.iter_mut() {
        state.update(body, controller.grounded, aiming.0, rotation.yaw);
    }
}

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ShooterAnimState>()
            .add_event::<MontageRequested>()
            .add_systems(
                FixedUpdate,
                update_animation_properties.in_set(ShooterSet::Animation),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body(velocity: Vec3, acceleration: Vec3) -> PhysicsBody {
        PhysicsBody {
            velocity,
            acceleration,
        }
    }

    #[test]
    fn test_speed_ignores_vertical_velocity() {
        let mut state = ShooterAnimState::default();
        state.update(&body(Vec3::new(3.0, -5.0, 4.0), Vec3::ZERO), false, false, 0.0);
        assert_relative_eq!(state.speed, 5.0);
        assert!(state.is_in_air);
        assert!(!state.is_accelerating);
    }

    #[test]
    fn test_strafe_right_offset() {
        let mut state = ShooterAnimState::default();
        // Aiming down -Z, moving toward +X (right)
        state.update(&body(Vec3::new(4.0, 0.0, 0.0), Vec3::X), true, true, 0.0);
        assert_relative_eq!(state.movement_offset_yaw, -90.0, epsilon = 1e-4);
        assert!(state.is_accelerating);
        assert!(state.is_aiming);
    }

    #[test]
    fn test_offset_wraps() {
        let mut state = ShooterAnimState::default();
        // Aim yaw 170, moving at yaw -170: offset is +20, not -340
        let direction = Quat::from_rotation_y((-170.0_f32).to_radians()) * Vec3::NEG_Z;
        state.update(&body(direction * 2.0, Vec3::ZERO), true, false, 170.0);
        assert_relative_eq!(state.movement_offset_yaw, 20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_last_offset_kept_when_stopped() {
        let mut state = ShooterAnimState::default();
        state.update(&body(Vec3::new(-2.0, 0.0, 0.0), Vec3::ZERO), true, false, 0.0);
        assert_relative_eq!(state.last_movement_offset_yaw, 90.0, epsilon = 1e-4);

        state.update(&body(Vec3::ZERO, Vec3::ZERO), true, false, 0.0);
        assert_eq!(state.speed, 0.0);
        assert_relative_eq!(state.last_movement_offset_yaw, 90.0, epsilon = 1e-4);
        assert_relative_eq!(state.movement_offset_yaw, 90.0, epsilon = 1e-4);
    }
}
