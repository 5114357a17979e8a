//! Movement components: body velocity, kinematic controller, control rotation

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::math::normalize_axis;

/// Custom velocity integration (Rapier only sees the result)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    /// Acceleration requested by movement input this tick
    pub acceleration: Vec3,
}

impl PhysicsBody {
    pub fn lateral_velocity(&self) -> Vec3 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z)
    }

    pub fn lateral_speed(&self) -> f32 {
        self.lateral_velocity().length()
    }
}

/// Walking character controller
///
/// Floor is the plane y = 0.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(PhysicsBody)]
pub struct KinematicController {
    pub max_walk_speed: f32,
    pub max_acceleration: f32,
    pub braking_deceleration: f32,
    pub jump_velocity: f32,
    /// Fraction of acceleration available while airborne
    pub air_control: f32,
    pub gravity: f32,
    pub grounded: bool,
}

impl Default for KinematicController {
    fn default() -> Self {
        Self::from_config(&MovementConfig::default())
    }
}

impl KinematicController {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            max_walk_speed: config.max_walk_speed,
            max_acceleration: config.max_acceleration,
            braking_deceleration: config.braking_deceleration,
            jump_velocity: config.jump_velocity,
            air_control: config.air_control,
            gravity: config.gravity,
            grounded: true,
        }
    }

    pub fn is_falling(&self) -> bool {
        !self.grounded
    }
}

/// Movement input accumulated this tick (world space, length ≤ 1 after clamp)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pub direction: Vec3,
    /// Jump held
    pub jump: bool,
}

impl MovementInput {
    pub fn add(&mut self, direction: Vec3, scale: f32) {
        self.direction += direction * scale;
    }

    pub fn consume(&mut self) -> Vec3 {
        let input = self.direction.clamp_length_max(1.0);
        self.direction = Vec3::ZERO;
        input
    }
}

/// Controller (view) rotation in degrees
///
/// Yaw 0 looks down -Z, positive yaw turns left (toward -X).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    pub const PITCH_LIMIT: f32 = 89.0;

    pub fn add_yaw(&mut self, degrees: f32) {
        self.yaw = normalize_axis(self.yaw + degrees);
    }

    pub fn add_pitch(&mut self, degrees: f32) {
        self.pitch = (self.pitch + degrees).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Yaw-only rotation (movement basis)
    pub fn yaw_quat(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Full view rotation
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw.to_radians(), self.pitch.to_radians(), 0.0)
    }

    /// Horizontal forward (ignores pitch)
    pub fn forward(&self) -> Vec3 {
        self.yaw_quat() * Vec3::NEG_Z
    }

    /// Horizontal right (ignores pitch)
    pub fn right(&self) -> Vec3 {
        self.yaw_quat() * Vec3::X
    }
}
