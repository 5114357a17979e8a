//! Third-person camera: spring arm, derived follow-camera pose, zoom

use bevy::prelude::*;

use crate::config::CameraConfig;

/// Spring arm holding the follow camera behind the character
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraBoom {
    pub arm_length: f32,
    /// Arm end offset in view space (x = right, y = up)
    pub socket_offset: Vec2,
}

impl Default for CameraBoom {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl CameraBoom {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            arm_length: config.arm_length,
            socket_offset: Vec2::from_array(config.socket_offset),
        }
    }

    /// Camera pose for a character at `pivot` looking along `view`
    pub fn camera_pose(&self, pivot: Vec3, view: Quat) -> FollowCamera {
        let local = Vec3::new(self.socket_offset.x, self.socket_offset.y, self.arm_length);
        FollowCamera {
            position: pivot + view * local,
            rotation: view,
        }
    }
}

/// Follow camera pose (rebuilt every tick from boom + control rotation)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FollowCamera {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl FollowCamera {
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation)
    }
}

/// Aim-down-sights zoom (horizontal FOV, degrees)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraZoom {
    pub default_fov: f32,
    pub zoomed_fov: f32,
    pub current_fov: f32,
    pub interp_speed: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl CameraZoom {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            default_fov: config.default_fov,
            zoomed_fov: config.zoomed_fov,
            current_fov: config.default_fov,
            interp_speed: config.zoom_interp_speed,
        }
    }

    pub fn target(&self, aiming: bool) -> f32 {
        if aiming {
            self.zoomed_fov
        } else {
            self.default_fov
        }
    }
}

/// Where picked-up items fly to, relative to the follow camera
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ItemCameraTarget {
    pub distance: f32,
    pub elevation: f32,
}

impl Default for ItemCameraTarget {
    fn default() -> Self {
        let config = CameraConfig::default();
        Self {
            distance: config.item_interp_distance,
            elevation: config.item_interp_elevation,
        }
    }
}

impl ItemCameraTarget {
    pub fn location(&self, camera: &FollowCamera) -> Vec3 {
        camera.position + camera.forward() * self.distance + camera.up() * self.elevation
    }
}
