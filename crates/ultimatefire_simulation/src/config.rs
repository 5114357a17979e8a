//! Gameplay tuning loaded from TOML.
//!
//! Every field has a default, so a config file only lists what it overrides:
//!
//! ```toml
//! [camera]
//! zoomed_fov = 40.0
//!
//! [weapon]
//! automatic_fire_rate = 0.08
//! ```

use bevy::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::math::FloatCurve;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Root gameplay config (resource).
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub camera: CameraConfig,
    pub look: LookConfig,
    pub movement: MovementConfig,
    pub crosshair: CrosshairConfig,
    pub items: ItemConfig,
    pub weapon: WeaponConfig,
    pub viewport: ViewportConfig,
}

impl ShooterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ShooterConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_positive = [
            ("camera.default_fov", self.camera.default_fov),
            ("camera.zoomed_fov", self.camera.zoomed_fov),
            ("camera.trace_distance", self.camera.trace_distance),
            ("movement.max_walk_speed", self.movement.max_walk_speed),
            ("items.z_curve_time", self.items.z_curve_time),
            ("items.area_radius", self.items.area_radius),
            ("weapon.automatic_fire_rate", self.weapon.automatic_fire_rate),
            ("weapon.throw_time", self.weapon.throw_time),
            ("crosshair.shoot_time_duration", self.crosshair.shoot_time_duration),
        ];
        // Durations end up in `Timer::from_seconds`, which panics on infinity
        for (field, value) in finite_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and > 0, got {}", value),
                });
            }
        }

        if self.camera.default_fov >= 180.0 || self.camera.zoomed_fov >= 180.0 {
            return Err(ConfigError::Invalid {
                field: "camera",
                reason: "field of view must be below 180 degrees".into(),
            });
        }

        Ok(())
    }
}

/// Spring arm, follow camera, zoom and crosshair ray.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub arm_length: f32,
    /// (right, up) offset of the arm end
    pub socket_offset: [f32; 2],
    pub default_fov: f32,
    pub zoomed_fov: f32,
    pub zoom_interp_speed: f32,
    /// Where picked-up items fly: in front of the camera by `distance`, raised by `elevation`
    pub item_interp_distance: f32,
    pub item_interp_elevation: f32,
    /// Crosshair sits this many pixels above the viewport centre
    pub crosshair_screen_offset: f32,
    pub trace_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            arm_length: 1.8,
            socket_offset: [0.5, 0.7],
            default_fov: 90.0,
            zoomed_fov: 35.0,
            zoom_interp_speed: 20.0,
            item_interp_distance: 2.5,
            item_interp_elevation: 0.65,
            crosshair_screen_offset: 50.0,
            trace_distance: 500.0,
        }
    }
}

/// Turn/look-up rates. Gamepad rates are deg/s, mouse rates are scale factors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    pub hip_turn_rate: f32,
    pub hip_look_up_rate: f32,
    pub aim_turn_rate: f32,
    pub aim_look_up_rate: f32,
    pub mouse_hip_turn_rate: f32,
    pub mouse_hip_look_up_rate: f32,
    pub mouse_aim_turn_rate: f32,
    pub mouse_aim_look_up_rate: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            hip_turn_rate: 90.0,
            hip_look_up_rate: 90.0,
            aim_turn_rate: 20.0,
            aim_look_up_rate: 20.0,
            mouse_hip_turn_rate: 1.0,
            mouse_hip_look_up_rate: 1.0,
            mouse_aim_turn_rate: 0.5,
            mouse_aim_look_up_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub max_walk_speed: f32,
    pub max_acceleration: f32,
    pub braking_deceleration: f32,
    pub jump_velocity: f32,
    pub air_control: f32,
    pub gravity: f32,
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_walk_speed: 6.0,
            max_acceleration: 20.48,
            braking_deceleration: 20.48,
            jump_velocity: 6.0,
            air_control: 0.2,
            gravity: -9.81,
            capsule_radius: 0.42,
            capsule_half_height: 0.88,
        }
    }
}

/// Targets and ease speeds of each spread factor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrosshairConfig {
    pub base_spread: f32,
    pub in_air_target: f32,
    pub in_air_interp_speed: f32,
    pub landed_interp_speed: f32,
    pub aim_target: f32,
    pub aim_interp_speed: f32,
    pub shooting_target: f32,
    pub shooting_interp_speed: f32,
    pub shoot_time_duration: f32,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            base_spread: 0.5,
            in_air_target: 2.25,
            in_air_interp_speed: 2.25,
            landed_interp_speed: 30.0,
            aim_target: 0.6,
            aim_interp_speed: 30.0,
            shooting_target: 0.3,
            shooting_interp_speed: 60.0,
            shoot_time_duration: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub z_curve_time: f32,
    pub height_curve: FloatCurve,
    pub lateral_interp_speed: f32,
    pub area_radius: f32,
    pub collision_box_half_extents: [f32; 3],
    pub default_count: u32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            z_curve_time: 0.7,
            height_curve: FloatCurve::item_height(),
            lateral_interp_speed: 30.0,
            area_radius: 1.5,
            collision_box_half_extents: [0.1, 0.15, 0.45],
            default_count: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub automatic_fire_rate: f32,
    pub throw_time: f32,
    pub throw_speed: f32,
    /// Roll of the throw direction around weapon forward (degrees)
    pub throw_tilt: f32,
    /// Upper bound of the random yaw added to a throw (degrees)
    pub throw_random_yaw: f32,
    pub default_ammo: u32,
    /// Muzzle relative to the weapon origin
    pub barrel_offset: [f32; 3],
    /// Right-hand socket relative to the character origin
    pub hand_offset: [f32; 3],
    pub spawn_default_weapon: bool,
    pub default_weapon_name: String,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            automatic_fire_rate: 0.1,
            throw_time: 0.7,
            throw_speed: 4.0,
            throw_tilt: -20.0,
            throw_random_yaw: 30.0,
            default_ammo: 30,
            barrel_offset: [0.0, 0.05, -0.6],
            hand_offset: [0.25, 1.1, -0.3],
            spawn_default_weapon: true,
            default_weapon_name: "SubmachineGun".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}
