//! Shooter character components

use bevy::prelude::*;

use super::crosshair::{CrosshairFiring, CrosshairSpread};
use crate::animation::ShooterAnimState;
use crate::components::{
    CameraBoom, CameraZoom, ControlRotation, FollowCamera, ItemCameraTarget, KinematicController,
    MovementInput, ShooterInput,
};
use crate::config::{LookConfig, MovementConfig};
use crate::shooting::FireControl;
use crate::weapon::EquippedWeapon;

/// Third-person shooter character
///
/// Everything a character needs is pulled in through required components;
/// `spawn_shooter_character` overrides the config-driven ones.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    Transform,
    KinematicController,
    MovementInput,
    ControlRotation,
    ShooterInput,
    CharacterCapsule,
    CameraBoom,
    FollowCamera,
    CameraZoom,
    ItemCameraTarget,
    LookRates,
    Aiming,
    OverlappedItems,
    TracedItem,
    CrosshairSpread,
    CrosshairFiring,
    EquippedWeapon,
    FireControl,
    ShooterAnimState
)]
pub struct ShooterCharacter;

/// Vertical capsule standing on `Transform.translation` (feet)
///
/// `half_height` includes the hemispheres, so the capsule is
/// `2 * half_height` tall.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterCapsule {
    pub radius: f32,
    pub half_height: f32,
}

impl Default for CharacterCapsule {
    fn default() -> Self {
        Self::from_config(&MovementConfig::default())
    }
}

impl CharacterCapsule {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            radius: config.capsule_radius,
            half_height: config.capsule_half_height.max(config.capsule_radius),
        }
    }

    pub fn center(&self, feet: Vec3) -> Vec3 {
        feet + Vec3::Y * self.half_height
    }

    /// Hemisphere centres (bottom, top)
    pub fn segment(&self, feet: Vec3) -> (Vec3, Vec3) {
        (
            feet + Vec3::Y * self.radius,
            feet + Vec3::Y * (2.0 * self.half_height - self.radius),
        )
    }
}

/// Aim button held (zoomed camera, slower look, tighter crosshair)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Aiming(pub bool);

/// Look sensitivity
///
/// `base_*` rates are what the gamepad axes use this tick (deg/s). They are
/// switched between hip and aim rates by `set_look_rates`. Mouse values are
/// plain scale factors.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LookRates {
    pub base_turn_rate: f32,
    pub base_look_up_rate: f32,
    pub hip_turn_rate: f32,
    pub hip_look_up_rate: f32,
    pub aim_turn_rate: f32,
    pub aim_look_up_rate: f32,
    pub mouse_hip_turn_rate: f32,
    pub mouse_hip_look_up_rate: f32,
    pub mouse_aim_turn_rate: f32,
    pub mouse_aim_look_up_rate: f32,
}

impl Default for LookRates {
    fn default() -> Self {
        Self::from_config(&LookConfig::default())
    }
}

impl LookRates {
    pub fn from_config(config: &LookConfig) -> Self {
        Self {
            base_turn_rate: config.hip_turn_rate,
            base_look_up_rate: config.hip_look_up_rate,
            hip_turn_rate: config.hip_turn_rate,
            hip_look_up_rate: config.hip_look_up_rate,
            aim_turn_rate: config.aim_turn_rate,
            aim_look_up_rate: config.aim_look_up_rate,
            mouse_hip_turn_rate: config.mouse_hip_turn_rate,
            mouse_hip_look_up_rate: config.mouse_hip_look_up_rate,
            mouse_aim_turn_rate: config.mouse_aim_turn_rate,
            mouse_aim_look_up_rate: config.mouse_aim_look_up_rate,
        }
    }

    pub fn set_for(&mut self, aiming: bool) {
        if aiming {
            self.base_turn_rate = self.aim_turn_rate;
            self.base_look_up_rate = self.aim_look_up_rate;
        } else {
            self.base_turn_rate = self.hip_turn_rate;
            self.base_look_up_rate = self.hip_look_up_rate;
        }
    }

    /// (turn, look up) mouse scale
    pub fn mouse_scale(&self, aiming: bool) -> (f32, f32) {
        if aiming {
            (self.mouse_aim_turn_rate, self.mouse_aim_look_up_rate)
        } else {
            (self.mouse_hip_turn_rate, self.mouse_hip_look_up_rate)
        }
    }
}

/// Number of item area spheres the character stands in
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct OverlappedItems {
    count: u32,
}

impl OverlappedItems {
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Adds `amount` (±1 from overlap events), never going below zero
    pub fn increment(&mut self, amount: i32) {
        self.count = self.count.saturating_add_signed(amount);
    }

    /// Items are traced under the crosshair only near at least one item
    pub fn should_trace(&self) -> bool {
        self.count > 0
    }
}

/// Item currently under the crosshair (its pickup widget is shown)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TracedItem(pub Option<Entity>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_count_never_negative() {
        let mut overlapped = OverlappedItems::default();
        overlapped.increment(-1);
        assert_eq!(overlapped.count(), 0);
        assert!(!overlapped.should_trace());

        overlapped.increment(1);
        overlapped.increment(1);
        overlapped.increment(-1);
        assert_eq!(overlapped.count(), 1);
        assert!(overlapped.should_trace());
    }

    #[test]
    fn test_look_rates_switch_with_aim() {
        let mut rates = LookRates::default();
        assert_eq!(rates.base_turn_rate, 90.0);

        rates.set_for(true);
        assert_eq!(rates.base_turn_rate, 20.0);
        assert_eq!(rates.base_look_up_rate, 20.0);
        assert_eq!(rates.mouse_scale(true), (0.5, 0.5));

        rates.set_for(false);
        assert_eq!(rates.base_look_up_rate, 90.0);
        assert_eq!(rates.mouse_scale(false), (1.0, 1.0));
    }

    #[test]
    fn test_capsule_segment() {
        let capsule = CharacterCapsule {
            radius: 0.4,
            half_height: 0.9,
        };
        let (bottom, top) = capsule.segment(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(bottom, Vec3::new(1.0, 0.4, 0.0));
        assert!((top.y - 1.4).abs() < 1e-6);
        assert_eq!(capsule.center(Vec3::ZERO), Vec3::new(0.0, 0.9, 0.0));
    }
}
