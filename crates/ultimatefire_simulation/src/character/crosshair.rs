//! Crosshair spread
//!
//! multiplier = base + velocity + in_air − aim + shooting. Each factor eases
//! toward its target with `finterp_to`, except velocity which maps lateral
//! speed straight onto [0, 1].

use bevy::prelude::*;

use super::components::Aiming;
use crate::components::{KinematicController, PhysicsBody};
use crate::config::{CrosshairConfig, ShooterConfig};
use crate::math::{finterp_to, map_range_clamped};

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CrosshairSpread {
    pub velocity_factor: f32,
    pub in_air_factor: f32,
    pub aim_factor: f32,
    pub shooting_factor: f32,
    pub multiplier: f32,
}

/// Per-tick inputs of the spread calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadInputs {
    pub lateral_speed: f32,
    pub max_walk_speed: f32,
    pub in_air: bool,
    pub aiming: bool,
    pub firing: bool,
}

impl CrosshairSpread {
    pub fn update(&mut self, inputs: SpreadInputs, config: &CrosshairConfig, delta: f32) {
        self.velocity_factor = map_range_clamped(
            Vec2::new(0.0, inputs.max_walk_speed),
            Vec2::new(0.0, 1.0),
            inputs.lateral_speed,
        );

        self.in_air_factor = if inputs.in_air {
            finterp_to(self.in_air_factor, config.in_air_target, delta, config.in_air_interp_speed)
        } else {
            finterp_to(self.in_air_factor, 0.0, delta, config.landed_interp_speed)
        };

        let aim_target = if inputs.aiming { config.aim_target } else { 0.0 };
        self.aim_factor = finterp_to(self.aim_factor, aim_target, delta, config.aim_interp_speed);

        let shooting_target = if inputs.firing { config.shooting_target } else { 0.0 };
        self.shooting_factor = finterp_to(
            self.shooting_factor,
            shooting_target,
            delta,
            config.shooting_interp_speed,
        );

        self.multiplier = config.base_spread + self.velocity_factor + self.in_air_factor - self.aim_factor
            + self.shooting_factor;
    }
}

/// Short window after each shot that widens the crosshair
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct CrosshairFiring {
    firing: bool,
    timer: Timer,
}

impl Default for CrosshairFiring {
    fn default() -> Self {
        Self {
            firing: false,
            timer: Timer::from_seconds(CrosshairConfig::default().shoot_time_duration, TimerMode::Once),
        }
    }
}

impl CrosshairFiring {
    /// Restarts the window (called on every shot)
    pub fn start(&mut self, duration: f32) {
        self.firing = true;
        self.timer = Timer::from_seconds(duration, TimerMode::Once);
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        if !self.firing {
            return;
        }
        self.timer.tick(delta);
        if self.timer.finished() {
            self.firing = false;
        }
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }
}

/// System: crosshair spread for every character
pub fn calculate_crosshair_spread(
    mut query: Query<(
        &PhysicsBody,
        &KinematicController,
        &Aiming,
        &mut CrosshairFiring,
        &mut CrosshairSpread,
    )>,
    config: Res<ShooterConfig>,
    time: Res<Time>,
) {
    for (body, controller, aiming, mut firing, mut spread) in query.iter_mut() {
        firing.tick(time.delta());

        spread.update(
            SpreadInputs {
                lateral_speed: body.lateral_speed(),
                max_walk_speed: controller.max_walk_speed,
                in_air: controller.is_falling(),
                aiming: aiming.0,
                firing: firing.is_firing(),
            },
            &config.crosshair,
            time.delta_secs(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> SpreadInputs {
        SpreadInputs {
            lateral_speed: 0.0,
            max_walk_speed: 6.0,
            in_air: false,
            aiming: false,
            firing: false,
        }
    }

    #[test]
    fn test_idle_spread_is_base() {
        let mut spread = CrosshairSpread::default();
        spread.update(idle(), &CrosshairConfig::default(), DT);
        assert_relative_eq!(spread.multiplier, 0.5);
    }

    #[test]
    fn test_velocity_factor_maps_walk_speed() {
        let mut spread = CrosshairSpread::default();
        let config = CrosshairConfig::default();

        spread.update(SpreadInputs { lateral_speed: 3.0, ..idle() }, &config, DT);
        assert_relative_eq!(spread.velocity_factor, 0.5);

        spread.update(SpreadInputs { lateral_speed: 60.0, ..idle() }, &config, DT);
        assert_relative_eq!(spread.velocity_factor, 1.0);
        assert_relative_eq!(spread.multiplier, 1.5);
    }

    #[test]
    fn test_in_air_eases_slowly_and_recovers_fast() {
        let mut spread = CrosshairSpread::default();
        let config = CrosshairConfig::default();

        spread.update(SpreadInputs { in_air: true, ..idle() }, &config, DT);
        // 2.25 * (1/60 * 2.25)
        assert_relative_eq!(spread.in_air_factor, 2.25 * DT * 2.25, epsilon = 1e-5);

        for _ in 0..120 {
            spread.update(SpreadInputs { in_air: true, ..idle() }, &config, DT);
        }
        let airborne = spread.in_air_factor;
        assert!(airborne > 1.5 && airborne <= 2.25);

        for _ in 0..30 {
            spread.update(idle(), &config, DT);
        }
        assert!(spread.in_air_factor < 0.01);
    }

    #[test]
    fn test_aiming_tightens_spread() {
        let mut spread = CrosshairSpread::default();
        let config = CrosshairConfig::default();
        for _ in 0..60 {
            spread.update(SpreadInputs { aiming: true, ..idle() }, &config, DT);
        }
        assert_relative_eq!(spread.aim_factor, 0.6, epsilon = 1e-4);
        assert_relative_eq!(spread.multiplier, -0.1, epsilon = 1e-4);
    }

    #[test]
    fn test_shooting_widens_while_firing() {
        let mut spread = CrosshairSpread::default();
        let config = CrosshairConfig::default();
        for _ in 0..3 {
            spread.update(SpreadInputs { firing: true, ..idle() }, &config, DT);
        }
        assert!(spread.shooting_factor > 0.25);
        assert!(spread.multiplier > 0.75);
    }

    #[test]
    fn test_firing_window_expires() {
        let mut firing = CrosshairFiring::default();
        assert!(!firing.is_firing());

        firing.start(0.05);
        firing.tick(std::time::Duration::from_millis(30));
        assert!(firing.is_firing());
        firing.tick(std::time::Duration::from_millis(30));
        assert!(!firing.is_firing());
    }
}
