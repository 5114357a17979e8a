//! Fire button + automatic fire timer

use bevy::prelude::*;
use std::time::Duration;

/// Automatic fire state of a character
///
/// Pressing fire shoots at once if the previous interval is over, then the
/// timer re-fires every `automatic_fire_rate` seconds while fire is held.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct FireControl {
    pub fire_held: bool,
    pub should_fire: bool,
    timer: Option<Timer>,
}

impl Default for FireControl {
    fn default() -> Self {
        Self {
            fire_held: false,
            should_fire: true,
            timer: None,
        }
    }
}

impl FireControl {
    /// Fire pressed; true when a shot goes out now
    pub fn press(&mut self, fire_rate: f32) -> bool {
        self.fire_held = true;
        self.start_fire_timer(fire_rate)
    }

    pub fn release(&mut self) {
        self.fire_held = false;
    }

    /// Advances the interval timer; true when a held trigger re-fires
    pub fn tick(&mut self, delta: Duration, fire_rate: f32) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if !timer.finished() {
            return false;
        }

        self.auto_fire_reset(fire_rate)
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    fn start_fire_timer(&mut self, fire_rate: f32) -> bool {
        if !self.should_fire {
            return false;
        }
        self.should_fire = false;
        self.timer = Some(Timer::from_seconds(fire_rate, TimerMode::Once));
        true
    }

    fn auto_fire_reset(&mut self, fire_rate: f32) -> bool {
        self.timer = None;
        self.should_fire = true;
        if self.fire_held {
            self.start_fire_timer(fire_rate)
        } else {
            false
        }
    }
}
