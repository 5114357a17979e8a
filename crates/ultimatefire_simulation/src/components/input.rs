//! Per-tick input state for a shooter character.
//!
//! The host (windowed client, headless script, tests) writes axis values and
//! presses/releases buttons. Simulation systems read them in FixedUpdate and
//! `clear_input_edges` drops edges + mouse deltas at the end of each tick.

use bevy::prelude::*;

/// Action button with latched edges
///
/// Edges survive until the simulation ticks, so a tap shorter than one
/// fixed step is still seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct ButtonState {
    held: bool,
    pressed: bool,
    released: bool,
}

impl ButtonState {
    pub fn press(&mut self) {
        if !self.held {
            self.pressed = true;
        }
        self.held = true;
    }

    pub fn release(&mut self) {
        if self.held {
            self.released = true;
        }
        self.held = false;
    }

    /// Level-style update (press on true, release on false)
    pub fn set(&mut self, held: bool) {
        if held {
            self.press();
        } else {
            self.release();
        }
    }

    pub fn held(&self) -> bool {
        self.held
    }

    pub fn just_pressed(&self) -> bool {
        self.pressed
    }

    pub fn just_released(&self) -> bool {
        self.released
    }

    pub fn clear_edges(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

/// Input bindings of a shooter character
///
/// Axes:
/// - `forward` / `right`: movement, [-1, 1], level
/// - `turn_rate` / `look_up_rate`: gamepad stick, [-1, 1], level (scaled by deg/s rates)
/// - `turn` / `look_up`: mouse deltas, accumulated until the next tick
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ShooterInput {
    pub forward: f32,
    pub right: f32,
    pub turn_rate: f32,
    pub look_up_rate: f32,
    pub turn: f32,
    pub look_up: f32,

    pub jump: ButtonState,
    pub fire: ButtonState,
    pub aim: ButtonState,
    pub select: ButtonState,
    pub drop: ButtonState,
}

impl ShooterInput {
    pub fn add_mouse_delta(&mut self, turn: f32, look_up: f32) {
        self.turn += turn;
        self.look_up += look_up;
    }

    /// End of tick: edges and mouse deltas are consumed
    pub fn end_tick(&mut self) {
        self.turn = 0.0;
        self.look_up = 0.0;
        for button in [
            &mut self.jump,
            &mut self.fire,
            &mut self.aim,
            &mut self.select,
            &mut self.drop,
        ] {
            button.clear_edges();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_latches_edge_once() {
        let mut button = ButtonState::default();
        button.press();
        button.press();
        assert!(button.held());
        assert!(button.just_pressed());

        button.clear_edges();
        assert!(button.held());
        assert!(!button.just_pressed());
    }

    #[test]
    fn test_tap_within_one_tick_keeps_both_edges() {
        let mut button = ButtonState::default();
        button.press();
        button.release();
        assert!(!button.held());
        assert!(button.just_pressed());
        assert!(button.just_released());
    }

    #[test]
    fn test_release_without_press_is_silent() {
        let mut button = ButtonState::default();
        button.release();
        assert!(!button.just_released());
    }

    #[test]
    fn test_end_tick_clears_mouse_and_edges() {
        let mut input = ShooterInput::default();
        input.add_mouse_delta(3.0, -1.0);
        input.fire.press();
        input.forward = 1.0;

        input.end_tick();

        assert_eq!(input.turn, 0.0);
        assert_eq!(input.look_up, 0.0);
        assert!(input.fire.held());
        assert!(!input.fire.just_pressed());
        assert_eq!(input.forward, 1.0);
    }
}
