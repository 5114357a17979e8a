use bevy::input::gamepad::{Gamepad, GamepadAxis, GamepadButton};
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use ultimatefire_simulation::{Player, ShooterInput};

/// Degrees of control rotation per pixel of mouse motion (before the
/// hip/aim mouse scale)
const MOUSE_DEGREES_PER_PIXEL: f32 = 0.15;

/// Stick values below this are treated as zero
const STICK_DEAD_ZONE: f32 = 0.15;

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, gather_player_input);
    }
}

/// Keyboard + mouse and the first gamepad → player's ShooterInput
///
/// Axes are levels (overwritten every frame), mouse motion accumulates and
/// buttons are pressed/released on edges. The simulation consumes the
/// accumulated state on its next fixed step.
fn gather_player_input(
    mut query: Query<&mut ShooterInput, With<Player>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    gamepads: Query<&Gamepad>,
) {
    let Ok(mut input) = query.single_mut() else {
        mouse_motion.clear();
        return;
    };

    let axis = |positive: KeyCode, negative: KeyCode| -> f32 {
        let mut value = 0.0;
        if keyboard.pressed(positive) {
            value += 1.0;
        }
        if keyboard.pressed(negative) {
            value -= 1.0;
        }
        value
    };
    let mut forward = axis(KeyCode::KeyW, KeyCode::KeyS);
    let mut right = axis(KeyCode::KeyD, KeyCode::KeyA);
    let mut turn_rate = 0.0;
    let mut look_up_rate = 0.0;

    for motion in mouse_motion.read() {
        // Screen y grows downward
        input.add_mouse_delta(
            motion.delta.x * MOUSE_DEGREES_PER_PIXEL,
            -motion.delta.y * MOUSE_DEGREES_PER_PIXEL,
        );
    }

    let gamepad = gamepads.iter().next();
    if let Some(gamepad) = gamepad {
        let stick = |axis: GamepadAxis| -> f32 {
            let value = gamepad.get(axis).unwrap_or(0.0);
            if value.abs() < STICK_DEAD_ZONE {
                0.0
            } else {
                value
            }
        };
        forward = (forward + stick(GamepadAxis::LeftStickY)).clamp(-1.0, 1.0);
        right = (right + stick(GamepadAxis::LeftStickX)).clamp(-1.0, 1.0);
        turn_rate = stick(GamepadAxis::RightStickX);
        look_up_rate = stick(GamepadAxis::RightStickY);
    }

    input.forward = forward;
    input.right = right;
    input.turn_rate = turn_rate;
    input.look_up_rate = look_up_rate;

    let pad_held = |button: GamepadButton| gamepad.is_some_and(|gamepad| gamepad.pressed(button));

    let jump = keyboard.pressed(KeyCode::Space) || pad_held(GamepadButton::South);
    let fire = mouse_buttons.pressed(MouseButton::Left) || pad_held(GamepadButton::RightTrigger2);
    let aim = mouse_buttons.pressed(MouseButton::Right) || pad_held(GamepadButton::LeftTrigger2);
    let select = keyboard.pressed(KeyCode::KeyE) || pad_held(GamepadButton::West);
    let drop = keyboard.pressed(KeyCode::KeyQ) || pad_held(GamepadButton::East);

    // ButtonState only records an edge when the level changes
    input.jump.set(jump);
    input.fire.set(fire);
    input.aim.set(aim);
    input.select.set(select);
    input.drop.set(drop);
}
