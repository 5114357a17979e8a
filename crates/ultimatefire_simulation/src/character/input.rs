//! ShooterInput → aim, look, movement
//!
//! Sign conventions: positive `turn`/`turn_rate` turns right (yaw
//! decreases), positive `look_up`/`look_up_rate` looks up.

use bevy::prelude::*;

use super::components::{Aiming, LookRates, ShooterCharacter};
use crate::components::{ControlRotation, MovementInput, ShooterInput};

/// Aim button edges → `Aiming`
pub fn apply_aim_input(mut query: Query<(&ShooterInput, &mut Aiming)>) {
    for (input, mut aiming) in query.iter_mut() {
        if input.aim.just_pressed() {
            aiming.0 = true;
        }
        if input.aim.just_released() {
            aiming.0 = false;
        }
    }
}

/// Base look rates follow the aim state
pub fn set_look_rates(mut query: Query<(&Aiming, &mut LookRates)>) {
    for (aiming, mut rates) in query.iter_mut() {
        rates.set_for(aiming.0);
    }
}

/// Gamepad rates (deg/s × Δt) and mouse deltas (× scale) → control rotation
pub fn apply_look_input(
    mut query: Query<(&ShooterInput, &LookRates, &Aiming, &mut ControlRotation)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (input, rates, aiming, mut rotation) in query.iter_mut() {
        if input.turn_rate != 0.0 {
            rotation.add_yaw(-input.turn_rate * rates.base_turn_rate * delta);
        }
        if input.look_up_rate != 0.0 {
            rotation.add_pitch(input.look_up_rate * rates.base_look_up_rate * delta);
        }

        let (turn_scale, look_up_scale) = rates.mouse_scale(aiming.0);
        if input.turn != 0.0 {
            rotation.add_yaw(-input.turn * turn_scale);
        }
        if input.look_up != 0.0 {
            rotation.add_pitch(input.look_up * look_up_scale);
        }
    }
}

/// Movement axes along the control yaw (pitch ignored) + jump
pub fn apply_move_input(mut query: Query<(&ShooterInput, &ControlRotation, &mut MovementInput)>) {
    for (input, rotation, mut movement) in query.iter_mut() {
        if input.forward != 0.0 {
            movement.add(rotation.forward(), input.forward);
        }
        if input.right != 0.0 {
            movement.add(rotation.right(), input.right);
        }
        movement.jump = input.jump.held();
    }
}

/// The character body turns with the controller yaw
pub fn face_control_yaw(mut query: Query<(&ControlRotation, &mut Transform), With<ShooterCharacter>>) {
    for (rotation, mut transform) in query.iter_mut() {
        transform.rotation = rotation.yaw_quat();
    }
}

/// End of tick: drop button edges and mouse deltas
pub fn clear_input_edges(mut query: Query<&mut ShooterInput>) {
    for mut input in query.iter_mut() {
        input.end_tick();
    }
}
