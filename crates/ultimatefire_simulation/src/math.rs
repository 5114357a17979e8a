//! Scalar helpers shared by camera, crosshair and item interpolation.

use bevy::prelude::*;
use serde::Deserialize;

const SMALL_NUMBER: f32 = 1.0e-8;

/// Eases `current` toward `target`: each call covers `delta * speed` of the
/// remaining distance (clamped to the whole distance).
///
/// `speed <= 0` snaps to the target.
pub fn finterp_to(current: f32, target: f32, delta: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance * distance < SMALL_NUMBER {
        return target;
    }

    current + distance * (delta * speed).clamp(0.0, 1.0)
}

/// Maps `value` from `input` range onto `output` range, clamped to `output`.
pub fn map_range_clamped(input: Vec2, output: Vec2, value: f32) -> f32 {
    let width = input.y - input.x;
    if width.abs() < SMALL_NUMBER {
        return if value >= input.y { output.y } else { output.x };
    }

    let pct = ((value - input.x) / width).clamp(0.0, 1.0);
    output.x + (output.y - output.x) * pct
}

/// Wraps an angle in degrees into (-180, 180].
pub fn normalize_axis(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Rotates `vector` by `degrees` around `axis` (right-handed).
pub fn rotate_angle_axis(vector: Vec3, degrees: f32, axis: Vec3) -> Vec3 {
    let Some(axis) = axis.try_normalize() else {
        return vector;
    };
    Quat::from_axis_angle(axis, degrees.to_radians()) * vector
}

/// Heading of a horizontal direction in degrees, matching `ControlRotation`
/// yaw (0 = -Z, positive turns toward -X).
pub fn yaw_of(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z).to_degrees()
}

/// One key of a [`FloatCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Reflect)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise-linear float curve, clamped at both ends.
///
/// Keys are kept sorted by time.
#[derive(Debug, Clone, PartialEq, Deserialize, Reflect)]
#[serde(from = "Vec<(f32, f32)>")]
pub struct FloatCurve {
    keys: Vec<CurveKey>,
}

impl From<Vec<(f32, f32)>> for FloatCurve {
    fn from(keys: Vec<(f32, f32)>) -> Self {
        Self::new(keys)
    }
}

impl FloatCurve {
    pub fn new(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: Vec<CurveKey> = keys
            .into_iter()
            .map(|(time, value)| CurveKey { time, value })
            .collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Rise from 0, overshoot, settle at 1 by 0.7 s.
    pub fn item_height() -> Self {
        Self::new([(0.0, 0.0), (0.2, 0.6), (0.45, 1.15), (0.7, 1.0)])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Value at `time`. An empty curve evaluates to 0.
    pub fn value(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if time <= b.time {
                let span = b.time - a.time;
                if span <= SMALL_NUMBER {
                    return b.value;
                }
                let alpha = (time - a.time) / span;
                return a.value + (b.value - a.value) * alpha;
            }
        }
        last.value
    }
}
