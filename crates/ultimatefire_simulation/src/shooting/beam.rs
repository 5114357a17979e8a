//! Beam end: where a shot from the muzzle actually lands

use bevy::prelude::*;

use crate::character::trace_under_crosshairs;
use crate::components::FollowCamera;
use crate::config::CameraConfig;
use crate::physics::{CollisionChannel, LineTrace, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamEnd {
    pub location: Vec3,
    pub hit: Option<Entity>,
}

/// Crosshair trace first, then a muzzle trace toward its end
///
/// Anything between the muzzle and the crosshair target stops the beam
/// early. None when the crosshair cannot be deprojected.
pub fn beam_end_location<T: LineTrace + ?Sized>(
    tracer: &T,
    viewport: &Viewport,
    camera: &FollowCamera,
    fov: f32,
    config: &CameraConfig,
    muzzle: Vec3,
    ignore: &[Entity],
) -> Option<BeamEnd> {
    let crosshair = trace_under_crosshairs(tracer, viewport, camera, fov, config, ignore)?;

    let beam = match tracer.line_trace(muzzle, crosshair.end, CollisionChannel::Visibility, ignore) {
        Some(hit) => BeamEnd {
            location: hit.location,
            hit: Some(hit.entity),
        },
        None => BeamEnd {
            location: crosshair.end,
            hit: crosshair.hit.map(|hit| hit.entity),
        },
    };
    Some(beam)
}
