//! Follow camera pose, zoom and the crosshair ray

use bevy::prelude::*;

use super::components::{Aiming, CharacterCapsule};
use crate::components::{CameraBoom, CameraZoom, ControlRotation, FollowCamera};
use crate::config::CameraConfig;
use crate::math::finterp_to;
use crate::physics::{deproject_screen_to_world, CollisionChannel, LineTrace, TraceHit, Viewport};

/// Camera pose from the boom, pivoting on the capsule centre
pub fn update_follow_camera(
    mut query: Query<(&Transform, &CharacterCapsule, &ControlRotation, &CameraBoom, &mut FollowCamera)>,
) {
    for (transform, capsule, rotation, boom, mut camera) in query.iter_mut() {
        *camera = boom.camera_pose(capsule.center(transform.translation), rotation.quat());
    }
}

/// Eases the field of view toward zoomed (aiming) or default
pub fn calculate_and_set_fov(mut query: Query<(&Aiming, &mut CameraZoom)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (aiming, mut zoom) in query.iter_mut() {
        let target = zoom.target(aiming.0);
        zoom.current_fov = finterp_to(zoom.current_fov, target, delta, zoom.interp_speed);
    }
}

/// Result of a trace under the crosshair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrosshairTrace {
    /// Hit location, or the end of the trace
    pub end: Vec3,
    pub hit: Option<TraceHit>,
}

/// Traces `trace_distance` along the crosshair ray on Visibility
///
/// The crosshair sits `crosshair_screen_offset` px above the viewport
/// centre. Fails when the screen point cannot be deprojected.
pub fn trace_under_crosshairs<T: LineTrace + ?Sized>(
    tracer: &T,
    viewport: &Viewport,
    camera: &FollowCamera,
    fov: f32,
    config: &CameraConfig,
    ignore: &[Entity],
) -> Option<CrosshairTrace> {
    let screen = viewport.crosshair(config.crosshair_screen_offset);
    let ray = deproject_screen_to_world(screen, viewport, camera.position, camera.rotation, fov)?;

    let start = ray.origin;
    let end = start + ray.direction * config.trace_distance;
    let hit = tracer.line_trace(start, end, CollisionChannel::Visibility, ignore);

    Some(CrosshairTrace {
        end: hit.map_or(end, |hit| hit.location),
        hit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{CollisionEnabled, CollisionResponse, CollisionSettings, TraceShape};

    #[test]
    fn test_miss_ends_at_trace_distance() {
        let scene: Vec<(Entity, Transform, TraceShape)> = Vec::new();
        let config = CameraConfig::default();
        let camera = FollowCamera::default();

        let trace =
            trace_under_crosshairs(scene.as_slice(), &Viewport::default(), &camera, 90.0, &config, &[]).unwrap();
        assert!(trace.hit.is_none());
        assert!((trace.end.length() - config.trace_distance).abs() < 1e-2);
    }

    #[test]
    fn test_hit_replaces_end() {
        let wall = Entity::from_raw(3);
        let scene = vec![(
            wall,
            Transform::from_xyz(0.0, 0.0, -10.0),
            TraceShape::cuboid(
                Vec3::new(50.0, 50.0, 0.5),
                CollisionSettings::only(
                    CollisionEnabled::QueryAndPhysics,
                    CollisionChannel::Visibility,
                    CollisionResponse::Block,
                ),
            ),
        )];

        let trace = trace_under_crosshairs(
            scene.as_slice(),
            &Viewport::default(),
            &FollowCamera::default(),
            90.0,
            &CameraConfig::default(),
            &[],
        )
        .unwrap();
        assert_eq!(trace.hit.map(|hit| hit.entity), Some(wall));
        assert!((trace.end.z + 9.5).abs() < 1e-3);
    }

    #[test]
    fn test_empty_viewport_fails() {
        let scene: Vec<(Entity, Transform, TraceShape)> = Vec::new();
        let viewport = Viewport {
            width: 0.0,
            height: 0.0,
        };
        assert!(trace_under_crosshairs(
            scene.as_slice(),
            &viewport,
            &FollowCamera::default(),
            90.0,
            &CameraConfig::default(),
            &[],
        )
        .is_none());
    }
}
