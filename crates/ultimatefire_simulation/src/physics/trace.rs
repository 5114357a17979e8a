//! Line traces + screen deprojection.
//!
//! `LineTrace` is the seam between gameplay (beam end, item tracing) and
//! whatever answers ray queries. The simulation ships `SceneTracer`, which
//! walks `TraceShape` components. Tests can trace against plain slices.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::collision::{CollisionChannel, CollisionSettings};

/// Traceable shape, centred on the entity's `Transform`
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ShapeKind {
    Sphere { radius: f32 },
    /// Oriented box (uses transform rotation)
    Box { half_extents: Vec3 },
}

/// Shape + collision preset seen by line traces
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TraceShape {
    pub kind: ShapeKind,
    pub collision: CollisionSettings,
}

impl TraceShape {
    pub fn sphere(radius: f32, collision: CollisionSettings) -> Self {
        Self {
            kind: ShapeKind::Sphere { radius },
            collision,
        }
    }

    pub fn cuboid(half_extents: Vec3, collision: CollisionSettings) -> Self {
        Self {
            kind: ShapeKind::Box { half_extents },
            collision,
        }
    }

    /// Distance along `direction` (unit) from `origin` to the first surface
    /// point, or 0 when `origin` starts inside.
    pub fn ray_distance(&self, transform: &Transform, origin: Vec3, direction: Vec3) -> Option<f32> {
        match self.kind {
            ShapeKind::Sphere { radius } => ray_sphere(origin, direction, transform.translation, radius),
            ShapeKind::Box { half_extents } => {
                let inverse = transform.rotation.inverse();
                let local_origin = inverse * (origin - transform.translation);
                let local_direction = inverse * direction;
                ray_box(local_origin, local_direction, half_extents)
            }
        }
    }
}

/// Nearest blocking hit of a trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub entity: Entity,
    pub location: Vec3,
    pub distance: f32,
}

pub trait LineTrace {
    /// First shape blocking `channel` on the segment `start..end`,
    /// skipping `ignore`.
    fn line_trace(
        &self,
        start: Vec3,
        end: Vec3,
        channel: CollisionChannel,
        ignore: &[Entity],
    ) -> Option<TraceHit>;
}

/// Trace over any set of shapes
pub fn trace_shapes<'a>(
    shapes: impl IntoIterator<Item = (Entity, &'a Transform, &'a TraceShape)>,
    start: Vec3,
    end: Vec3,
    channel: CollisionChannel,
    ignore: &[Entity],
) -> Option<TraceHit> {
    let segment = end - start;
    let length = segment.length();
    let direction = segment.try_normalize()?;

    shapes
        .into_iter()
        .filter(|(entity, _, shape)| shape.collision.blocks(channel) && !ignore.contains(entity))
        .filter_map(|(entity, transform, shape)| {
            let distance = shape.ray_distance(transform, start, direction)?;
            (distance <= length).then(|| TraceHit {
                entity,
                location: start + direction * distance,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

impl LineTrace for [(Entity, Transform, TraceShape)] {
    fn line_trace(
        &self,
        start: Vec3,
        end: Vec3,
        channel: CollisionChannel,
        ignore: &[Entity],
    ) -> Option<TraceHit> {
        trace_shapes(
            self.iter().map(|(entity, transform, shape)| (*entity, transform, shape)),
            start,
            end,
            channel,
            ignore,
        )
    }
}

/// ECS-backed tracer over every `TraceShape` in the world
#[derive(SystemParam)]
pub struct SceneTracer<'w, 's> {
    shapes: Query<'w, 's, (Entity, &'static Transform, &'static TraceShape)>,
}

impl LineTrace for SceneTracer<'_, '_> {
    fn line_trace(
        &self,
        start: Vec3,
        end: Vec3,
        channel: CollisionChannel,
        ignore: &[Entity],
    ) -> Option<TraceHit> {
        trace_shapes(self.shapes.iter(), start, end, channel, ignore)
    }
}

fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = origin - center;
    let c = to_origin.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = to_origin.dot(direction);
    if b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some(-b - discriminant.sqrt())
}

/// Slab test in box-local space
fn ray_box(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let extent = half_extents[axis];

        if d.abs() < 1.0e-8 {
            if o < -extent || o > extent {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (-extent - o) * inv;
        let mut t1 = (extent - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

// ============================================================================
// Deprojection
// ============================================================================

/// Game viewport size in pixels (resource)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Viewport {
    /// Crosshair position: centre, raised by `offset` pixels
    pub fn crosshair(&self, offset: f32) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0 - offset)
    }
}

/// World-space ray through a screen point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Screen point (pixels, origin top-left) → world ray from a perspective
/// camera with horizontal field of view `fov_degrees`.
///
/// Fails for an empty viewport or a degenerate field of view.
pub fn deproject_screen_to_world(
    screen: Vec2,
    viewport: &Viewport,
    camera_position: Vec3,
    camera_rotation: Quat,
    fov_degrees: f32,
) -> Option<WorldRay> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
        return None;
    }

    let ndc_x = 2.0 * screen.x / viewport.width - 1.0;
    let ndc_y = 1.0 - 2.0 * screen.y / viewport.height;

    let tan_half_h = (fov_degrees.to_radians() / 2.0).tan();
    let tan_half_v = tan_half_h * viewport.height / viewport.width;

    let local = Vec3::new(ndc_x * tan_half_h, ndc_y * tan_half_v, -1.0);
    let direction = (camera_rotation * local).try_normalize()?;

    Some(WorldRay {
        origin: camera_position,
        direction,
    })
}
