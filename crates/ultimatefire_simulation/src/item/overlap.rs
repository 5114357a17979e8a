//! Area sphere overlaps (item ↔ character capsule).

use bevy::prelude::*;

use super::components::AreaSphere;
use super::events::{ItemAreaEntered, ItemAreaExited};
use crate::character::{CharacterCapsule, ShooterCharacter};
use crate::physics::CollisionChannel;

/// Sphere vs vertical capsule standing at `feet`
pub fn sphere_overlaps_capsule(center: Vec3, radius: f32, feet: Vec3, capsule: &CharacterCapsule) -> bool {
    let (bottom, top) = capsule.segment(feet);
    let axis = top - bottom;
    let t = if axis.length_squared() > 0.0 {
        ((center - bottom).dot(axis) / axis.length_squared()).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = bottom + axis * t;
    closest.distance(center) <= radius + capsule.radius
}

/// System: begin/end overlap events for every area sphere
///
/// A sphere that stops overlapping Pawn (state change) ends all its overlaps.
pub fn detect_area_overlaps(
    mut items: Query<(Entity, &Transform, &mut AreaSphere), Without<ShooterCharacter>>,
    characters: Query<(Entity, &Transform, &CharacterCapsule), With<ShooterCharacter>>,
    mut entered: EventWriter<ItemAreaEntered>,
    mut exited: EventWriter<ItemAreaExited>,
) {
    for (item, transform, mut area) in items.iter_mut() {
        let mut current: Vec<Entity> = if area.collision.overlaps(CollisionChannel::Pawn) {
            characters
                .iter()
                .filter(|(_, character_transform, capsule)| {
                    sphere_overlaps_capsule(
                        transform.translation,
                        area.radius,
                        character_transform.translation,
                        capsule,
                    )
                })
                .map(|(character, _, _)| character)
                .collect()
        } else {
            Vec::new()
        };
        current.sort();

        if current == area.overlapping {
            continue;
        }

        for character in current.iter().filter(|c| !area.overlapping.contains(c)) {
            entered.write(ItemAreaEntered {
                item,
                character: *character,
            });
        }
        for character in area.overlapping.iter().filter(|c| !current.contains(c)) {
            exited.write(ItemAreaExited {
                item,
                character: *character,
            });
        }

        area.overlapping = current;
    }
}
