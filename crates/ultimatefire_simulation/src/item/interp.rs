//! Item curve toward the camera after pickup.
//!
//! Height follows `items.height_curve` scaled by the vertical distance to the
//! camera target; x/z ease toward the target. When the `z_curve_time` timer
//! runs out the item is handed to the character.

use bevy::prelude::*;

use super::components::{Item, ItemState};
use super::events::{ItemInterpFinished, ItemPickupStarted};
use crate::components::{FollowCamera, ItemCameraTarget};
use crate::config::ShooterConfig;
use crate::math::finterp_to;

/// Active item curve
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ItemInterp {
    pub character: Entity,
    pub start_location: Vec3,
    pub timer: Timer,
}

/// Starts the pickup curve of `item` toward `character`
///
/// Only items lying in the world (`Pickup`) can start; returns whether it did.
pub fn start_item_curve(
    commands: &mut Commands,
    item_entity: Entity,
    item: &mut Item,
    location: Vec3,
    character: Entity,
    curve_time: f32,
    started: &mut EventWriter<ItemPickupStarted>,
) -> bool {
    if item.state() != ItemState::Pickup {
        return false;
    }

    item.set_state(ItemState::EquipInterping);
    commands.entity(item_entity).insert(ItemInterp {
        character,
        start_location: location,
        timer: Timer::from_seconds(curve_time, TimerMode::Once),
    });
    started.write(ItemPickupStarted {
        item: item_entity,
        character,
    });

    crate::log(&format!(
        "Item {:?} curving toward character {:?} ({:.2}s)",
        item_entity, character, curve_time
    ));
    true
}

/// Height at `elapsed` along the curve from `start_y` to `target_y`
pub fn curve_height(start_y: f32, target_y: f32, curve_value: f32) -> f32 {
    start_y + curve_value * (target_y - start_y).abs()
}

/// System: move interping items, finish when the timer runs out
pub fn item_interp(
    mut commands: Commands,
    mut items: Query<(Entity, &mut Item, &mut Transform, &mut ItemInterp)>,
    characters: Query<(&FollowCamera, &ItemCameraTarget)>,
    config: Res<ShooterConfig>,
    time: Res<Time>,
    mut finished: EventWriter<ItemInterpFinished>,
) {
    let delta = time.delta_secs();

    for (entity, mut item, mut transform, mut interp) in items.iter_mut() {
        interp.timer.tick(time.delta());

        let Ok((camera, target)) = characters.get(interp.character) else {
            crate::log_warning(&format!(
                "Item {:?}: interp character {:?} is gone, back to pickup",
                entity, interp.character
            ));
            item.set_state(ItemState::Pickup);
            commands.entity(entity).remove::<ItemInterp>();
            continue;
        };

        let target_location = target.location(camera);
        let curve_value = config.items.height_curve.value(interp.timer.elapsed_secs());
        let speed = config.items.lateral_interp_speed;

        transform.translation = Vec3::new(
            finterp_to(transform.translation.x, target_location.x, delta, speed),
            curve_height(interp.start_location.y, target_location.y, curve_value),
            finterp_to(transform.translation.z, target_location.z, delta, speed),
        );

        if interp.timer.finished() {
            commands.entity(entity).remove::<ItemInterp>();
            finished.write(ItemInterpFinished {
                item: entity,
                character: interp.character,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_height_scales_by_vertical_distance() {
        assert_relative_eq!(curve_height(0.0, 2.0, 0.5), 1.0);
        assert_relative_eq!(curve_height(1.0, 3.0, 1.0), 3.0);
    }

    #[test]
    fn test_curve_height_always_rises() {
        // Camera target below the item: still offsets upward, like the height curve
        assert_relative_eq!(curve_height(3.0, 1.0, 0.5), 4.0);
    }
}
