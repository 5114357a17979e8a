//! Item tracing + pickup from the character side

use bevy::prelude::*;

use super::camera::trace_under_crosshairs;
use super::components::{OverlappedItems, ShooterCharacter, TracedItem};
use crate::components::{CameraZoom, FollowCamera, ShooterInput};
use crate::config::ShooterConfig;
use crate::item::{
    start_item_curve, Item, ItemAreaEntered, ItemAreaExited, ItemPickupStarted, ItemState, PickupWidget,
};
use crate::physics::{SceneTracer, Viewport};

/// Area sphere events → overlapped item count
pub fn update_overlapped_items(
    mut entered: EventReader<ItemAreaEntered>,
    mut exited: EventReader<ItemAreaExited>,
    mut characters: Query<&mut OverlappedItems>,
) {
    let changes = entered
        .read()
        .map(|event| (event.character, 1))
        .chain(exited.read().map(|event| (event.character, -1)));

    for (character, amount) in changes {
        if let Ok(mut overlapped) = characters.get_mut(character) {
            overlapped.increment(amount);
        }
    }
}

/// Shows the pickup widget of the item under the crosshair
///
/// Runs only while the character overlaps at least one item. The widget of
/// the previously traced item is hidden as soon as it is no longer traced.
/// Items already flying toward a camera are not traced.
pub fn trace_for_items(
    mut characters: Query<
        (&OverlappedItems, &FollowCamera, &CameraZoom, &mut TracedItem),
        With<ShooterCharacter>,
    >,
    mut items: Query<(&Item, &mut PickupWidget)>,
    tracer: SceneTracer,
    viewport: Res<Viewport>,
    config: Res<ShooterConfig>,
) {
    for (overlapped, camera, zoom, mut traced) in characters.iter_mut() {
        let hit_item = if overlapped.should_trace() {
            trace_under_crosshairs(&tracer, &viewport, camera, zoom.current_fov, &config.camera, &[])
                .and_then(|trace| trace.hit)
                .map(|hit| hit.entity)
                .filter(|entity| {
                    items
                        .get(*entity)
                        .is_ok_and(|(item, _)| item.state() != ItemState::EquipInterping)
                })
        } else {
            None
        };

        if let Some(previous) = traced.0.filter(|previous| Some(*previous) != hit_item) {
            if let Ok((_, mut widget)) = items.get_mut(previous) {
                widget.visible = false;
            }
        }
        if let Some(current) = hit_item {
            if let Ok((_, mut widget)) = items.get_mut(current) {
                widget.visible = true;
            }
        }

        if traced.0 != hit_item {
            traced.0 = hit_item;
        }
    }
}

/// Select button: start the pickup curve of the traced item
pub fn select_button_pressed(
    mut commands: Commands,
    characters: Query<(Entity, &ShooterInput, &TracedItem), With<ShooterCharacter>>,
    mut items: Query<(&mut Item, &Transform), Without<ShooterCharacter>>,
    config: Res<ShooterConfig>,
    mut started: EventWriter<ItemPickupStarted>,
) {
    for (character, input, traced) in characters.iter() {
        if !input.select.just_pressed() {
            continue;
        }
        let Some(item_entity) = traced.0 else {
            continue;
        };
        let Ok((mut item, transform)) = items.get_mut(item_entity) else {
            continue;
        };

        start_item_curve(
            &mut commands,
            item_entity,
            &mut item,
            transform.translation,
            character,
            config.items.z_curve_time,
            &mut started,
        );
    }
}
