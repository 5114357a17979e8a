//! Item state → part properties (collision presets, physics, visibility).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{AreaSphere, Item, ItemMesh, ItemState, PickupWidget};
use crate::physics::{
    CollisionChannel, CollisionEnabled, CollisionResponse, CollisionSettings, TraceShape,
};

/// Property preset for one item state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemProperties {
    pub simulate_physics: bool,
    pub mesh_visible: bool,
    pub mesh_collision: CollisionSettings,
    pub area_collision: CollisionSettings,
    pub box_collision: CollisionSettings,
    /// `Some(false)` hides the widget, `None` leaves it alone
    pub widget_visible: Option<bool>,
}

fn area_overlap_all() -> CollisionSettings {
    CollisionSettings::all(CollisionEnabled::QueryOnly, CollisionResponse::Overlap)
}

fn box_blocks_visibility() -> CollisionSettings {
    CollisionSettings::only(
        CollisionEnabled::QueryAndPhysics,
        CollisionChannel::Visibility,
        CollisionResponse::Block,
    )
}

impl ItemProperties {
    pub fn for_state(state: ItemState) -> Self {
        match state {
            ItemState::Pickup => Self {
                simulate_physics: false,
                mesh_visible: true,
                mesh_collision: CollisionSettings::DISABLED,
                area_collision: area_overlap_all(),
                box_collision: box_blocks_visibility(),
                widget_visible: None,
            },
            ItemState::EquipInterping => Self {
                simulate_physics: false,
                mesh_visible: true,
                mesh_collision: CollisionSettings::DISABLED,
                area_collision: area_overlap_all(),
                box_collision: box_blocks_visibility(),
                widget_visible: Some(false),
            },
            ItemState::PickedUp => Self {
                simulate_physics: false,
                mesh_visible: false,
                mesh_collision: CollisionSettings::DISABLED,
                area_collision: CollisionSettings::DISABLED,
                box_collision: CollisionSettings::DISABLED,
                widget_visible: Some(false),
            },
            ItemState::Equipped => Self {
                simulate_physics: false,
                mesh_visible: true,
                mesh_collision: CollisionSettings::DISABLED,
                area_collision: CollisionSettings::DISABLED,
                box_collision: CollisionSettings::DISABLED,
                widget_visible: Some(false),
            },
            ItemState::Falling => Self {
                simulate_physics: true,
                mesh_visible: true,
                mesh_collision: CollisionSettings::only(
                    CollisionEnabled::QueryAndPhysics,
                    CollisionChannel::WorldStatic,
                    CollisionResponse::Block,
                ),
                area_collision: area_overlap_all(),
                box_collision: box_blocks_visibility(),
                widget_visible: None,
            },
        }
    }

    pub fn apply(
        &self,
        mesh: &mut ItemMesh,
        area: &mut AreaSphere,
        collision_box: &mut TraceShape,
        widget: &mut PickupWidget,
    ) {
        mesh.simulate_physics = self.simulate_physics;
        mesh.enable_gravity = self.simulate_physics;
        mesh.visible = self.mesh_visible;
        mesh.collision = self.mesh_collision;
        area.collision = self.area_collision;
        collision_box.collision = self.box_collision;
        if let Some(visible) = self.widget_visible {
            widget.visible = visible;
        }
    }
}

/// System: apply the property preset of every item whose state may have changed
pub fn apply_item_properties(
    mut items: Query<
        (&Item, &mut ItemMesh, &mut AreaSphere, &mut TraceShape, &mut PickupWidget),
        Changed<Item>,
    >,
) {
    for (item, mut mesh, mut area, mut collision_box, mut widget) in items.iter_mut() {
        ItemProperties::for_state(item.state()).apply(
            &mut mesh,
            &mut area,
            &mut collision_box,
            &mut widget,
        );
    }
}

/// System: mirror mesh presets onto Rapier components
pub fn sync_item_rapier(
    mut items: Query<(&ItemMesh, &mut RigidBody, &mut GravityScale, &mut CollisionGroups), Changed<ItemMesh>>,
) {
    for (mesh, mut body, mut gravity, mut groups) in items.iter_mut() {
        *body = if mesh.simulate_physics {
            RigidBody::Dynamic
        } else {
            RigidBody::KinematicPositionBased
        };
        gravity.0 = if mesh.enable_gravity { 1.0 } else { 0.0 };
        *groups = mesh.collision.collision_groups(CollisionChannel::WorldStatic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_is_traceable_and_overlappable() {
        let props = ItemProperties::for_state(ItemState::Pickup);
        assert!(!props.simulate_physics);
        assert!(props.box_collision.blocks(CollisionChannel::Visibility));
        assert!(props.area_collision.overlaps(CollisionChannel::Pawn));
        assert!(!props.mesh_collision.is_enabled());
        assert_eq!(props.widget_visible, None);
    }

    #[test]
    fn test_equipped_disables_everything() {
        let props = ItemProperties::for_state(ItemState::Equipped);
        assert!(!props.area_collision.is_enabled());
        assert!(!props.box_collision.is_enabled());
        assert!(!props.mesh_collision.is_enabled());
        assert!(props.mesh_visible);
        assert_eq!(props.widget_visible, Some(false));
    }

    #[test]
    fn test_falling_simulates_and_hits_world() {
        let props = ItemProperties::for_state(ItemState::Falling);
        assert!(props.simulate_physics);
        assert!(props.mesh_collision.blocks(CollisionChannel::WorldStatic));
        assert!(!props.mesh_collision.blocks(CollisionChannel::Pawn));
        assert!(props.area_collision.overlaps(CollisionChannel::Pawn));
    }

    #[test]
    fn test_equip_interping_hides_widget_but_keeps_box() {
        let props = ItemProperties::for_state(ItemState::EquipInterping);
        assert_eq!(props.widget_visible, Some(false));
        assert!(props.box_collision.blocks(CollisionChannel::Visibility));
    }

    #[test]
    fn test_picked_up_is_invisible() {
        let props = ItemProperties::for_state(ItemState::PickedUp);
        assert!(!props.mesh_visible);
        assert!(!props.area_collision.is_enabled());
    }

    #[test]
    fn test_apply_leaves_widget_when_unspecified() {
        let mut mesh = ItemMesh::default();
        let mut area = AreaSphere::default();
        let mut collision_box = TraceShape::cuboid(Vec3::ONE, CollisionSettings::DISABLED);
        let mut widget = PickupWidget { visible: true };

        ItemProperties::for_state(ItemState::Pickup).apply(&mut mesh, &mut area, &mut collision_box, &mut widget);
        assert!(widget.visible);

        ItemProperties::for_state(ItemState::Falling).apply(&mut mesh, &mut area, &mut collision_box, &mut widget);
        assert!(mesh.simulate_physics && mesh.enable_gravity);
        assert!(widget.visible);

        ItemProperties::for_state(ItemState::Equipped).apply(&mut mesh, &mut area, &mut collision_box, &mut widget);
        assert!(!widget.visible);
    }
}
