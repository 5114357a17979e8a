use bevy::prelude::*;
use ultimatefire_simulation::item::ItemMesh;
use ultimatefire_simulation::{
    CharacterCapsule, CrosshairSpread, Item, ItemRarity, Player, PickupWidget, ShooterConfig, Viewport,
    WeaponFired,
};

/// Crosshair arm distance from the centre at multiplier 1 (pixels)
const CROSSHAIR_SPREAD_MAX: f32 = 16.0;
const CROSSHAIR_ARM_LENGTH: f32 = 10.0;
const CROSSHAIR_ARM_WIDTH: f32 = 2.0;

/// How long a beam stays on screen (seconds)
const BEAM_LIFETIME: f32 = 0.1;

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BeamTrails>()
            .add_systems(Startup, spawn_crosshair)
            .add_systems(
                Update,
                (
                    spawn_visuals_for_new_entities,
                    sync_transforms,
                    sync_item_visibility,
                    draw_pickup_widgets,
                    collect_beams,
                    draw_beams,
                    update_crosshair,
                )
                    .chain(),
            );
    }
}

/// Marker: simulation entity needs visual representation
#[derive(Component)]
pub struct NeedsVisual;

/// Link: visual entity → simulation entity (+ offset from its origin)
#[derive(Component)]
pub struct VisualOf {
    pub owner: Entity,
    pub offset: Vec3,
}

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// One crosshair arm; `direction` points away from the centre
#[derive(Component)]
pub struct CrosshairArm {
    pub direction: Vec2,
}

struct BeamTrail {
    start: Vec3,
    end: Vec3,
    hit: bool,
    remaining: f32,
}

#[derive(Resource, Default)]
struct BeamTrails(Vec<BeamTrail>);

/// Spawn a capsule for characters and a box for items
fn spawn_visuals_for_new_entities(
    mut commands: Commands,
    query: Query<(Entity, &Transform, Option<&CharacterCapsule>, Option<&Item>), With<NeedsVisual>>,
    config: Res<ShooterConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, sim_transform, capsule, item) in query.iter() {
        let (mesh, color, offset) = if let Some(capsule) = capsule {
            // Capsule3d length is the cylinder part only
            let mesh = meshes.add(Capsule3d::new(
                capsule.radius,
                2.0 * (capsule.half_height - capsule.radius),
            ));
            (mesh, Color::srgb(0.2, 0.3, 0.8), Vec3::Y * capsule.half_height)
        } else if let Some(item) = item {
            let half_extents = Vec3::from_array(config.items.collision_box_half_extents);
            let mesh = meshes.add(Cuboid::from_size(half_extents * 2.0));
            (mesh, rarity_color(item.rarity), Vec3::ZERO)
        } else {
            continue;
        };

        let visual_entity = commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: color,
                    ..default()
                })),
                sim_transform.mul_transform(Transform::from_translation(offset)),
                VisualOf {
                    owner: sim_entity,
                    offset,
                },
            ))
            .id();

        commands
            .entity(sim_entity)
            .remove::<NeedsVisual>()
            .insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<&Transform, (With<HasVisual>, Without<VisualOf>)>,
    mut visual_query: Query<(&VisualOf, &mut Transform)>,
) {
    for (visual_of, mut visual_transform) in visual_query.iter_mut() {
        if let Ok(sim_transform) = sim_query.get(visual_of.owner) {
            *visual_transform = sim_transform.mul_transform(Transform::from_translation(visual_of.offset));
        }
    }
}

/// Stored items disappear, everything else stays drawn
fn sync_item_visibility(
    items: Query<(&ItemMesh, &HasVisual), Changed<ItemMesh>>,
    mut visuals: Query<&mut Visibility, With<VisualOf>>,
) {
    for (mesh, has_visual) in items.iter() {
        if let Ok(mut visibility) = visuals.get_mut(has_visual.0) {
            *visibility = if mesh.visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

/// Pickup widget: rarity stars above the traced item
fn draw_pickup_widgets(items: Query<(&Item, &PickupWidget, &Transform)>, mut gizmos: Gizmos) {
    for (item, widget, transform) in items.iter() {
        if !widget.visible {
            continue;
        }

        let base = transform.translation + Vec3::Y * 0.5;
        for (index, active) in item.active_stars().into_iter().enumerate() {
            let position = base + Vec3::X * ((index as f32 - 2.0) * 0.12);
            let color = if active {
                Color::srgb(1.0, 0.85, 0.1)
            } else {
                Color::srgb(0.3, 0.3, 0.3)
            };
            gizmos.sphere(Isometry3d::from_translation(position), 0.04, color);
        }
    }
}

fn collect_beams(mut fired: EventReader<WeaponFired>, mut trails: ResMut<BeamTrails>) {
    for shot in fired.read() {
        let Some(end) = shot.beam_end else {
            continue;
        };
        trails.0.push(BeamTrail {
            start: shot.muzzle.translation,
            end,
            hit: shot.hit.is_some(),
            remaining: BEAM_LIFETIME,
        });
    }
}

/// Beam line, muzzle flash and impact marker
fn draw_beams(mut trails: ResMut<BeamTrails>, time: Res<Time>, mut gizmos: Gizmos) {
    let delta = time.delta_secs();

    for trail in trails.0.iter() {
        gizmos.line(trail.start, trail.end, Color::srgb(1.0, 0.9, 0.5));
        gizmos.sphere(Isometry3d::from_translation(trail.start), 0.05, Color::srgb(1.0, 0.6, 0.1));
        if trail.hit {
            gizmos.sphere(Isometry3d::from_translation(trail.end), 0.1, Color::srgb(1.0, 0.3, 0.1));
        }
    }

    trails.0.retain_mut(|trail| {
        trail.remaining -= delta;
        trail.remaining > 0.0
    });
}

fn spawn_crosshair(mut commands: Commands) {
    for direction in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
        let horizontal = direction.y == 0.0;
        let (width, height) = if horizontal {
            (CROSSHAIR_ARM_LENGTH, CROSSHAIR_ARM_WIDTH)
        } else {
            (CROSSHAIR_ARM_WIDTH, CROSSHAIR_ARM_LENGTH)
        };

        commands.spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(width),
                height: Val::Px(height),
                ..default()
            },
            BackgroundColor(Color::WHITE),
            CrosshairArm { direction },
        ));
    }
}

/// Arms move outward with the player's spread multiplier
fn update_crosshair(
    player: Query<&CrosshairSpread, With<Player>>,
    mut arms: Query<(&CrosshairArm, &mut Node)>,
    viewport: Res<Viewport>,
    config: Res<ShooterConfig>,
) {
    let Ok(spread) = player.single() else {
        return;
    };

    let center = viewport.crosshair(config.camera.crosshair_screen_offset);
    let gap = CROSSHAIR_SPREAD_MAX * spread.multiplier;

    for (arm, mut node) in arms.iter_mut() {
        // Screen y grows downward: Vec2::Y is the lower arm
        let arm_center = center + arm.direction * (gap + CROSSHAIR_ARM_LENGTH / 2.0);
        let size = if arm.direction.y == 0.0 {
            Vec2::new(CROSSHAIR_ARM_LENGTH, CROSSHAIR_ARM_WIDTH)
        } else {
            Vec2::new(CROSSHAIR_ARM_WIDTH, CROSSHAIR_ARM_LENGTH)
        };
        node.left = Val::Px(arm_center.x - size.x / 2.0);
        node.top = Val::Px(arm_center.y - size.y / 2.0);
    }
}

/// Item colour by rarity (simple palette)
fn rarity_color(rarity: ItemRarity) -> Color {
    match rarity {
        ItemRarity::Damaged => Color::srgb(0.5, 0.4, 0.35),
        ItemRarity::Common => Color::srgb(0.7, 0.7, 0.7),
        ItemRarity::Uncommon => Color::srgb(0.3, 0.8, 0.3),
        ItemRarity::Rare => Color::srgb(0.2, 0.4, 0.9),
        ItemRarity::Legendary => Color::srgb(0.9, 0.6, 0.1),
    }
}
