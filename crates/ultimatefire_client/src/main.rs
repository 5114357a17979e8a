use bevy::prelude::*;
use ultimatefire_simulation::{
    physics::{CollisionChannel, CollisionEnabled, CollisionResponse, CollisionSettings},
    spawn_shooter_character, weapon_bundle, ItemRarity, Player, ShooterConfig, SimulationPlugin, TraceShape,
};

mod camera;
mod input;
mod rendering;

use camera::CameraPlugin;
use input::PlayerInputPlugin;
use rendering::RenderingSyncPlugin;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match ShooterConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                ultimatefire_simulation::log_error(&format!("Config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => ShooterConfig::default(),
    };

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "UltimateFire".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(config)
        // Simulation (headless ECS logic)
        .add_plugins(SimulationPlugin)
        // Keyboard/mouse/gamepad → ShooterInput
        .add_plugins(PlayerInputPlugin)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // Follow camera
        .add_plugins(CameraPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

/// Ground, lights, a target wall, the player and a few weapons to pick up
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ShooterConfig>,
) {
    // Ground plane (40x40m)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(20.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.35, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Target wall: blocks shots and the crosshair trace
    let wall_half_extents = Vec3::new(6.0, 2.5, 0.25);
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(wall_half_extents * 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.5, 0.45, 0.4))),
        Transform::from_xyz(0.0, 2.5, -15.0),
        TraceShape::cuboid(
            wall_half_extents,
            CollisionSettings::only(
                CollisionEnabled::QueryAndPhysics,
                CollisionChannel::Visibility,
                CollisionResponse::Block,
            ),
        ),
    ));

    let player = spawn_shooter_character(&mut commands, &config, Transform::default());
    commands.entity(player).insert((Player, rendering::NeedsVisual));

    for (name, rarity, position) in [
        ("AssaultRifle", ItemRarity::Rare, Vec3::new(0.5, 1.0, -3.0)),
        ("Shotgun", ItemRarity::Common, Vec3::new(-3.0, 0.0, -5.0)),
        ("Carbine", ItemRarity::Legendary, Vec3::new(4.0, 0.0, -6.0)),
        ("Pistol", ItemRarity::Damaged, Vec3::new(-1.5, 0.0, 3.0)),
    ] {
        commands.spawn((
            weapon_bundle(name, rarity, Transform::from_translation(position), &config),
            rendering::NeedsVisual,
        ));
    }
}
