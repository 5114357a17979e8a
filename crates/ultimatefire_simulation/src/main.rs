//! Headless UltimateFire session
//!
//! Runs a scripted player (burst fire, aim, pick up a rifle, drop it, walk
//! and jump) without a renderer and logs what happened.
//!
//! Usage: `ultimatefire_simulation [config.toml]`
//! `ULTIMATEFIRE_LOG=info|warning|error` raises the log threshold.

use std::time::Duration;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use ultimatefire_simulation::{
    create_headless_app, log_error, log_info, set_log_level, spawn_shooter_character, weapon_bundle,
    CameraZoom, CrosshairSpread, EquippedWeapon, Item, ItemRarity, LogLevel, Player, ShooterConfig,
    ShooterInput, SimulationPlugin, Weapon,
};

const SEED: u64 = 42;
const TICKS: u32 = 600;

/// Scripted input change at a tick
#[derive(Debug, Clone, Copy)]
enum Action {
    PressFire,
    ReleaseFire,
    PressAim,
    ReleaseAim,
    Select,
    Drop,
    Walk(f32),
    Jump(bool),
    Look(f32, f32),
}

const SCRIPT: &[(u32, Action)] = &[
    (30, Action::PressFire),
    (90, Action::ReleaseFire),
    (100, Action::PressAim),
    (160, Action::ReleaseAim),
    (180, Action::Select),
    (260, Action::PressFire),
    (290, Action::ReleaseFire),
    (320, Action::Drop),
    (380, Action::Look(-30.0, 0.0)),
    (400, Action::Walk(1.0)),
    (430, Action::Jump(true)),
    (432, Action::Jump(false)),
    (500, Action::Walk(0.0)),
];

fn main() {
    let mut app = create_headless_app(SEED);

    if let Some(level) = std::env::var("ULTIMATEFIRE_LOG").ok().and_then(|value| LogLevel::parse(&value)) {
        set_log_level(level);
    }

    let config = match std::env::args().nth(1) {
        Some(path) => match ShooterConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => ShooterConfig::default(),
    };

    log_info(&format!("Starting UltimateFire headless session (seed: {})", SEED));

    app.insert_resource(config)
        .add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    let player = match app.world_mut().run_system_once(setup_scene) {
        Ok(player) => player,
        Err(err) => {
            log_error(&format!("Scene setup failed: {}", err));
            std::process::exit(1);
        }
    };

    // First update only primes the clock
    app.update();

    for tick in 0..TICKS {
        for (_, action) in SCRIPT.iter().filter(|(at, _)| *at == tick) {
            apply_action(app.world_mut(), player, *action);
        }

        app.update();

        if tick % 60 == 0 {
            report(app.world_mut(), player, tick);
        }
    }

    report(app.world_mut(), player, TICKS);
    log_info("Session complete!");
}

/// Player at the origin plus a rifle floating at eye level in front of the
/// crosshair
fn setup_scene(mut commands: Commands, config: Res<ShooterConfig>) -> Entity {
    let player = spawn_shooter_character(&mut commands, &config, Transform::default());
    commands.entity(player).insert(Player);

    commands.spawn(weapon_bundle(
        "AssaultRifle",
        ItemRarity::Rare,
        Transform::from_xyz(0.5, 1.75, -1.5),
        &config,
    ));

    player
}

fn apply_action(world: &mut World, player: Entity, action: Action) {
    let Some(mut input) = world.get_mut::<ShooterInput>(player) else {
        log_error(&format!("Player {:?} has no ShooterInput", player));
        return;
    };

    match action {
        Action::PressFire => input.fire.press(),
        Action::ReleaseFire => input.fire.release(),
        Action::PressAim => input.aim.press(),
        Action::ReleaseAim => input.aim.release(),
        Action::Select => {
            input.select.press();
            input.select.release();
        }
        Action::Drop => {
            input.drop.press();
            input.drop.release();
        }
        Action::Walk(forward) => input.forward = forward,
        Action::Jump(held) => input.jump.set(held),
        Action::Look(turn, look_up) => input.add_mouse_delta(turn, look_up),
    }
}

fn report(world: &mut World, player: Entity, tick: u32) {
    let Some(transform) = world.get::<Transform>(player).copied() else {
        return;
    };
    let fov = world.get::<CameraZoom>(player).map_or(0.0, |zoom| zoom.current_fov);
    let spread = world
        .get::<CrosshairSpread>(player)
        .map_or(0.0, |spread| spread.multiplier);

    let weapon = world
        .get::<EquippedWeapon>(player)
        .and_then(|equipped| equipped.0)
        .and_then(|entity| Some((world.get::<Item>(entity)?, world.get::<Weapon>(entity)?)))
        .map_or_else(
            || "none".to_string(),
            |(item, weapon)| format!("{} ({} rounds)", item.name, weapon.ammo),
        );

    log_info(&format!(
        "Tick {}: pos {:.2?}, fov {:.1}, spread {:.2}, weapon {}",
        tick, transform.translation, fov, spread, weapon
    ));
}
