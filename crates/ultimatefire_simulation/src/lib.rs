//! UltimateFire Simulation Core
//!
//! Third-person shooter gameplay on Bevy 0.16 ECS: character movement and
//! camera, pickup items, weapons, automatic fire, crosshair spread and the
//! animation-state bridge.
//!
//! The simulation is headless. Rendering, sound, particles and animation
//! blending belong to a presentation layer that reads components + events.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Public modules
pub mod animation;
pub mod character;
pub mod components;
pub mod config;
pub mod item;
pub mod logger;
pub mod math;
pub mod physics;
pub mod shooting;
pub mod weapon;

pub use animation::{AnimationPlugin, MontageRequested, ShooterAnimState};
pub use character::{
    spawn_shooter_character, Aiming, CharacterCapsule, CharacterPlugin, CrosshairFiring, CrosshairSpread,
    LookRates, OverlappedItems, ShooterCharacter, TracedItem,
};
pub use components::*;
pub use config::{ConfigError, ShooterConfig};
pub use item::{
    item_bundle, Item, ItemAreaEntered, ItemAreaExited, ItemInterpFinished, ItemPickupStarted, ItemPlugin,
    ItemRarity, ItemState, PickupWidget,
};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, ConsoleLogger, LogLevel, LogPrinter, LOGGER_LEVEL,
};
pub use physics::{KinematicControllerPlugin, LineTrace, SceneTracer, TraceShape, Viewport};
pub use shooting::{FireControl, ShootingPlugin, WeaponDryFired, WeaponFired};
pub use weapon::{weapon_bundle, EquippedWeapon, HeldBy, Weapon, WeaponDropped, WeaponEquipped, WeaponPlugin};

/// Per-tick order of the shooter simulation (FixedUpdate, chained)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShooterSet {
    /// ShooterInput → aim, look, movement input
    Input,
    /// Kinematic characters + falling items
    Movement,
    /// Follow camera pose, zoom
    Camera,
    /// Area sphere overlaps → overlapped item counts
    Overlaps,
    /// Item tracing, select button
    Pickup,
    /// Pickup curves
    ItemMotion,
    /// Equip, drop, swap, throw, hand socket
    Weapons,
    /// Fire control
    Combat,
    Crosshair,
    /// Item state → part properties
    Properties,
    Animation,
    /// Input edges consumed
    Cleanup,
}

/// Main simulation plugin (all gameplay subsystems)
///
/// `ShooterConfig`, `Viewport` and `DeterministicRng` inserted before this
/// plugin are kept; otherwise defaults are used.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<ShooterConfig>();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        if !app.world().contains_resource::<Viewport>() {
            let viewport = app.world().resource::<ShooterConfig>().viewport.clone();
            app.insert_resource(Viewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        app.configure_sets(
            FixedUpdate,
            (
                ShooterSet::Input,
                ShooterSet::Movement,
                ShooterSet::Camera,
                ShooterSet::Overlaps,
                ShooterSet::Pickup,
                ShooterSet::ItemMotion,
                ShooterSet::Weapons,
                ShooterSet::Combat,
                ShooterSet::Crosshair,
                ShooterSet::Properties,
                ShooterSet::Animation,
                ShooterSet::Cleanup,
            )
                .chain(),
        );

        app.add_plugins((
            CharacterPlugin,
            KinematicControllerPlugin,
            ItemPlugin,
            WeaponPlugin,
            ShootingPlugin,
            AnimationPlugin,
        ));
    }
}

/// Deterministic RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal Bevy App for a headless run
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// World snapshot for determinism checks
///
/// Components of type `T` in entity order, serialized through `Debug`.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
