//! Fire button → shots

use bevy::prelude::*;

use super::beam::beam_end_location;
use super::events::{WeaponDryFired, WeaponFired};
use super::fire_control::FireControl;
use crate::animation::MontageRequested;
use crate::character::{CrosshairFiring, ShooterCharacter};
use crate::components::{CameraZoom, FollowCamera, ShooterInput};
use crate::config::ShooterConfig;
use crate::log_error;
use crate::physics::{SceneTracer, Viewport};
use crate::weapon::{EquippedWeapon, Weapon};

/// Fire button edges + auto-fire timer; fires the equipped weapon
///
/// A shot needs an equipped weapon with ammo. It consumes one round, emits
/// `WeaponFired`, requests the hip-fire montage and widens the crosshair.
/// An empty weapon only emits `WeaponDryFired`.
pub fn fire_weapon(
    mut characters: Query<
        (
            Entity,
            &ShooterInput,
            &EquippedWeapon,
            &FollowCamera,
            &CameraZoom,
            &mut FireControl,
            &mut CrosshairFiring,
        ),
        With<ShooterCharacter>,
    >,
    mut weapons: Query<(&mut Weapon, &Transform), Without<ShooterCharacter>>,
    tracer: SceneTracer,
    viewport: Res<Viewport>,
    config: Res<ShooterConfig>,
    time: Res<Time>,
    mut fired: EventWriter<WeaponFired>,
    mut dry_fired: EventWriter<WeaponDryFired>,
    mut montages: EventWriter<MontageRequested>,
) {
    let fire_rate = config.weapon.automatic_fire_rate;

    for (shooter, input, equipped, camera, zoom, mut control, mut crosshair_firing) in characters.iter_mut() {
        let mut fire_now = control.tick(time.delta(), fire_rate);
        if input.fire.just_pressed() {
            fire_now |= control.press(fire_rate);
        }
        if input.fire.just_released() {
            control.release();
        }
        // Press, release and press again within one step leaves it held
        control.fire_held = input.fire.held();

        if !fire_now {
            continue;
        }
        let Some(weapon_entity) = equipped.0 else {
            continue;
        };
        let Ok((mut weapon, transform)) = weapons.get_mut(weapon_entity) else {
            log_error(&format!(
                "Shooter {:?}: equipped weapon {:?} has no Weapon component",
                shooter, weapon_entity
            ));
            continue;
        };

        if !weapon.consume_round() {
            dry_fired.write(WeaponDryFired {
                shooter,
                weapon: weapon_entity,
            });
            continue;
        }

        let muzzle = weapon.barrel_transform(transform);
        let beam = beam_end_location(
            &tracer,
            &viewport,
            camera,
            zoom.current_fov,
            &config.camera,
            muzzle.translation,
            &[weapon_entity],
        );

        fired.write(WeaponFired {
            shooter,
            weapon: weapon_entity,
            muzzle,
            beam_end: beam.map(|beam| beam.location),
            hit: beam.and_then(|beam| beam.hit),
            ammo_left: weapon.ammo,
        });
        montages.write(MontageRequested::hip_fire(shooter));
        crosshair_firing.start(config.crosshair.shoot_time_duration);
    }
}
