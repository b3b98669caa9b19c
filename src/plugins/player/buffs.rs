//! Shield and magnet buffs.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::messages::{PowerUpCollected, PowerUpKind};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::collectibles::components::{Coin, Collectible};

use super::components::{Buffs, MagnetBuff, Player, ShieldBuff, ShieldOrb, Vitals};

/// Closed dispatch over the power-up variants.
pub fn apply_powerups(
    mut commands: Commands,
    mut collected: MessageReader<PowerUpCollected>,
    tunables: Res<Tunables>,
    mut q: Query<(Entity, &mut Buffs, &Vitals), With<Player>>,
) {
    let Ok((player, mut buffs, vitals)) = q.single_mut() else {
        return;
    };

    for msg in collected.read() {
        if vitals.dead {
            continue;
        }
        match msg.kind {
            PowerUpKind::Magnet => {
                buffs.magnet = Some(MagnetBuff {
                    expiry: Timer::from_seconds(tunables.magnet.duration, TimerMode::Once),
                    radius: tunables.magnet.radius,
                });
            }
            PowerUpKind::Shield => {
                activate_shield(&mut commands, player, &mut buffs, &tunables);
            }
        }
    }
}

/// Replace any running shield with a fresh one: three orbs at 120 degree
/// spacing, parented to the player so they travel with it.
fn activate_shield(commands: &mut Commands, player: Entity, buffs: &mut Buffs, tunables: &Tunables) {
    if let Some(old) = buffs.shield.take() {
        for orb in old.orbs {
            commands.entity(orb).despawn();
        }
    }

    let s = &tunables.shield;
    let mut orbs = Vec::with_capacity(s.charges as usize);
    for i in 0..s.charges {
        let angle = (i as f32) * (360.0 / s.charges as f32).to_radians();
        let offset = Vec3::new(
            angle.cos() * s.orbit_radius,
            s.orbit_height,
            angle.sin() * s.orbit_radius,
        );
        let orb = commands
            .spawn((
                Name::new("ShieldOrb"),
                ShieldOrb,
                Transform::from_translation(offset),
                Visibility::default(),
                ChildOf(player),
                DespawnOnExit(GameState::InGame),
            ))
            .id();
        orbs.push(orb);
    }

    buffs.shield = Some(ShieldBuff {
        expiry: Timer::from_seconds(s.duration, TimerMode::Once),
        orbs,
    });
}

/// Spin the orbs and clear the shield when its timer expires. The buff also
/// clears when the last charge is consumed; whichever comes first wins.
pub fn tick_shield(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut Buffs, &Vitals), With<Player>>,
    mut q_orbs: Query<&mut Transform, With<ShieldOrb>>,
) {
    let Ok((mut buffs, vitals)) = q.single_mut() else {
        return;
    };
    // Death is terminal; buffs freeze in place until the run ends.
    if vitals.dead {
        return;
    }
    let Some(shield) = buffs.shield.as_mut() else {
        return;
    };

    shield.expiry.tick(time.delta());

    if shield.expiry.is_finished() {
        let expired = buffs.shield.take().expect("shield present above");
        for orb in expired.orbs {
            commands.entity(orb).despawn();
        }
        return;
    }

    let spin = Quat::from_rotation_y(
        tunables.shield.spin_degrees_per_sec.to_radians() * time.delta_secs(),
    );
    for orb in &shield.orbs {
        if let Ok(mut tf) = q_orbs.get_mut(*orb) {
            tf.translation = spin * tf.translation;
        }
    }
}

/// Pull in-range coins toward a point above the player while the magnet is
/// active. The magnet never consumes coins; collection stays a contact.
pub fn tick_magnet(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut q: Query<(&Transform, &mut Buffs, &Vitals), With<Player>>,
    mut q_coins: Query<
        (&mut Transform, &GlobalTransform, &Collectible),
        (With<Coin>, Without<Player>),
    >,
) {
    let Ok((player_tf, mut buffs, vitals)) = q.single_mut() else {
        return;
    };
    if vitals.dead {
        return;
    }
    let Some(magnet) = buffs.magnet.as_mut() else {
        return;
    };

    magnet.expiry.tick(time.delta());
    if magnet.expiry.is_finished() {
        buffs.magnet = None;
        return;
    }

    let target = player_tf.translation + Vec3::Y;
    let step = tunables.magnet.pull_speed * time.delta_secs();
    let radius = magnet.radius;

    for (mut tf, global, collectible) in &mut q_coins {
        if !collectible.available {
            continue;
        }
        let world = global.translation();
        if world.distance(player_tf.translation) > radius {
            continue;
        }
        // Coin parents are translation-only, so a world-space step maps
        // one-to-one onto the local transform.
        let to_target = target - world;
        if to_target.length() <= step {
            tf.translation += to_target;
        } else {
            tf.translation += to_target.normalize() * step;
        }
    }
}
