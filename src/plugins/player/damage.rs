//! Strike intake: the one place health, shield charges and the death
//! sequence are decided.

use bevy::prelude::*;

use crate::common::messages::{MusicCmd, PlaySfx, PlayerStruck, Sfx};
use crate::common::tunables::Tunables;

use super::components::{Buffs, CharacterAnimator, Player, RunMotion, Stance, Vitals};

pub fn intake_strikes(
    mut commands: Commands,
    mut strikes: MessageReader<PlayerStruck>,
    tunables: Res<Tunables>,
    mut sfx: MessageWriter<PlaySfx>,
    mut music: MessageWriter<MusicCmd>,
    mut q: Query<
        (
            &mut Vitals,
            &mut Buffs,
            &mut Stance,
            &mut RunMotion,
            &mut CharacterAnimator,
        ),
        With<Player>,
    >,
) {
    let Ok((mut vitals, mut buffs, mut stance, mut motion, mut anim)) = q.single_mut() else {
        return;
    };

    for strike in strikes.read() {
        if vitals.dead {
            continue;
        }

        // Deadly obstacles bypass shield, health and the stumble grace.
        if strike.lethal {
            die(&mut vitals, &mut motion, &mut anim, &mut music, &tunables);
            continue;
        }

        // A player already stumbling cannot be struck again.
        if vitals.stumbling() {
            continue;
        }

        sfx.write(PlaySfx(Sfx::ObstacleHit));

        // A mid-air hit lands the stance before anything else.
        if stance.airborne() {
            *stance = Stance::Running;
            anim.jumping = false;
            anim.falling = false;
        }

        // Shield absorbs the hit before health is touched.
        if let Some(shield) = buffs.shield.as_mut() {
            if let Some(orb) = shield.orbs.pop() {
                commands.entity(orb).despawn();
            }
            if shield.orbs.is_empty() {
                buffs.shield = None;
            }
            continue;
        }

        vitals.health -= 1;
        if vitals.health <= 0 {
            die(&mut vitals, &mut motion, &mut anim, &mut music, &tunables);
        } else {
            vitals.stumble = Some(Timer::from_seconds(
                tunables.player.stumble_duration,
                TimerMode::Once,
            ));
            anim.injured = true;
        }
    }
}

fn die(
    vitals: &mut Vitals,
    motion: &mut RunMotion,
    anim: &mut CharacterAnimator,
    music: &mut MessageWriter<MusicCmd>,
    tunables: &Tunables,
) {
    vitals.dead = true;
    vitals.health = vitals.health.max(0);
    vitals.stumble = None;
    vitals.game_over_at = Some(Timer::from_seconds(
        tunables.player.game_over_delay,
        TimerMode::Once,
    ));

    motion.forward_speed = 0.0;

    anim.running = false;
    anim.jumping = false;
    anim.falling = false;
    anim.injured = false;
    anim.sliding = false;
    anim.die_triggered = true;

    music.write(MusicCmd::StopGame);
}
