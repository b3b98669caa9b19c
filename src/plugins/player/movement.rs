//! Fixed-step movement integration and timed stance transitions.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::messages::{PlaySfx, Sfx};
use crate::common::state::GameState;
use crate::common::tunables::{Tunables, forward_speed_for};

use super::components::{
    CharacterAnimator, ControlIntent, Lane, LaneGlide, Player, RunMotion, Stance, Vitals,
};
use super::{PLAYER_GROUND_Y, sliding_collider, standing_collider};

/// One integration step: lane input, run clock, lateral glide, jump/fall
/// gravity, slide start, forward motion and distance accounting.
///
/// Dead is absorbing: nothing here runs once `Vitals::dead` is set.
pub fn apply_player_motion(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut intent: ResMut<ControlIntent>,
    mut sfx: MessageWriter<PlaySfx>,
    mut q: Query<
        (
            &mut Transform,
            &mut Lane,
            &mut LaneGlide,
            &mut RunMotion,
            &mut Stance,
            &Vitals,
            &mut CharacterAnimator,
            &mut Collider,
        ),
        With<Player>,
    >,
) {
    let intent = std::mem::take(&mut *intent);

    let Ok((mut tf, mut lane, mut glide, mut motion, mut stance, vitals, mut anim, mut collider)) =
        q.single_mut()
    else {
        return;
    };
    if vitals.dead {
        return;
    }

    let dt = time.delta_secs();
    let p = &tunables.player;

    // Lane switching is allowed while stumbling, jumping, falling and
    // sliding; only mid-change re-input is blocked. At the edge lanes the
    // input is a no-op: no state change, no sound.
    if !glide.changing {
        if intent.lane_left && lane.0 > Lane::LEFTMOST {
            lane.0 -= 1;
            glide.target_x = lane.center_x(p.lane_distance);
            sfx.write(PlaySfx(Sfx::LaneChange));
        } else if intent.lane_right && lane.0 < Lane::RIGHTMOST {
            lane.0 += 1;
            glide.target_x = lane.center_x(p.lane_distance);
            sfx.write(PlaySfx(Sfx::LaneChange));
        }
    }

    // The run clock freezes during stumble; the breakpoint function then
    // hands back the pre-stumble speed once the stumble clears.
    if !vitals.stumbling() {
        motion.elapsed += dt;
        motion.forward_speed = forward_speed_for(motion.elapsed);
    }
    let effective_speed = if vitals.stumbling() {
        motion.forward_speed * p.stumble_speed_reduction
    } else {
        motion.forward_speed
    };

    // Lateral glide uses the full lane-change speed even while stumbling.
    let blend = (p.lane_change_speed * dt).clamp(0.0, 1.0);
    let new_x = tf.translation.x + (glide.target_x - tf.translation.x) * blend;
    glide.changing = (new_x - glide.target_x).abs() > 0.1;

    // Vertical handling. Jump and slide are grounded-only and disabled
    // while stumbling.
    let grounded = tf.translation.y <= PLAYER_GROUND_Y + 1e-3 && motion.vertical_velocity <= 0.0;
    if grounded && !vitals.stumbling() {
        motion.vertical_velocity = -0.1;

        if stance.airborne() {
            *stance = Stance::Running;
            anim.jumping = false;
            anim.falling = false;
        }

        if matches!(*stance, Stance::Running) && intent.jump {
            sfx.write(PlaySfx(Sfx::Jump));
            motion.vertical_velocity = p.jump_force;
            *stance = Stance::Jumping;
            anim.jumping = true;
            anim.falling = false;
        } else if matches!(*stance, Stance::Running) && intent.slide {
            let duration = tunables.clip_durations.seconds("slide");
            *stance = Stance::Sliding {
                until: Timer::from_seconds(duration, TimerMode::Once),
            };
            *collider = sliding_collider();
            anim.sliding = true;
        }
    } else if !grounded {
        motion.vertical_velocity -= p.gravity * dt;

        if matches!(*stance, Stance::Jumping) && motion.vertical_velocity < p.fall_threshold {
            *stance = Stance::Falling;
            anim.jumping = false;
            anim.falling = true;
        }
    }

    tf.translation.x = new_x;
    tf.translation.y = (tf.translation.y + motion.vertical_velocity * dt).max(PLAYER_GROUND_Y);
    tf.translation.z += effective_speed * dt;

    let dz = tf.translation.z - motion.last_z;
    motion.last_z = tf.translation.z;
    motion.distance += dz;
}

/// End a slide when its animation-driven timer elapses.
pub fn resolve_slide(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Stance, &Vitals, &mut CharacterAnimator, &mut Collider), With<Player>>,
) {
    for (mut stance, vitals, mut anim, mut collider) in &mut q {
        let Stance::Sliding { until } = &mut *stance else {
            continue;
        };
        until.tick(time.delta());
        if !until.is_finished() {
            continue;
        }
        // Stale continuation check: a slide abandoned by death resolves to
        // nothing.
        if vitals.dead {
            continue;
        }
        *stance = Stance::Running;
        *collider = standing_collider();
        anim.sliding = false;
    }
}

/// End a stumble after the configured duration. Speed restoration is
/// implicit: the frozen run clock resumes where it stopped.
pub fn resolve_stumble(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Vitals, &mut CharacterAnimator), With<Player>>,
) {
    for (mut vitals, mut anim) in &mut q {
        let Some(timer) = vitals.stumble.as_mut() else {
            continue;
        };
        timer.tick(time.delta());
        if !timer.is_finished() {
            continue;
        }
        if vitals.dead {
            // Death abandoned the stumble; the recovery is a no-op.
            vitals.stumble = None;
            continue;
        }
        vitals.stumble = None;
        anim.injured = false;
    }
}

/// Fire the game-over transition a fixed delay after death.
pub fn resolve_death_deadline(
    time: Res<Time<Fixed>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut q: Query<&mut Vitals, With<Player>>,
) {
    for mut vitals in &mut q {
        if !vitals.dead {
            continue;
        }
        let Some(deadline) = vitals.game_over_at.as_mut() else {
            continue;
        };
        deadline.tick(time.delta());
        if deadline.is_finished() {
            vitals.game_over_at = None;
            next_state.set(GameState::GameOver);
        }
    }
}
