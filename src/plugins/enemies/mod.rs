//! Enemies plugin: pooled chasers.
//!
//! A chaser's life is short by construction: it is placed ahead of the
//! player, may latch on and pursue with deliberately imperfect aim, and is
//! shelved again by whichever despawn path fires first: the hard countdown,
//! falling behind the player, or one-shot player contact. The two timed
//! paths are independent checks; both only ever deactivate, so their
//! relative order carries no behaviour.
//!
//! Shelved instances are not immediately reusable: the spawner schedules a
//! repool deadline at activation, and only a no-longer-active instance is
//! re-queued when it fires.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::contact::split_contact;
use crate::common::layers::{Layer, inert, live};
use crate::common::messages::{PlaySfx, PlayerStruck, Sfx};
use crate::common::pool::{EntityPool, PoolState};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::core::RunRng;
use crate::plugins::player::Player;
use crate::plugins::{ContactSet, SimSet};

#[derive(Component, Debug)]
pub struct Chaser;

/// Per-activation pursuit state, reset whenever the instance leaves the
/// pool.
#[derive(Component, Debug)]
pub struct ChaserState {
    pub chasing: bool,
    pub alert_played: bool,
    pub countdown: Timer,
    pub move_dir: Vec3,
}

impl ChaserState {
    fn fresh(countdown_secs: f32) -> Self {
        Self {
            chasing: false,
            alert_played: false,
            countdown: Timer::from_seconds(countdown_secs, TimerMode::Once),
            move_dir: Vec3::Z,
        }
    }
}

/// Scheduled return-to-pool, armed at activation.
#[derive(Component, Debug)]
pub struct RepoolDeadline(pub Timer);

#[derive(Resource, Debug)]
pub struct ChaserPool(pub EntityPool<()>);

#[derive(Resource, Debug)]
pub struct ChaserSpawner {
    pub next_spawn_z: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), prewarm_chasers);

    app.add_systems(
        FixedUpdate,
        (spawn_chasers, pursue)
            .chain()
            .in_set(SimSet::Chasers)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            contact_player.in_set(ContactSet::Classify),
            commit_repool.in_set(ContactSet::Commit),
        )
            .run_if(in_state(GameState::InGame)),
    );
}

fn prewarm_chasers(mut commands: Commands, tunables: Res<Tunables>) {
    let c = &tunables.chaser;

    let mut pool = EntityPool::new(c.pool_size);
    for _ in 0..c.pool_size {
        let e = commands
            .spawn((
                Name::new("Chaser(Pooled)"),
                Chaser,
                ChaserState::fresh(c.deactivate_after),
                PoolState::Inactive,
                RepoolDeadline(Timer::from_seconds(c.repool_delay, TimerMode::Once)),
                Transform::from_xyz(0.0, c.spawn_y_offset, 0.0),
                Visibility::Hidden,
                RigidBody::Kinematic,
                Collider::sphere(0.5),
                Sensor,
                inert(Layer::Chaser),
                DespawnOnExit(GameState::InGame),
            ))
            .id();
        pool.prewarm((), e);
    }

    commands.insert_resource(ChaserPool(pool));
    commands.insert_resource(ChaserSpawner {
        next_spawn_z: c.first_spawn_ahead,
    });
}

/// Activate a pooled chaser ahead of the player whenever the spawn line
/// comes into lookahead range. The line advances regardless of whether an
/// instance was available, so exhaustion skips a slot rather than bunching
/// later spawns.
fn spawn_chasers(
    tunables: Res<Tunables>,
    mut rng: ResMut<RunRng>,
    mut pool: ResMut<ChaserPool>,
    mut spawner: ResMut<ChaserSpawner>,
    q_player: Query<&Transform, With<Player>>,
    mut q_chasers: Query<
        (
            &mut Transform,
            &mut ChaserState,
            &mut PoolState,
            &mut RepoolDeadline,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        (With<Chaser>, Without<Player>),
    >,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let c = &tunables.chaser;

    if player_tf.translation.z + c.spawn_lookahead <= spawner.next_spawn_z {
        return;
    }
    let spawn_z = spawner.next_spawn_z;
    spawner.next_spawn_z += c.spawn_interval_z;

    let Some(e) = pool.0.acquire(()) else {
        return;
    };
    let (mut tf, mut state, mut pool_state, mut repool, mut vis, mut layers) = q_chasers
        .get_mut(e)
        .expect("ChaserPool contained an entity missing chaser components");

    let dx = rng.0.random_range(-c.x_spawn_range..=c.x_spawn_range);
    tf.translation = Vec3::new(
        player_tf.translation.x + dx,
        player_tf.translation.y + c.spawn_y_offset,
        spawn_z,
    );
    tf.rotation = Quat::IDENTITY;

    *state = ChaserState::fresh(c.deactivate_after);
    *pool_state = PoolState::Active;
    repool.0 = Timer::from_seconds(c.repool_delay, TimerMode::Once);
    *vis = Visibility::Visible;
    *layers = live(Layer::Chaser);
}

/// Per-chaser pursuit update.
fn pursue(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut rng: ResMut<RunRng>,
    mut sfx: MessageWriter<PlaySfx>,
    q_player: Query<&Transform, With<Player>>,
    mut q_chasers: Query<
        (
            &mut Transform,
            &mut ChaserState,
            &mut PoolState,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        (With<Chaser>, Without<Player>),
    >,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let player_pos = player_tf.translation;
    let c = &tunables.chaser;
    let dt = time.delta_secs();

    for (mut tf, mut state, mut pool_state, mut vis, mut layers) in &mut q_chasers {
        if *pool_state != PoolState::Active {
            continue;
        }

        // Pursuit abandoned: the player outran it.
        if tf.translation.z < player_pos.z - c.stop_behind_distance {
            shelve(&mut pool_state, &mut vis, &mut layers);
            continue;
        }

        if !state.chasing && tf.translation.distance(player_pos) < c.chase_range {
            state.chasing = true;
            if !state.alert_played {
                sfx.write(PlaySfx(Sfx::ChaserAlert));
                state.alert_played = true;
            }
        }

        if state.chasing {
            // Slightly imperfect aim: bounded noise on the ground plane.
            let mut dir = (player_pos - tf.translation).normalize_or_zero();
            dir += Vec3::new(
                rng.0.random_range(-c.aim_error..=c.aim_error) * 0.05,
                0.0,
                rng.0.random_range(-c.aim_error..=c.aim_error) * 0.05,
            );

            state.move_dir = state.move_dir.lerp(dir, (dt * c.turn_smoothness).min(1.0));
            let step = state.move_dir.normalize_or_zero() * c.speed * dt;
            tf.translation += step;

            if state.move_dir.length_squared() > 0.1 {
                let facing = state.move_dir.normalize();
                tf.look_to(facing, Vec3::Y);
            }
        }

        // The countdown runs whether or not a chase ever started.
        state.countdown.tick(time.delta());
        if state.countdown.is_finished() {
            shelve(&mut pool_state, &mut vis, &mut layers);
        }
    }
}

/// One-shot contact: report the strike, then shelve unconditionally.
fn contact_player(
    mut started: MessageReader<CollisionStart>,
    q_player: Query<(), With<Player>>,
    mut q_chasers: Query<
        (&mut PoolState, &mut Visibility, &mut CollisionLayers),
        With<Chaser>,
    >,
    mut strikes: MessageWriter<PlayerStruck>,
) {
    for ev in started.read() {
        let Some((_, other)) = split_contact(ev, |e| q_player.contains(e)) else {
            continue;
        };
        let Ok((mut pool_state, mut vis, mut layers)) = q_chasers.get_mut(other) else {
            continue;
        };
        if *pool_state != PoolState::Active {
            continue;
        }

        strikes.write(PlayerStruck {
            source: other,
            lethal: false,
        });
        shelve(&mut pool_state, &mut vis, &mut layers);
    }
}

/// Resolve repool deadlines. Only instances that shelved themselves are
/// re-queued; one still active when its deadline fires is spent for the
/// rest of the run (its own countdown shelves it soon after).
fn commit_repool(
    time: Res<Time<Fixed>>,
    mut pool: ResMut<ChaserPool>,
    mut q_chasers: Query<(Entity, &mut RepoolDeadline, &mut PoolState), With<Chaser>>,
) {
    for (e, mut repool, mut pool_state) in &mut q_chasers {
        if *pool_state == PoolState::Inactive {
            continue;
        }
        repool.0.tick(time.delta());
        // Release only on the tick the deadline fires; an instance still
        // active at that moment never re-queues, even once shelved later.
        if repool.0.just_finished() && *pool_state == PoolState::PendingReturn {
            *pool_state = PoolState::Inactive;
            pool.0.release((), e);
        }
    }
}

/// Take an instance out of play without structural changes.
fn shelve(pool_state: &mut PoolState, vis: &mut Visibility, layers: &mut CollisionLayers) {
    *pool_state = PoolState::PendingReturn;
    *vis = Visibility::Hidden;
    *layers = inert(Layer::Chaser);
}

#[cfg(test)]
mod tests;
