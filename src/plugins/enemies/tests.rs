use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::messages::{PlaySfx, PlayerStruck, Sfx};
use crate::common::pool::PoolState;
use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::core::RunRng;
use crate::plugins::player::Player;

use super::*;

fn world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(RunRng::seeded(7));
    world.init_resource::<Messages<PlaySfx>>();
    world.init_resource::<Messages<PlayerStruck>>();
    world.init_resource::<Messages<CollisionStart>>();
    run_system_once(&mut world, prewarm_chasers);
    world
}

fn spawn_player(world: &mut World, z: f32) -> Entity {
    world
        .spawn((Player, Transform::from_xyz(0.0, 1.0, z)))
        .id()
}

fn active_chasers(world: &mut World) -> Vec<Entity> {
    world
        .query::<(Entity, &PoolState)>()
        .iter(world)
        .filter(|(_, s)| **s == PoolState::Active)
        .map(|(e, _)| e)
        .collect()
}

#[test]
fn prewarm_fills_the_pool() {
    let mut world = world();
    assert_eq!(world.resource::<ChaserPool>().0.free_len(), 10);
    assert_eq!(world.resource::<ChaserSpawner>().next_spawn_z, 50.0);
}

#[test]
fn spawner_activates_ahead_of_the_player() {
    let mut world = world();
    spawn_player(&mut world, 0.0);

    run_system_once(&mut world, spawn_chasers);

    let active = active_chasers(&mut world);
    assert_eq!(active.len(), 1);
    let tf = world.get::<Transform>(active[0]).unwrap();
    assert_eq!(tf.translation.z, 50.0);
    assert!(tf.translation.x.abs() <= 3.0);
    assert_eq!(tf.translation.y, 1.5);

    assert_eq!(world.resource::<ChaserSpawner>().next_spawn_z, 65.0);
    assert_eq!(world.resource::<ChaserPool>().0.free_len(), 9);
}

#[test]
fn spawner_waits_until_the_line_is_in_lookahead() {
    let mut world = world();
    spawn_player(&mut world, -30.0);

    run_system_once(&mut world, spawn_chasers);

    assert!(active_chasers(&mut world).is_empty());
    assert_eq!(world.resource::<ChaserSpawner>().next_spawn_z, 50.0);
}

#[test]
fn exhausted_pool_skips_the_slot_but_the_line_advances() {
    let mut world = world();
    spawn_player(&mut world, 0.0);

    // Drain the free list so acquisition fails.
    while world.resource_mut::<ChaserPool>().0.acquire(()).is_some() {}
    run_system_once(&mut world, spawn_chasers);

    assert!(active_chasers(&mut world).is_empty());
    assert_eq!(world.resource::<ChaserSpawner>().next_spawn_z, 65.0);
}

#[test]
fn out_of_range_chaser_idles_until_its_countdown() {
    let mut world = world();
    spawn_player(&mut world, 0.0);
    run_system_once(&mut world, spawn_chasers);
    let chaser = active_chasers(&mut world)[0];

    world.insert_resource(fixed_time_with_delta(0.5));
    run_system_once(&mut world, pursue);

    // Distance 50, chase range 30: no chase, no movement.
    let state = world.get::<ChaserState>(chaser).unwrap();
    assert!(!state.chasing);
    assert_eq!(world.get::<Transform>(chaser).unwrap().translation.z, 50.0);

    // One big tick past the six-second countdown shelves it.
    world.insert_resource(fixed_time_with_delta(6.5));
    run_system_once(&mut world, pursue);
    assert_eq!(*world.get::<PoolState>(chaser).unwrap(), PoolState::PendingReturn);
    assert_eq!(*world.get::<Visibility>(chaser).unwrap(), Visibility::Hidden);
}

#[test]
fn chase_starts_in_range_with_a_single_alert() {
    let mut world = world();
    let player = spawn_player(&mut world, 0.0);
    run_system_once(&mut world, spawn_chasers);
    let chaser = active_chasers(&mut world)[0];

    // Bring the player within chase range.
    world.get_mut::<Transform>(player).unwrap().translation.z = 30.0;

    world.insert_resource(fixed_time_with_delta(0.5));
    run_system_once(&mut world, pursue);

    let state = world.get::<ChaserState>(chaser).unwrap();
    assert!(state.chasing);
    assert!(state.alert_played);

    let z_after_first = world.get::<Transform>(chaser).unwrap().translation.z;
    assert!(z_after_first < 50.0, "chaser should close on the player");

    run_system_once(&mut world, pursue);
    let alerts: Vec<_> = world
        .resource_mut::<Messages<PlaySfx>>()
        .drain()
        .filter(|m| m.0 == Sfx::ChaserAlert)
        .collect();
    assert_eq!(alerts.len(), 1);
}

#[test]
fn falling_behind_the_player_shelves_the_chaser() {
    let mut world = world();
    let player = spawn_player(&mut world, 0.0);
    run_system_once(&mut world, spawn_chasers);
    let chaser = active_chasers(&mut world)[0];

    world.get_mut::<Transform>(player).unwrap().translation.z = 60.0;
    world.insert_resource(fixed_time_with_delta(0.5));
    run_system_once(&mut world, pursue);

    assert_eq!(*world.get::<PoolState>(chaser).unwrap(), PoolState::PendingReturn);
}

#[test]
fn contact_strikes_once_and_shelves() {
    let mut world = world();
    let player = spawn_player(&mut world, 0.0);
    run_system_once(&mut world, spawn_chasers);
    let chaser = active_chasers(&mut world)[0];

    let contact = |player, chaser| CollisionStart {
        collider1: player,
        collider2: chaser,
        body1: Some(player),
        body2: Some(chaser),
    };
    world.write_message(contact(player, chaser));
    run_system_once(&mut world, contact_player);

    let strikes: Vec<_> = world.resource_mut::<Messages<PlayerStruck>>().drain().collect();
    assert_eq!(strikes.len(), 1);
    assert_eq!(strikes[0].source, chaser);
    assert!(!strikes[0].lethal);
    assert_eq!(*world.get::<PoolState>(chaser).unwrap(), PoolState::PendingReturn);

    // A second contact against the shelved instance is ignored.
    world.write_message(contact(player, chaser));
    run_system_once(&mut world, contact_player);
    assert!(world.resource_mut::<Messages<PlayerStruck>>().drain().next().is_none());
}

#[test]
fn repool_returns_only_shelved_instances() {
    let mut world = world();
    spawn_player(&mut world, 0.0);
    run_system_once(&mut world, spawn_chasers);
    let shelved = active_chasers(&mut world)[0];

    run_system_once(&mut world, spawn_chasers);
    let still_active = active_chasers(&mut world)
        .into_iter()
        .find(|e| *e != shelved)
        .unwrap();

    *world.get_mut::<PoolState>(shelved).unwrap() = PoolState::PendingReturn;

    world.insert_resource(fixed_time_with_delta(10.5));
    run_system_once(&mut world, commit_repool);

    assert_eq!(*world.get::<PoolState>(shelved).unwrap(), PoolState::Inactive);
    assert_eq!(*world.get::<PoolState>(still_active).unwrap(), PoolState::Active);
    assert_eq!(world.resource::<ChaserPool>().0.free_len(), 9);
}

#[test]
fn an_instance_active_at_its_deadline_is_spent_for_the_run() {
    let mut world = world();
    spawn_player(&mut world, 0.0);
    run_system_once(&mut world, spawn_chasers);
    let chaser = active_chasers(&mut world)[0];

    // The deadline fires while the instance is still in play: no release.
    world.insert_resource(fixed_time_with_delta(10.5));
    run_system_once(&mut world, commit_repool);
    assert_eq!(*world.get::<PoolState>(chaser).unwrap(), PoolState::Active);
    assert_eq!(world.resource::<ChaserPool>().0.free_len(), 9);

    // Shelving afterwards does not re-queue it either.
    *world.get_mut::<PoolState>(chaser).unwrap() = PoolState::PendingReturn;
    world.insert_resource(fixed_time_with_delta(0.5));
    run_system_once(&mut world, commit_repool);
    assert_eq!(*world.get::<PoolState>(chaser).unwrap(), PoolState::PendingReturn);
    assert_eq!(world.resource::<ChaserPool>().0.free_len(), 9);
}
