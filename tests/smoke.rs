mod common;

use bevy::prelude::*;

use lane_runner::common::pool::PoolState;
use lane_runner::common::state::GameState;
use lane_runner::plugins::enemies::Chaser;
use lane_runner::plugins::player::Player;
use lane_runner::plugins::track::Segment;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();
    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn entering_in_game_builds_the_run() {
    let mut app = common::app_headless();
    common::enter_state(&mut app, GameState::InGame);
    app.update();

    let world = app.world_mut();

    let players = world.query::<&Player>().iter(world).count();
    assert_eq!(players, 1);

    // Nine pooled segments, six of them laid out as the initial window.
    let segment_states: Vec<PoolState> = world
        .query_filtered::<&PoolState, With<Segment>>()
        .iter(world)
        .copied()
        .collect();
    assert_eq!(segment_states.len(), 9);
    let active = segment_states
        .iter()
        .filter(|s| **s == PoolState::Active)
        .count();
    assert_eq!(active, 6);

    let chasers = world.query::<&Chaser>().iter(world).count();
    assert_eq!(chasers, 10);
}

#[test]
fn leaving_the_run_despawns_everything_scoped_to_it() {
    let mut app = common::app_headless();
    common::enter_state(&mut app, GameState::InGame);
    app.update();
    common::enter_state(&mut app, GameState::MainMenu);
    app.update();

    let world = app.world_mut();
    assert_eq!(world.query::<&Player>().iter(world).count(), 0);
    assert_eq!(world.query::<&Segment>().iter(world).count(), 0);
    assert_eq!(world.query::<&Chaser>().iter(world).count(), 0);
}

#[test]
fn a_fresh_run_rebuilds_the_pools() {
    let mut app = common::app_headless();
    common::enter_state(&mut app, GameState::InGame);
    app.update();
    common::enter_state(&mut app, GameState::MainMenu);
    app.update();
    common::enter_state(&mut app, GameState::InGame);
    app.update();

    let world = app.world_mut();
    assert_eq!(world.query::<&Segment>().iter(world).count(), 9);
    assert_eq!(world.query::<&Chaser>().iter(world).count(), 10);
    assert_eq!(world.query::<&Player>().iter(world).count(), 1);
}
