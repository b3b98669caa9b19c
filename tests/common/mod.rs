//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `lane_runner::game::configure_headless` installs the gameplay plugins.
//!
//! Settings are swapped for an in-memory store so tests never touch the
//! real settings file.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

use lane_runner::common::settings::{Settings, SettingsStore};
use lane_runner::common::state::GameState;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    // Avian's collider cache listens for `AssetEvent<Mesh>`; headless there
    // is no mesh plugin, so register the asset type by hand.
    app.init_asset::<Mesh>();

    lane_runner::game::configure_headless(&mut app);
    app.insert_resource(SettingsStore::ephemeral(Settings::default()));
    app
}

/// Enter a state and tick once so OnEnter systems and their commands run.
pub fn enter_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

/// Run one fixed simulation step with a hand-picked delta.
///
/// `MinimalPlugins` advances real time by however long the test takes, so
/// the fixed schedules are driven directly instead of waiting for the
/// accumulator.
#[allow(dead_code)]
pub fn fixed_step(app: &mut App, dt: f32) {
    let mut time = Time::<Fixed>::default();
    time.advance_by(Duration::from_secs_f32(dt));
    app.world_mut().insert_resource(time);

    app.world_mut().run_schedule(FixedUpdate);
    app.world_mut().run_schedule(FixedPostUpdate);
}
