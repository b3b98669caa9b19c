//! Feature plugins.
//!
//! Gameplay plugins are headless-safe; render-only plugins require the
//! full render stack and are registered separately.

use bevy::prelude::*;

pub mod audio;
pub mod collectibles;
pub mod core;
pub mod enemies;
pub mod physics;
pub mod player;
pub mod scoring;
pub mod track;
pub mod ui;

// Render-only
pub mod camera;
pub mod render;

/// Fixed-step simulation order. Contact classification happens later, in
/// `FixedPostUpdate`, after the physics event pass.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Player,
    Buffs,
    Track,
    Chasers,
    Scoring,
}

/// Contact pipeline in `FixedPostUpdate`: classifiers turn Avian contact
/// messages into domain messages, then consumers apply them. Pool return
/// commits run after both.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSet {
    Classify,
    Apply,
    Commit,
}

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Player,
            SimSet::Buffs,
            SimSet::Track,
            SimSet::Chasers,
            SimSet::Scoring,
        )
            .chain(),
    );

    app.configure_sets(
        FixedPostUpdate,
        (ContactSet::Classify, ContactSet::Apply, ContactSet::Commit)
            .chain()
            .after(avian3d::collision::narrow_phase::CollisionEventSystems),
    );

    core::plugin(app);
    physics::plugin(app);
    player::plugin(app);
    track::plugin(app);
    enemies::plugin(app);
    collectibles::plugin(app);
    scoring::plugin(app);
    audio::plugin(app);
    ui::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    render::plugin(app);
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
