use bevy::prelude::*;

use crate::common::messages::MusicCmd;
use crate::common::settings::{Settings, SettingsStore};
use crate::common::state::{GameState, Paused};
use crate::common::test_utils::run_system_once;
use crate::plugins::core::RunRng;

use super::*;

fn world() -> World {
    let mut world = World::new();
    world.init_resource::<NextState<GameState>>();
    world.init_resource::<Paused>();
    world.init_resource::<Time<Virtual>>();
    world.insert_resource(SettingsStore::ephemeral(Settings::default()));
    world.insert_resource(RunRng::seeded(3));
    world.init_resource::<Messages<MusicCmd>>();
    world.init_resource::<Messages<AppExit>>();
    world
}

fn press(world: &mut World, action: UiAction) {
    world.spawn((Button, action, Interaction::Pressed));
    run_system_once(world, handle_buttons);
}

fn pending_state(world: &World) -> Option<GameState> {
    match world.resource::<NextState<GameState>>() {
        NextState::Pending(s) => Some(*s),
        NextState::PendingIfNeq(s) => Some(*s),
        NextState::Unchanged => None,
    }
}

#[test]
fn play_starts_a_run() {
    let mut world = world();
    press(&mut world, UiAction::Play);
    assert_eq!(pending_state(&world), Some(GameState::InGame));
}

#[test]
fn back_to_menu_also_unpauses() {
    let mut world = world();
    world.resource_mut::<Paused>().0 = true;
    world.resource_mut::<Time<Virtual>>().pause();

    press(&mut world, UiAction::BackToMenu);

    assert_eq!(pending_state(&world), Some(GameState::MainMenu));
    assert!(!world.resource::<Paused>().0);
    assert!(!world.resource::<Time<Virtual>>().is_paused());
}

#[test]
fn resume_unpauses_and_resumes_music() {
    let mut world = world();
    world.resource_mut::<Paused>().0 = true;
    world.resource_mut::<Time<Virtual>>().pause();

    press(&mut world, UiAction::Resume);

    assert!(!world.resource::<Paused>().0);
    let resumed = world
        .resource_mut::<Messages<MusicCmd>>()
        .drain()
        .any(|m| m == MusicCmd::ResumeGame);
    assert!(resumed);
}

#[test]
fn volume_steps_clamp_at_the_ends() {
    let mut world = world();
    for _ in 0..20 {
        press(&mut world, UiAction::VolumeUp);
    }
    assert_eq!(world.resource::<SettingsStore>().current.game_volume, 1.0);

    for _ in 0..30 {
        press(&mut world, UiAction::VolumeDown);
    }
    assert_eq!(world.resource::<SettingsStore>().current.game_volume, 0.0);
    assert_eq!(world.resource::<SettingsStore>().current.menu_volume, 0.0);
}

#[test]
fn escape_toggles_pause_and_music() {
    let mut world = world();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Escape);
    world.insert_resource(keys);

    run_system_once(&mut world, pause::toggle_on_escape);
    assert!(world.resource::<Paused>().0);
    assert!(world.resource::<Time<Virtual>>().is_paused());

    run_system_once(&mut world, pause::toggle_on_escape);
    assert!(!world.resource::<Paused>().0);
    assert!(!world.resource::<Time<Virtual>>().is_paused());

    let cmds: Vec<_> = world.resource_mut::<Messages<MusicCmd>>().drain().collect();
    assert_eq!(cmds, vec![MusicCmd::PauseGame, MusicCmd::ResumeGame]);
}

#[test]
fn pause_panel_follows_the_pause_flag() {
    let mut world = world();

    world.resource_mut::<Paused>().0 = true;
    run_system_once(&mut world, pause::sync_pause_panel);
    assert_eq!(world.query::<&PausePanel>().iter(&world).count(), 1);

    // Re-running while paused does not stack panels.
    run_system_once(&mut world, pause::sync_pause_panel);
    assert_eq!(world.query::<&PausePanel>().iter(&world).count(), 1);

    world.resource_mut::<Paused>().0 = false;
    run_system_once(&mut world, pause::sync_pause_panel);
    assert_eq!(world.query::<&PausePanel>().iter(&world).count(), 0);
}
