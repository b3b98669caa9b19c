//! UI plugin: menus, HUD and the pause overlay.
//!
//! Every interactive element carries a [`UiAction`]; one dispatcher maps
//! presses to state transitions, pause toggles and settings edits. Screens
//! are state-scoped and rebuilt on entry, so no screen ever syncs with
//! stale entities from a previous visit.

use bevy::prelude::*;

use crate::common::messages::MusicCmd;
use crate::common::settings::SettingsStore;
use crate::common::state::{GameState, Paused};

mod game_over;
mod hud;
mod menu;
mod pause;

pub use pause::PausePanel;

const VOLUME_STEP: f32 = 0.1;

/// Shown one at a time on the pause and game-over panels.
const TIPS: [&str; 4] = [
    "Deadly obstacles ignore your shield. Jump them.",
    "The run speeds up the longer you stay on your feet.",
    "Chasers give up if you leave them behind.",
    "Slide under what you cannot jump over.",
];

/// What a button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Play,
    Quit,
    Resume,
    BackToMenu,
    TryAgain,
    VolumeDown,
    VolumeUp,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::MainMenu), menu::spawn_main_menu);
    app.add_systems(OnEnter(GameState::InGame), hud::spawn_hud);
    // The final stats resource is inserted by the scoring capture; order
    // against it so the screen reads this run's numbers.
    app.add_systems(
        OnEnter(GameState::GameOver),
        game_over::spawn_game_over.after(crate::plugins::scoring::capture_final_stats),
    );

    app.add_systems(
        Update,
        (
            handle_buttons,
            button_visuals,
            menu::sync_volume_labels.run_if(resource_changed::<SettingsStore>),
            hud::sync_hud.run_if(in_state(GameState::InGame)),
            pause::toggle_on_escape.run_if(in_state(GameState::InGame)),
            pause::sync_pause_panel.run_if(resource_changed::<Paused>),
        ),
    );
}

fn handle_buttons(
    q_buttons: Query<(&Interaction, &UiAction), Changed<Interaction>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut paused: ResMut<Paused>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut store: ResMut<SettingsStore>,
    mut music: MessageWriter<MusicCmd>,
    mut app_exit: MessageWriter<AppExit>,
) {
    for (interaction, action) in &q_buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            UiAction::Play | UiAction::TryAgain => {
                pause::clear(&mut paused, &mut virtual_time);
                next_state.set(GameState::InGame);
            }
            UiAction::Quit => {
                app_exit.write(AppExit::Success);
            }
            UiAction::Resume => {
                pause::clear(&mut paused, &mut virtual_time);
                music.write(MusicCmd::ResumeGame);
            }
            UiAction::BackToMenu => {
                pause::clear(&mut paused, &mut virtual_time);
                next_state.set(GameState::MainMenu);
            }
            UiAction::VolumeDown => {
                adjust_volumes(&mut store, -VOLUME_STEP);
            }
            UiAction::VolumeUp => {
                adjust_volumes(&mut store, VOLUME_STEP);
            }
        }
    }
}

fn adjust_volumes(store: &mut SettingsStore, delta: f32) {
    store.current.menu_volume = (store.current.menu_volume + delta).clamp(0.0, 1.0);
    store.current.game_volume = (store.current.game_volume + delta).clamp(0.0, 1.0);
    store.persist();
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.32);
const BUTTON_PRESSED: Color = Color::srgb(0.35, 0.35, 0.45);

fn button_visuals(
    mut q_buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in &mut q_buttons {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVER,
            Interaction::None => BUTTON_IDLE,
        };
    }
}

/// Shared button bundle.
fn button(action: UiAction, label: &str) -> impl Bundle {
    (
        Button,
        action,
        Node {
            width: Val::Px(220.0),
            height: Val::Px(48.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            margin: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(BUTTON_IDLE),
        children![(
            Text::new(label),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(Color::WHITE),
        )],
    )
}

fn screen_root(name: &str) -> impl Bundle {
    (
        Name::new(name.to_string()),
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
    )
}

#[cfg(test)]
mod tests;
