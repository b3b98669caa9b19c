//! Main menu screen.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::settings::SettingsStore;
use crate::common::state::GameState;

use super::{UiAction, button, screen_root};

#[derive(Component)]
pub(super) struct VolumeLabel;

pub(super) fn spawn_main_menu(mut commands: Commands, store: Res<SettingsStore>) {
    commands
        .spawn((screen_root("MainMenu"), DespawnOnExit(GameState::MainMenu)))
        .with_children(|parent| {
            parent.spawn((
                Text::new("LANE RUNNER"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(12.0)),
                    ..default()
                },
            ));
            parent.spawn((
                Text::new(format!("Best: {}", store.current.best_score)),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.5)),
                Node {
                    margin: UiRect::bottom(Val::Px(24.0)),
                    ..default()
                },
            ));

            parent.spawn(button(UiAction::Play, "Play"));

            parent
                .spawn(Node {
                    align_items: AlignItems::Center,
                    margin: UiRect::all(Val::Px(6.0)),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn(button(UiAction::VolumeDown, "-"));
                    row.spawn((
                        VolumeLabel,
                        Text::new(volume_text(&store)),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        Node {
                            margin: UiRect::horizontal(Val::Px(10.0)),
                            ..default()
                        },
                    ));
                    row.spawn(button(UiAction::VolumeUp, "+"));
                });

            parent.spawn(button(UiAction::Quit, "Quit"));
        });
}

pub(super) fn sync_volume_labels(
    store: Res<SettingsStore>,
    mut q_labels: Query<&mut Text, With<VolumeLabel>>,
) {
    for mut text in &mut q_labels {
        text.0 = volume_text(&store);
    }
}

fn volume_text(store: &SettingsStore) -> String {
    format!("Volume {:.0}%", store.current.game_volume * 100.0)
}
