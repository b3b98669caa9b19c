//! Game-over screen.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use rand::Rng;

use crate::common::settings::SettingsStore;
use crate::common::state::GameState;
use crate::plugins::core::RunRng;
use crate::plugins::scoring::FinalRunStats;

use super::{TIPS, UiAction, button, screen_root};

pub(super) fn spawn_game_over(
    mut commands: Commands,
    stats: Option<Res<FinalRunStats>>,
    store: Res<SettingsStore>,
    mut rng: ResMut<RunRng>,
) {
    let stats = stats.map(|s| *s).unwrap_or(FinalRunStats {
        score: 0,
        coins: 0,
        distance: 0.0,
        new_record: false,
    });

    commands
        .spawn((screen_root("GameOver"), DespawnOnExit(GameState::GameOver)))
        .with_children(|parent| {
            parent.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.3, 0.3)),
                Node {
                    margin: UiRect::bottom(Val::Px(16.0)),
                    ..default()
                },
            ));

            if stats.new_record {
                parent.spawn((
                    Text::new("NEW RECORD!"),
                    TextFont {
                        font_size: 32.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.95, 0.85, 0.2)),
                    Node {
                        margin: UiRect::bottom(Val::Px(10.0)),
                        ..default()
                    },
                ));
            }

            parent.spawn(stat_line(format!("Score  {}", stats.score)));
            parent.spawn(stat_line(format!("Coins  {}", stats.coins)));
            parent.spawn(stat_line(format!(
                "Distance  {}m",
                stats.distance.max(0.0).floor() as u64
            )));
            parent.spawn(stat_line(format!("Best  {}", store.current.best_score)));

            let tip = TIPS[rng.0.random_range(0..TIPS.len())];
            parent.spawn((
                Text::new(tip),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
                Node {
                    margin: UiRect::vertical(Val::Px(14.0)),
                    ..default()
                },
            ));

            parent.spawn(button(UiAction::TryAgain, "Try Again"));
            parent.spawn(button(UiAction::BackToMenu, "Main Menu"));
        });
}

fn stat_line(text: String) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            margin: UiRect::bottom(Val::Px(4.0)),
            ..default()
        },
    )
}
