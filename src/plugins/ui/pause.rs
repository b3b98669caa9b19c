//! Pause overlay.
//!
//! Pausing freezes the virtual clock, which stops every fixed-step system
//! without touching any gameplay state. The overlay itself is rebuilt on
//! each pause so the tip line varies between visits.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::messages::MusicCmd;
use crate::common::state::{GameState, Paused};
use crate::plugins::core::RunRng;

use super::{TIPS, UiAction, button, screen_root};

#[derive(Component)]
pub struct PausePanel;

pub(super) fn toggle_on_escape(
    // Optional so headless worlds without an input plugin still run.
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut paused: ResMut<Paused>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut music: MessageWriter<MusicCmd>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }
    if paused.0 {
        clear(&mut paused, &mut virtual_time);
        music.write(MusicCmd::ResumeGame);
    } else {
        paused.0 = true;
        virtual_time.pause();
        music.write(MusicCmd::PauseGame);
    }
}

/// Unpause. Shared with the button dispatcher so every resume path agrees.
pub(super) fn clear(paused: &mut Paused, virtual_time: &mut Time<Virtual>) {
    paused.0 = false;
    virtual_time.unpause();
}

pub(super) fn sync_pause_panel(
    mut commands: Commands,
    paused: Res<Paused>,
    mut rng: ResMut<RunRng>,
    q_panels: Query<Entity, With<PausePanel>>,
) {
    if paused.0 {
        if !q_panels.is_empty() {
            return;
        }
        let tip = TIPS[rng.0.random_range(0..TIPS.len())];
        commands
            .spawn((
                screen_root("PausePanel"),
                PausePanel,
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                DespawnOnExit(GameState::InGame),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new("PAUSED"),
                    TextFont {
                        font_size: 48.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
                parent.spawn((
                    Text::new(tip),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.7, 0.7, 0.7)),
                    Node {
                        margin: UiRect::vertical(Val::Px(16.0)),
                        ..default()
                    },
                ));
                parent.spawn(button(UiAction::Resume, "Resume"));
                parent.spawn(button(UiAction::BackToMenu, "Main Menu"));
            });
    } else {
        for e in &q_panels {
            commands.entity(e).despawn();
        }
    }
}
