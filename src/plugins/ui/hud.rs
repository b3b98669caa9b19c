//! In-game HUD.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::{Buffs, Player};
use crate::plugins::scoring::{CoinWallet, RunScore};

#[derive(Component)]
pub(super) struct ScoreText;

#[derive(Component)]
pub(super) struct CoinText;

#[derive(Component)]
pub(super) struct DistanceText;

#[derive(Component)]
pub(super) struct ShieldText;

pub(super) fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Hud"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|parent| {
            parent.spawn((ScoreText, hud_line("Score 0")));
            parent.spawn((CoinText, hud_line("Coins 0")));
            parent.spawn((DistanceText, hud_line("Distance 0m")));
            parent.spawn((ShieldText, hud_line(""), Visibility::Hidden));
        });
}

fn hud_line(initial: &str) -> impl Bundle {
    (
        Text::new(initial),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

pub(super) fn sync_hud(
    wallet: Res<CoinWallet>,
    score: Res<RunScore>,
    q_player: Query<&Buffs, With<Player>>,
    mut q_score: Query<&mut Text, (With<ScoreText>, Without<CoinText>, Without<DistanceText>, Without<ShieldText>)>,
    mut q_coins: Query<&mut Text, (With<CoinText>, Without<ScoreText>, Without<DistanceText>, Without<ShieldText>)>,
    mut q_distance: Query<&mut Text, (With<DistanceText>, Without<ScoreText>, Without<CoinText>, Without<ShieldText>)>,
    mut q_shield: Query<(&mut Text, &mut Visibility), (With<ShieldText>, Without<ScoreText>, Without<CoinText>, Without<DistanceText>)>,
) {
    if let Ok(mut text) = q_score.single_mut() {
        text.0 = format!("Score {}", score.score);
    }
    if let Ok(mut text) = q_coins.single_mut() {
        text.0 = format!("Coins {}", wallet.coins);
    }
    if let Ok(mut text) = q_distance.single_mut() {
        text.0 = format!("Distance {}m", score.distance.max(0.0).floor() as u64);
    }
    if let (Ok((mut text, mut vis)), Ok(buffs)) = (q_shield.single_mut(), q_player.single()) {
        match &buffs.shield {
            Some(shield) if shield.charges() > 0 => {
                let left = shield.expiry.remaining_secs();
                text.0 = format!("Shield x{}  {left:.1}s", shield.charges());
                *vis = Visibility::Inherited;
            }
            _ => *vis = Visibility::Hidden,
        }
    }
}
