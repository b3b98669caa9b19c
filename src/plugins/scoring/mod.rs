//! Scoring plugin.
//!
//! Score is recomputed from facts every tick rather than incremented in
//! place: distance comes from the player's run motion, coins from the
//! wallet. The final snapshot is taken from these resources when the run
//! ends, so it never depends on the player entity outliving the state
//! transition.

use bevy::prelude::*;

use crate::common::messages::{CoinCollected, PlaySfx, Sfx};
use crate::common::settings::SettingsStore;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::SimSet;
use crate::plugins::player::{Player, RunMotion};

/// Coins banked this run.
#[derive(Resource, Debug, Default)]
pub struct CoinWallet {
    pub coins: u64,
}

/// Live score for the current run.
#[derive(Resource, Debug, Default)]
pub struct RunScore {
    pub score: u64,
    pub distance: f32,
}

/// Snapshot of the finished run, read by the game-over screen.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FinalRunStats {
    pub score: u64,
    pub coins: u64,
    pub distance: f32,
    pub new_record: bool,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<CoinWallet>();
    app.init_resource::<RunScore>();

    app.add_systems(OnEnter(GameState::InGame), reset_run);

    app.add_systems(
        FixedUpdate,
        (bank_coins, recompute_score)
            .chain()
            .in_set(SimSet::Scoring)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(OnEnter(GameState::GameOver), capture_final_stats);
}

/// Total run score from its parts. Distance contributes its multiplied
/// floor; coins count face value.
pub fn compute_score(distance: f32, multiplier: f32, coins: u64) -> u64 {
    (distance.max(0.0) * multiplier) as u64 + coins
}

fn reset_run(mut wallet: ResMut<CoinWallet>, mut score: ResMut<RunScore>) {
    *wallet = CoinWallet::default();
    *score = RunScore::default();
}

fn bank_coins(mut collected: MessageReader<CoinCollected>, mut wallet: ResMut<CoinWallet>) {
    for msg in collected.read() {
        wallet.coins += u64::from(msg.value);
    }
}

fn recompute_score(
    tunables: Res<Tunables>,
    wallet: Res<CoinWallet>,
    mut score: ResMut<RunScore>,
    q_player: Query<&RunMotion, With<Player>>,
) {
    let Ok(motion) = q_player.single() else {
        return;
    };
    score.distance = motion.distance;
    score.score = compute_score(motion.distance, tunables.score_multiplier, wallet.coins);
}

/// Snapshot the finished run and roll the best score forward.
pub fn capture_final_stats(
    mut commands: Commands,
    wallet: Res<CoinWallet>,
    score: Res<RunScore>,
    mut store: ResMut<SettingsStore>,
    mut sfx: MessageWriter<PlaySfx>,
) {
    let new_record = score.score > store.current.best_score;
    if new_record {
        store.current.best_score = score.score;
        store.persist();
        sfx.write(PlaySfx(Sfx::NewRecord));
    }

    commands.insert_resource(FinalRunStats {
        score: score.score,
        coins: wallet.coins,
        distance: score.distance,
        new_record,
    });
}
