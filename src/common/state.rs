//! Global state machine.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    InGame,
    GameOver,
}

/// In-run pause flag.
///
/// The heavy lifting is done by pausing `Time<Virtual>` (which freezes the
/// fixed schedule and every gameplay timer at once); this resource exists so
/// input systems can also discard presses buffered while frozen.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Paused(pub bool);
