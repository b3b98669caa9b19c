//! Domain messages.
//!
//! Gameplay objects never mutate the player directly: contact systems
//! classify physics events into these messages, and the player state
//! machine is the single consumer that applies them. Producers stay free
//! of `ResMut` borrows on state they do not own.

use bevy::prelude::*;

/// Closed set of power-up variants. Dispatch over this enum replaces the
/// open-ended subclass-per-power-up design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Magnet,
    Shield,
}

/// The player touched something damaging.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerStruck {
    pub source: Entity,
    /// Deadly obstacles kill outright, bypassing shield and health.
    pub lethal: bool,
}

/// A coin was picked up on contact (never by the magnet itself).
#[derive(Message, Debug, Clone, Copy)]
pub struct CoinCollected {
    pub value: u32,
}

/// A power-up was picked up; the player decides what the kind means.
#[derive(Message, Debug, Clone, Copy)]
pub struct PowerUpCollected {
    pub kind: PowerUpKind,
}

/// One-shot sound effects. Every handle is optional; the audio consumer
/// silently skips kinds with no clip configured.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySfx(pub Sfx);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    Jump,
    LaneChange,
    ObstacleHit,
    CoinPickup,
    PowerUpPickup,
    ChaserAlert,
    NewRecord,
}

/// Music control, consumed by the audio plugin.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCmd {
    StopGame,
    PauseGame,
    ResumeGame,
}
