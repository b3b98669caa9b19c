//! Core plugin: shared resources, message channels and global settings.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::common::messages::{CoinCollected, MusicCmd, PlaySfx, PlayerStruck, PowerUpCollected};
use crate::common::settings::SettingsStore;
use crate::common::state::Paused;
use crate::common::tunables::Tunables;

/// Run-scoped RNG, passed explicitly so tests can seed it.
#[derive(Resource, Debug)]
pub struct RunRng(pub SmallRng);

impl Default for RunRng {
    fn default() -> Self {
        Self(SmallRng::from_os_rng())
    }
}

impl RunRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.init_resource::<RunRng>();
    app.init_resource::<SettingsStore>();
    app.init_resource::<Paused>();

    app.add_message::<PlayerStruck>();
    app.add_message::<CoinCollected>();
    app.add_message::<PowerUpCollected>();
    app.add_message::<PlaySfx>();
    app.add_message::<MusicCmd>();
}
