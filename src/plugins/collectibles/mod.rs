//! Collectibles plugin: coin and power-up pickups.
//!
//! Pickups are passive sensor volumes owned by track segments. This plugin
//! classifies player contacts into domain messages and shelves the touched
//! child; the track plugin restores shelved children on segment
//! reactivation.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::contact::split_contact;
use crate::common::layers::{Layer, inert};
use crate::common::messages::{CoinCollected, PlaySfx, PowerUpCollected, Sfx};
use crate::common::state::GameState;
use crate::plugins::ContactSet;
use crate::plugins::player::Player;

pub mod components;

use components::{Coin, Collectible, PowerUpPickup, Spin};

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        collect_on_contact
            .in_set(ContactSet::Classify)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(Update, spin_pickups.run_if(in_state(GameState::InGame)));
}

/// Classify player/pickup contacts. Each pickup fires at most once per
/// active lifetime: the availability flag drops on the first contact and
/// only segment reactivation raises it again.
fn collect_on_contact(
    mut started: MessageReader<CollisionStart>,
    q_player: Query<(), With<Player>>,
    mut q_coins: Query<
        (&Coin, &mut Collectible, &mut Visibility, &mut CollisionLayers),
        Without<PowerUpPickup>,
    >,
    mut q_powerups: Query<
        (
            &PowerUpPickup,
            &mut Collectible,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        Without<Coin>,
    >,
    mut coins_out: MessageWriter<CoinCollected>,
    mut powerups_out: MessageWriter<PowerUpCollected>,
    mut sfx: MessageWriter<PlaySfx>,
) {
    for ev in started.read() {
        let Some((_, other)) = split_contact(ev, |e| q_player.contains(e)) else {
            continue;
        };

        if let Ok((coin, mut collectible, mut vis, mut layers)) = q_coins.get_mut(other) {
            if !collectible.available {
                continue;
            }
            collectible.available = false;
            *vis = Visibility::Hidden;
            *layers = inert(Layer::Coin);

            coins_out.write(CoinCollected { value: coin.value });
            sfx.write(PlaySfx(Sfx::CoinPickup));
            continue;
        }

        if let Ok((pickup, mut collectible, mut vis, mut layers)) =
            q_powerups.get_mut(other)
        {
            if !collectible.available {
                continue;
            }
            collectible.available = false;
            *vis = Visibility::Hidden;
            *layers = inert(Layer::PowerUp);

            powerups_out.write(PowerUpCollected { kind: pickup.kind });
            sfx.write(PlaySfx(Sfx::PowerUpPickup));
        }
    }
}

fn spin_pickups(time: Res<Time>, mut q: Query<(&Spin, &mut Transform)>) {
    let dt = time.delta_secs();
    for (spin, mut tf) in &mut q {
        tf.rotate_y(spin.degrees_per_sec.to_radians() * dt);
    }
}
