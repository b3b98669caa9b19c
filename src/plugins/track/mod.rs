//! Track plugin: the rolling segment window.
//!
//! Segments are pooled: three instances per kind are built once per run
//! entry, complete with their coin/power-up/obstacle children, and then
//! recycled as the player advances. Activation never rebuilds children; it
//! restores each child to its pre-warmed pose and availability, which is
//! what makes reuse invisible to the player.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::{Layer, live};
use crate::common::messages::PowerUpKind;
use crate::common::pool::{EntityPool, PoolState};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::collectibles::components::{Coin, Collectible, HomePose, PowerUpPickup, Spin};
use crate::plugins::{ContactSet, SimSet};

mod contacts;
mod stream;

pub use stream::{SegmentPool, SegmentStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Open,
    CoinArc,
    Gauntlet,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 3] = [
        SegmentKind::Open,
        SegmentKind::CoinArc,
        SegmentKind::Gauntlet,
    ];
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Segment {
    pub kind: SegmentKind,
}

/// A damaging volume. `armed` drops on the first player contact and is
/// restored together with the collectibles when the segment reactivates.
#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle {
    pub deadly: bool,
    pub armed: bool,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (prewarm_segments, stream::seed_initial_window).chain(),
    );

    app.add_systems(
        FixedUpdate,
        stream::advance_stream
            .in_set(SimSet::Track)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        contacts::strike_on_contact
            .in_set(ContactSet::Classify)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Build the per-kind pools. Kind tags are stored at pre-warm time; no
/// name matching anywhere.
fn prewarm_segments(mut commands: Commands, tunables: Res<Tunables>) {
    let per_kind = tunables.track.pool_size_per_kind;
    let lane = tunables.player.lane_distance;

    let mut pool = EntityPool::new(SegmentKind::ALL.len() * per_kind);
    for kind in SegmentKind::ALL {
        for _ in 0..per_kind {
            let seg = spawn_segment(&mut commands, kind, lane);
            pool.prewarm(kind, seg);
        }
    }

    commands.insert_resource(SegmentPool(pool));
    commands.insert_resource(SegmentStream::default());
}

fn spawn_segment(commands: &mut Commands, kind: SegmentKind, lane: f32) -> Entity {
    commands
        .spawn((
            Name::new(format!("Segment({kind:?})")),
            Segment { kind },
            PoolState::Inactive,
            Transform::from_xyz(0.0, 0.0, 0.0),
            Visibility::Hidden,
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|parent| match kind {
            SegmentKind::Open => {
                for i in 0..6 {
                    parent.spawn(coin(0.0, 8.0 + 6.0 * i as f32, 1));
                }
                parent.spawn(power_up(PowerUpKind::Magnet, -lane, 42.0));
            }
            SegmentKind::CoinArc => {
                let arc = [-lane, 0.0, lane, 0.0, -lane];
                for (i, x) in arc.into_iter().enumerate() {
                    parent.spawn(coin(x, 10.0 + 7.0 * i as f32, 1));
                }
                parent.spawn(obstacle(lane, 20.0, false));
                parent.spawn(power_up(PowerUpKind::Shield, 0.0, 44.0));
            }
            SegmentKind::Gauntlet => {
                parent.spawn(obstacle(0.0, 15.0, false));
                parent.spawn(obstacle(-lane, 30.0, true));
                for i in 0..4 {
                    parent.spawn(coin(lane, 10.0 + 5.0 * i as f32, 1));
                }
                // One gem, worth a handful of coins.
                parent.spawn(coin(lane, 45.0, 5));
            }
        })
        .id()
}

fn coin(x: f32, z: f32, value: u32) -> impl Bundle {
    let layers = live(Layer::Coin);
    (
        Name::new(if value > 1 { "Gem" } else { "Coin" }),
        Coin { value },
        Collectible { available: true },
        Spin {
            degrees_per_sec: 100.0,
        },
        HomePose {
            translation: Vec3::new(x, 1.0, z),
            layers,
        },
        Transform::from_xyz(x, 1.0, z),
        Visibility::Inherited,
        Collider::sphere(0.4),
        Sensor,
        layers,
    )
}

fn power_up(kind: PowerUpKind, x: f32, z: f32) -> impl Bundle {
    let layers = live(Layer::PowerUp);
    (
        Name::new(format!("PowerUp({kind:?})")),
        PowerUpPickup { kind },
        Collectible { available: true },
        Spin {
            degrees_per_sec: 60.0,
        },
        HomePose {
            translation: Vec3::new(x, 1.2, z),
            layers,
        },
        Transform::from_xyz(x, 1.2, z),
        Visibility::Inherited,
        Collider::sphere(0.5),
        Sensor,
        layers,
    )
}

fn obstacle(x: f32, z: f32, deadly: bool) -> impl Bundle {
    let layers = live(Layer::Obstacle);
    (
        Name::new(if deadly { "Obstacle(Deadly)" } else { "Obstacle" }),
        Obstacle {
            deadly,
            armed: true,
        },
        HomePose {
            translation: Vec3::new(x, 0.75, z),
            layers,
        },
        Transform::from_xyz(x, 0.75, z),
        Visibility::Inherited,
        Collider::cuboid(1.6, 1.5, 1.0),
        Sensor,
        layers,
    )
}

#[cfg(test)]
mod tests;
