//! Obstacle contact classification.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::contact::split_contact;
use crate::common::messages::PlayerStruck;
use crate::plugins::player::Player;

use super::Obstacle;

/// One strike per armed obstacle: report it and disarm the volume. The
/// player decides what the hit means (shield, stumble, death).
pub(super) fn strike_on_contact(
    mut started: MessageReader<CollisionStart>,
    q_player: Query<(), With<Player>>,
    mut q_obstacles: Query<(&mut Obstacle, &mut Visibility, &mut CollisionLayers)>,
    mut strikes: MessageWriter<PlayerStruck>,
) {
    for ev in started.read() {
        let Some((_, other)) = split_contact(ev, |e| q_player.contains(e)) else {
            continue;
        };
        let Ok((mut obstacle, mut vis, mut layers)) = q_obstacles.get_mut(other) else {
            continue;
        };
        if !obstacle.armed {
            continue;
        }
        obstacle.armed = false;
        *vis = Visibility::Hidden;
        layers.filters = LayerMask::NONE;

        strikes.write(PlayerStruck {
            source: other,
            lethal: obstacle.deadly,
        });
    }
}
