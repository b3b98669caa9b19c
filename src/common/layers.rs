//! Collision layers.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Track,
    Player,
    Coin,
    PowerUp,
    Obstacle,
    Chaser,
}

/// Layers for a gameplay volume that should contact the player.
#[inline]
pub fn live(member: Layer) -> CollisionLayers {
    CollisionLayers::new(member, [Layer::Player])
}

/// "Disabled" without structural changes: empty filters means the volume
/// contacts nothing and therefore generates no collision messages.
#[inline]
pub fn inert(member: Layer) -> CollisionLayers {
    CollisionLayers::new(member, [] as [Layer; 0])
}
