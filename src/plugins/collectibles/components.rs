use bevy::prelude::*;

use crate::common::messages::PowerUpKind;

/// Availability of a coin or power-up. Cleared on collection, restored when
/// the owning segment is reactivated.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collectible {
    pub available: bool,
}

/// The local pose and collision layers a segment child was pre-warmed with.
/// Segment reactivation restores exactly this, regardless of whatever the
/// previous active lifetime did to the child.
#[derive(Component, Debug, Clone)]
pub struct HomePose {
    pub translation: Vec3,
    pub layers: avian3d::prelude::CollisionLayers,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Coin {
    pub value: u32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct PowerUpPickup {
    pub kind: PowerUpKind,
}

/// Constant spin, purely cosmetic.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spin {
    pub degrees_per_sec: f32,
}
