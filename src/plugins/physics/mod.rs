//! Physics plugin.
//!
//! Avian is used purely as a trigger/overlap service. Gravity is zero at
//! the physics level: the player's vertical motion is integrated by its
//! own state machine so the jump arc stays hand-tuned.

use avian3d::prelude::*;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::ZERO));
}
