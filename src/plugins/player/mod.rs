//! Player plugin: the central state machine.
//!
//! Pipeline:
//! - Update: latch pressed-this-tick control intents.
//! - FixedUpdate (`SimSet::Player`): movement integration, then timed
//!   transitions (slide end, stumble recovery, death deadline).
//! - FixedUpdate (`SimSet::Buffs`): power-up application, shield, magnet.
//! - FixedPostUpdate (`ContactSet::Apply`): strike intake, after the
//!   contact classifiers have run.
//!
//! The player owns all of its state; every other system communicates with
//! it through messages.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::{ContactSet, SimSet};

pub mod components;

mod buffs;
mod damage;
mod input;
mod movement;

pub use components::*;

/// Resting Y of the player capsule centre.
pub const PLAYER_GROUND_Y: f32 = 1.0;

pub(crate) fn standing_collider() -> Collider {
    Collider::capsule(0.4, 1.2)
}

/// Slide crouches the hitbox to half height.
pub(crate) fn sliding_collider() -> Collider {
    Collider::capsule(0.4, 0.2)
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ControlIntent>();

    app.add_systems(OnEnter(GameState::InGame), spawn);

    app.add_systems(
        Update,
        input::gather_control_intent.run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        (
            movement::apply_player_motion,
            movement::resolve_slide,
            movement::resolve_stumble,
            movement::resolve_death_deadline,
        )
            .chain()
            .in_set(SimSet::Player)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        (buffs::apply_powerups, buffs::tick_shield, buffs::tick_magnet)
            .chain()
            .in_set(SimSet::Buffs)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        damage::intake_strikes
            .in_set(ContactSet::Apply)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(ControlIntent::default());

    commands.spawn((
        Name::new("Player"),
        Player,
        Lane(1),
        LaneGlide::default(),
        RunMotion::new(0.0),
        Stance::Running,
        Vitals::new(tunables.player.max_health),
        Buffs::default(),
        CharacterAnimator {
            running: true,
            ..default()
        },
        (
            Transform::from_xyz(0.0, PLAYER_GROUND_Y, 0.0),
            Visibility::default(),
        ),
        RigidBody::Kinematic,
        standing_collider(),
        CollisionLayers::new(
            Layer::Player,
            [Layer::Coin, Layer::PowerUp, Layer::Obstacle, Layer::Chaser],
        ),
        // Contact opt-in lives on the player; every gameplay contact has it
        // on one side.
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}
