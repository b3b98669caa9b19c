//! Camera plugin (render-only).
//!
//! One persistent camera serves every screen. During a run it trails the
//! player from behind and above; the follow runs in `PostUpdate` before
//! transform propagation so it sees this frame's player position.

use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::common::state::GameState;
use crate::plugins::player::Player;

const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 5.0, -10.0);
const LOOK_AHEAD: Vec3 = Vec3::new(0.0, 1.0, 3.0);
const FOLLOW_RATE: f32 = 5.0;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
    app.add_systems(
        PostUpdate,
        follow_player
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        MainCamera,
        Camera3d::default(),
        Transform::from_translation(FOLLOW_OFFSET).looking_at(LOOK_AHEAD, Vec3::Y),
    ));
}

fn follow_player(
    time: Res<Time>,
    q_player: Query<&Transform, With<Player>>,
    mut q_camera: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let Ok(mut cam_tf) = q_camera.single_mut() else {
        return;
    };

    let target = player_tf.translation + FOLLOW_OFFSET;
    let blend = (time.delta_secs() * FOLLOW_RATE).min(1.0);
    cam_tf.translation = cam_tf.translation.lerp(target, blend);
    cam_tf.look_at(player_tf.translation + LOOK_AHEAD, Vec3::Y);
}
