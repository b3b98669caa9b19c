//! Render plugin (render-only): lighting and primitive dressing.
//!
//! Gameplay systems spawn logic-only entities; this plugin attaches meshes
//! and materials to them as they appear. Segment floors are extra children
//! without a home pose, so the track's reset pass never touches them.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::collectibles::components::{Coin, PowerUpPickup};
use crate::plugins::enemies::Chaser;
use crate::plugins::player::{Player, ShieldOrb};
use crate::plugins::track::{Obstacle, Segment};

#[derive(Resource)]
struct Dressing {
    player_mesh: Handle<Mesh>,
    player_mat: Handle<StandardMaterial>,
    coin_mesh: Handle<Mesh>,
    coin_mat: Handle<StandardMaterial>,
    gem_mat: Handle<StandardMaterial>,
    powerup_mesh: Handle<Mesh>,
    powerup_mat: Handle<StandardMaterial>,
    obstacle_mesh: Handle<Mesh>,
    obstacle_mat: Handle<StandardMaterial>,
    deadly_mat: Handle<StandardMaterial>,
    chaser_mesh: Handle<Mesh>,
    chaser_mat: Handle<StandardMaterial>,
    orb_mesh: Handle<Mesh>,
    orb_mat: Handle<StandardMaterial>,
    floor_mesh: Handle<Mesh>,
    floor_mat: Handle<StandardMaterial>,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, (spawn_lighting, build_dressing));
    app.add_systems(
        Update,
        (
            dress_players,
            dress_coins,
            dress_powerups,
            dress_obstacles,
            dress_chasers,
            dress_orbs,
            dress_segments,
        ),
    );
}

fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
        ..default()
    });
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 40.0, -20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn build_dressing(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tunables: Res<Tunables>,
) {
    let lane = tunables.player.lane_distance;
    let seg_len = tunables.track.segment_length;

    commands.insert_resource(Dressing {
        player_mesh: meshes.add(Capsule3d::new(0.4, 1.2)),
        player_mat: materials.add(Color::srgb(0.2, 0.6, 0.9)),
        coin_mesh: meshes.add(Sphere::new(0.4)),
        coin_mat: materials.add(Color::srgb(0.95, 0.8, 0.1)),
        gem_mat: materials.add(Color::srgb(0.3, 0.9, 0.6)),
        powerup_mesh: meshes.add(Sphere::new(0.5)),
        powerup_mat: materials.add(Color::srgb(0.6, 0.3, 0.95)),
        obstacle_mesh: meshes.add(Cuboid::new(1.6, 1.5, 1.0)),
        obstacle_mat: materials.add(Color::srgb(0.6, 0.4, 0.25)),
        deadly_mat: materials.add(Color::srgb(0.85, 0.15, 0.15)),
        chaser_mesh: meshes.add(Sphere::new(0.5)),
        chaser_mat: materials.add(Color::srgb(0.9, 0.2, 0.5)),
        orb_mesh: meshes.add(Sphere::new(0.2)),
        orb_mat: materials.add(Color::srgb(0.4, 0.8, 1.0)),
        floor_mesh: meshes.add(Cuboid::new(lane * 3.0 + 2.0, 0.2, seg_len)),
        floor_mat: materials.add(Color::srgb(0.25, 0.25, 0.3)),
    });
}

fn dress_players(
    mut commands: Commands,
    dressing: Res<Dressing>,
    q_new: Query<Entity, Added<Player>>,
) {
    for e in &q_new {
        commands.entity(e).insert((
            Mesh3d(dressing.player_mesh.clone()),
            MeshMaterial3d(dressing.player_mat.clone()),
        ));
    }
}

fn dress_coins(
    mut commands: Commands,
    dressing: Res<Dressing>,
    q_new: Query<(Entity, &Coin), Added<Coin>>,
) {
    for (e, coin) in &q_new {
        let mat = if coin.value > 1 {
            dressing.gem_mat.clone()
        } else {
            dressing.coin_mat.clone()
        };
        commands
            .entity(e)
            .insert((Mesh3d(dressing.coin_mesh.clone()), MeshMaterial3d(mat)));
    }
}

fn dress_powerups(
    mut commands: Commands,
    dressing: Res<Dressing>,
    q_new: Query<Entity, Added<PowerUpPickup>>,
) {
    for e in &q_new {
        commands.entity(e).insert((
            Mesh3d(dressing.powerup_mesh.clone()),
            MeshMaterial3d(dressing.powerup_mat.clone()),
        ));
    }
}

fn dress_obstacles(
    mut commands: Commands,
    dressing: Res<Dressing>,
    q_new: Query<(Entity, &Obstacle), Added<Obstacle>>,
) {
    for (e, obstacle) in &q_new {
        let mat = if obstacle.deadly {
            dressing.deadly_mat.clone()
        } else {
            dressing.obstacle_mat.clone()
        };
        commands
            .entity(e)
            .insert((Mesh3d(dressing.obstacle_mesh.clone()), MeshMaterial3d(mat)));
    }
}

fn dress_chasers(
    mut commands: Commands,
    dressing: Res<Dressing>,
    q_new: Query<Entity, Added<Chaser>>,
) {
    for e in &q_new {
        commands.entity(e).insert((
            Mesh3d(dressing.chaser_mesh.clone()),
            MeshMaterial3d(dressing.chaser_mat.clone()),
        ));
    }
}

fn dress_orbs(
    mut commands: Commands,
    dressing: Res<Dressing>,
    q_new: Query<Entity, Added<ShieldOrb>>,
) {
    for e in &q_new {
        commands.entity(e).insert((
            Mesh3d(dressing.orb_mesh.clone()),
            MeshMaterial3d(dressing.orb_mat.clone()),
        ));
    }
}

/// Give each fresh segment a floor slab. Slab children carry no home pose
/// and no collider, so segment reuse leaves them alone.
fn dress_segments(
    mut commands: Commands,
    dressing: Res<Dressing>,
    tunables: Res<Tunables>,
    q_new: Query<Entity, Added<Segment>>,
) {
    let half_len = tunables.track.segment_length * 0.5;
    for e in &q_new {
        commands.entity(e).with_children(|parent| {
            parent.spawn((
                Name::new("Floor"),
                Mesh3d(dressing.floor_mesh.clone()),
                MeshMaterial3d(dressing.floor_mat.clone()),
                Transform::from_xyz(0.0, -0.1, half_len),
            ));
        });
    }
}
