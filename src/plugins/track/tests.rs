use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::messages::PlayerStruck;
use crate::common::pool::PoolState;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::collectibles::components::Collectible;
use crate::plugins::core::RunRng;
use crate::plugins::player::Player;

use super::*;
use stream::{SegmentPool, SegmentStream};

fn world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(RunRng::seeded(11));
    world.init_resource::<Messages<CollisionStart>>();
    world.init_resource::<Messages<PlayerStruck>>();
    run_system_once(&mut world, prewarm_segments);
    world
}

fn window_kinds(world: &mut World) -> Vec<SegmentKind> {
    let window: Vec<Entity> = world
        .resource::<SegmentStream>()
        .window
        .iter()
        .copied()
        .collect();
    window
        .into_iter()
        .map(|e| world.get::<Segment>(e).unwrap().kind)
        .collect()
}

#[test]
fn prewarm_builds_three_of_each_kind_inactive() {
    let mut world = world();

    assert_eq!(world.resource::<SegmentPool>().0.free_len(), 9);

    let mut per_kind = [0usize; 3];
    for (segment, state, vis) in world
        .query::<(&Segment, &PoolState, &Visibility)>()
        .iter(&world)
    {
        assert_eq!(*state, PoolState::Inactive);
        assert_eq!(*vis, Visibility::Hidden);
        let idx = SegmentKind::ALL
            .iter()
            .position(|k| *k == segment.kind)
            .unwrap();
        per_kind[idx] += 1;
    }
    assert_eq!(per_kind, [3, 3, 3]);
}

#[test]
fn seeding_lays_a_contiguous_window() {
    let mut world = world();
    run_system_once(&mut world, stream::seed_initial_window);

    let stream_res = world.resource::<SegmentStream>();
    assert_eq!(stream_res.window.len(), 6);
    assert_eq!(stream_res.next_spawn_z, 300.0);
    let window: Vec<Entity> = stream_res.window.iter().copied().collect();

    for (i, seg) in window.iter().enumerate() {
        let tf = world.get::<Transform>(*seg).unwrap();
        assert_eq!(tf.translation.z, 50.0 * i as f32);
        assert_eq!(*world.get::<PoolState>(*seg).unwrap(), PoolState::Active);
    }
}

#[test]
fn consecutive_segments_never_repeat_a_kind() {
    let mut world = world();
    run_system_once(&mut world, stream::seed_initial_window);

    // Stream a long way to exercise many picks.
    for step in 0..40 {
        let z = 240.0 + step as f32 * 50.0;
        let mut q = world.query_filtered::<&mut Transform, With<Player>>();
        if let Ok(mut tf) = q.single_mut(&mut world) {
            tf.translation.z = z;
        } else {
            world.spawn((Player, Transform::from_xyz(0.0, 1.0, z)));
        }
        run_system_once(&mut world, stream::advance_stream);
    }

    let kinds = window_kinds(&mut world);
    for pair in kinds.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn advancing_recycles_the_oldest_segment() {
    let mut world = world();
    run_system_once(&mut world, stream::seed_initial_window);
    let oldest = *world.resource::<SegmentStream>().window.front().unwrap();
    assert_eq!(world.resource::<SegmentPool>().0.free_len(), 3);

    // Close enough to the end of the laid track to trigger a spawn.
    world.spawn((Player, Transform::from_xyz(0.0, 1.0, 240.0)));
    run_system_once(&mut world, stream::advance_stream);

    let stream_res = world.resource::<SegmentStream>();
    assert_eq!(stream_res.window.len(), 6);
    assert_eq!(stream_res.next_spawn_z, 350.0);
    assert!(!stream_res.window.contains(&oldest));

    assert_eq!(*world.get::<PoolState>(oldest).unwrap(), PoolState::Inactive);
    assert_eq!(*world.get::<Visibility>(oldest).unwrap(), Visibility::Hidden);
    assert_eq!(world.resource::<SegmentPool>().0.free_len(), 3);
}

#[test]
fn far_player_leaves_the_stream_alone() {
    let mut world = world();
    run_system_once(&mut world, stream::seed_initial_window);
    world.spawn((Player, Transform::from_xyz(0.0, 1.0, 0.0)));

    run_system_once(&mut world, stream::advance_stream);

    assert_eq!(world.resource::<SegmentStream>().next_spawn_z, 300.0);
    assert_eq!(world.resource::<SegmentStream>().window.len(), 6);
}

#[test]
fn reused_segments_come_back_with_everything_restored() {
    let mut world = world();
    run_system_once(&mut world, stream::seed_initial_window);

    // Spend every pickup and disarm every obstacle on the oldest segment.
    let oldest = *world.resource::<SegmentStream>().window.front().unwrap();
    let children: Vec<Entity> = world.get::<Children>(oldest).unwrap().iter().collect();
    for child in &children {
        if let Some(mut c) = world.get_mut::<Collectible>(*child) {
            c.available = false;
        }
        if let Some(mut o) = world.get_mut::<Obstacle>(*child) {
            o.armed = false;
        }
        *world.get_mut::<Visibility>(*child).unwrap() = Visibility::Hidden;
    }

    // Stream until the pool hands that segment out again.
    world.spawn((Player, Transform::from_xyz(0.0, 1.0, 0.0)));
    let mut reused = false;
    for step in 0..24 {
        let z = 240.0 + step as f32 * 50.0;
        world
            .query_filtered::<&mut Transform, With<Player>>()
            .single_mut(&mut world)
            .unwrap()
            .translation
            .z = z;
        run_system_once(&mut world, stream::advance_stream);
        if *world.get::<PoolState>(oldest).unwrap() == PoolState::Active {
            reused = true;
            break;
        }
    }
    assert!(reused, "segment should cycle back into the window");

    for child in &children {
        if let Some(c) = world.get::<Collectible>(*child) {
            assert!(c.available);
        }
        if let Some(o) = world.get::<Obstacle>(*child) {
            assert!(o.armed);
        }
        assert_eq!(
            *world.get::<Visibility>(*child).unwrap(),
            Visibility::Inherited
        );
    }
}

#[test]
fn obstacle_contact_strikes_once_with_its_lethality() {
    let mut world = world();
    let player = world.spawn(Player).id();
    let deadly = world
        .spawn((
            Obstacle {
                deadly: true,
                armed: true,
            },
            Visibility::Inherited,
            crate::common::layers::live(crate::common::layers::Layer::Obstacle),
        ))
        .id();

    let contact = |deadly, player| CollisionStart {
        collider1: deadly,
        collider2: player,
        body1: Some(deadly),
        body2: Some(player),
    };
    world.write_message(contact(deadly, player));
    run_system_once(&mut world, contacts::strike_on_contact);

    let strikes: Vec<_> = world
        .resource_mut::<Messages<PlayerStruck>>()
        .drain()
        .collect();
    assert_eq!(strikes.len(), 1);
    assert!(strikes[0].lethal);
    assert!(!world.get::<Obstacle>(deadly).unwrap().armed);
    assert_eq!(*world.get::<Visibility>(deadly).unwrap(), Visibility::Hidden);

    // Disarmed volumes stay silent.
    world.write_message(contact(deadly, player));
    run_system_once(&mut world, contacts::strike_on_contact);
    assert_eq!(
        world
            .resource_mut::<Messages<PlayerStruck>>()
            .drain()
            .count(),
        0
    );
}
