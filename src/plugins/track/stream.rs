//! The rolling window itself: spawn ahead, recycle behind.

use std::collections::VecDeque;

use avian3d::prelude::*;
use bevy::prelude::*;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::common::pool::{EntityPool, PoolState};
use crate::common::tunables::Tunables;
use crate::plugins::collectibles::components::{Collectible, HomePose};
use crate::plugins::core::RunRng;
use crate::plugins::player::Player;

use super::{Obstacle, Segment, SegmentKind};

#[derive(Resource, Debug)]
pub struct SegmentPool(pub EntityPool<SegmentKind>);

/// Ordered active window, oldest first. `next_spawn_z` only ever grows.
#[derive(Resource, Debug)]
pub struct SegmentStream {
    pub next_spawn_z: f32,
    pub last_kind: Option<SegmentKind>,
    pub window: VecDeque<Entity>,
}

impl Default for SegmentStream {
    fn default() -> Self {
        Self {
            next_spawn_z: 0.0,
            last_kind: None,
            window: VecDeque::new(),
        }
    }
}

type SegmentRoots<'w, 's> = Query<
    'w,
    's,
    (
        &'static Segment,
        &'static mut Transform,
        &'static mut Visibility,
        &'static mut PoolState,
    ),
    Without<Player>,
>;

type SegmentParts<'w, 's> = Query<
    'w,
    's,
    (
        &'static HomePose,
        &'static mut Transform,
        &'static mut Visibility,
        &'static mut CollisionLayers,
        Option<&'static mut Collectible>,
        Option<&'static mut Obstacle>,
    ),
    (Without<Segment>, Without<Player>),
>;

/// Fill the window up to capacity at run start.
pub(super) fn seed_initial_window(
    tunables: Res<Tunables>,
    mut rng: ResMut<RunRng>,
    mut pool: ResMut<SegmentPool>,
    mut stream: ResMut<SegmentStream>,
    mut q_segments: SegmentRoots,
    q_children: Query<&Children>,
    mut q_parts: SegmentParts,
) {
    for _ in 0..tunables.track.max_active_segments {
        spawn_next_segment(
            &tunables,
            &mut rng.0,
            &mut pool,
            &mut stream,
            &mut q_segments,
            &q_children,
            &mut q_parts,
        );
    }
}

/// Once per tick: spawn a segment when the player closes in on the end of
/// the laid track, then recycle the oldest past the window cap. Pool
/// exhaustion skips the spawn; the next tick simply retries.
pub(super) fn advance_stream(
    tunables: Res<Tunables>,
    mut rng: ResMut<RunRng>,
    mut pool: ResMut<SegmentPool>,
    mut stream: ResMut<SegmentStream>,
    q_player: Query<&Transform, With<Player>>,
    mut q_segments: SegmentRoots,
    q_children: Query<&Children>,
    mut q_parts: SegmentParts,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    if stream.window.is_empty() {
        return;
    }

    if stream.next_spawn_z - player_tf.translation.z < tunables.track.spawn_trigger_distance {
        spawn_next_segment(
            &tunables,
            &mut rng.0,
            &mut pool,
            &mut stream,
            &mut q_segments,
            &q_children,
            &mut q_parts,
        );
        recycle_oldest(
            &tunables,
            &mut pool,
            &mut stream,
            &mut q_segments,
            &q_children,
            &mut q_parts,
        );
    }
}

fn spawn_next_segment(
    tunables: &Tunables,
    rng: &mut SmallRng,
    pool: &mut SegmentPool,
    stream: &mut SegmentStream,
    q_segments: &mut SegmentRoots,
    q_children: &Query<&Children>,
    q_parts: &mut SegmentParts,
) {
    let kind = pick_kind(rng, stream.last_kind);
    let Some(seg) = pool.0.acquire(kind) else {
        return;
    };

    // Children are restored before the segment is revealed, so a reused
    // segment never presents already-collected items as absent.
    restore_children(seg, q_children, q_parts);

    let (_, mut tf, mut vis, mut state) = q_segments
        .get_mut(seg)
        .expect("SegmentPool contained an entity missing segment components");
    tf.translation = Vec3::new(0.0, 0.0, stream.next_spawn_z);
    *vis = Visibility::Visible;
    *state = PoolState::Active;

    stream.window.push_back(seg);
    stream.last_kind = Some(kind);
    stream.next_spawn_z += tunables.track.segment_length;
}

fn recycle_oldest(
    tunables: &Tunables,
    pool: &mut SegmentPool,
    stream: &mut SegmentStream,
    q_segments: &mut SegmentRoots,
    q_children: &Query<&Children>,
    q_parts: &mut SegmentParts,
) {
    if stream.window.len() <= tunables.track.max_active_segments {
        return;
    }
    let Some(oldest) = stream.window.pop_front() else {
        return;
    };

    let (segment, _, mut vis, mut state) = q_segments
        .get_mut(oldest)
        .expect("segment window contained an entity missing segment components");
    *vis = Visibility::Hidden;
    *state = PoolState::Inactive;
    let kind = segment.kind;

    // Silence every child volume while pooled.
    if let Ok(children) = q_children.get(oldest) {
        for child in children {
            if let Ok((_, _, _, mut layers, _, _)) = q_parts.get_mut(*child) {
                layers.filters = LayerMask::NONE;
            }
        }
    }

    pool.0.release(kind, oldest);
}

/// Uniform choice excluding the immediately preceding kind. The rejection
/// loop terminates because at least one other kind always qualifies.
fn pick_kind(rng: &mut SmallRng, last: Option<SegmentKind>) -> SegmentKind {
    if SegmentKind::ALL.len() == 1 {
        return SegmentKind::ALL[0];
    }
    loop {
        let kind = SegmentKind::ALL[rng.random_range(0..SegmentKind::ALL.len())];
        if Some(kind) != last {
            return kind;
        }
    }
}

fn restore_children(seg: Entity, q_children: &Query<&Children>, q_parts: &mut SegmentParts) {
    let Ok(children) = q_children.get(seg) else {
        return;
    };
    for child in children {
        let Ok((home, mut tf, mut vis, mut layers, collectible, obstacle)) =
            q_parts.get_mut(*child)
        else {
            continue;
        };
        tf.translation = home.translation;
        *vis = Visibility::Inherited;
        *layers = home.layers;
        if let Some(mut collectible) = collectible {
            collectible.available = true;
        }
        if let Some(mut obstacle) = obstacle {
            obstacle.armed = true;
        }
    }
}
