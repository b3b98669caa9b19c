//! Fixed-capacity entity pooling.
//!
//! Pooled gameplay objects (track segments, chasers) are spawned once at
//! run start and then toggled between lifecycle states instead of being
//! created/destroyed. Activation and deactivation never make structural
//! changes to the entity: visibility, collision layers and velocities are
//! mutated in place, which keeps archetypes stable.

use bevy::prelude::*;

/// Lifecycle of a pooled instance.
///
/// `PendingReturn` covers the window between an instance deactivating
/// itself (contact, countdown, passed behind) and the moment the pool
/// actually re-queues it. An instance is never both in the free list and
/// `Active`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

/// Free-list over pre-warmed entities, tagged by kind at pre-warm time.
///
/// Capacity is fixed: `acquire` on an exhausted pool returns `None` and the
/// caller simply skips the spawn for that tick. `release` of an entity that
/// is already in the free list is a no-op.
#[derive(Debug)]
pub struct EntityPool<K: Copy + Eq> {
    free: Vec<(K, Entity)>,
    capacity: usize,
}

impl<K: Copy + Eq> EntityPool<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Register a freshly spawned inactive instance.
    pub fn prewarm(&mut self, kind: K, entity: Entity) {
        debug_assert!(self.free.len() < self.capacity, "pool pre-warmed past capacity");
        self.free.push((kind, entity));
    }

    /// Pop an inactive instance of `kind`, if any.
    pub fn acquire(&mut self, kind: K) -> Option<Entity> {
        let idx = self.free.iter().position(|(k, _)| *k == kind)?;
        Some(self.free.swap_remove(idx).1)
    }

    /// Return an instance to the free list. No-op if it is already there.
    pub fn release(&mut self, kind: K, entity: Entity) {
        if self.free.iter().any(|(_, e)| *e == entity) {
            return;
        }
        self.free.push((kind, entity));
    }
}
