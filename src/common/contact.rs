//! Helpers for classifying Avian contact messages.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Orient a contact so the collider matching `matches` comes first.
/// Returns `None` unless exactly one side matches.
#[inline]
pub fn split_contact<F: Fn(Entity) -> bool>(
    ev: &CollisionStart,
    matches: F,
) -> Option<(Entity, Entity)> {
    match (matches(ev.collider1), matches(ev.collider2)) {
        (true, false) => Some((ev.collider1, ev.collider2)),
        (false, true) => Some((ev.collider2, ev.collider1)),
        _ => None,
    }
}
