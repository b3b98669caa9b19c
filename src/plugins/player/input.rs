//! Input latching.
//!
//! `Update` runs once per frame while `FixedUpdate` may run zero or more
//! times, so presses are accumulated with `|=` here and taken (reset) by
//! the consumer. Presses buffered while paused are discarded.

use bevy::prelude::*;

use crate::common::state::Paused;

use super::components::ControlIntent;

pub fn gather_control_intent(
    // Optional so headless worlds without an input plugin still run.
    keys: Option<Res<ButtonInput<KeyCode>>>,
    paused: Res<Paused>,
    mut intent: ResMut<ControlIntent>,
) {
    if paused.0 {
        *intent = ControlIntent::default();
        return;
    }
    let Some(keys) = keys else {
        return;
    };

    intent.lane_left |= keys.just_pressed(KeyCode::KeyA) || keys.just_pressed(KeyCode::ArrowLeft);
    intent.lane_right |= keys.just_pressed(KeyCode::KeyD) || keys.just_pressed(KeyCode::ArrowRight);
    intent.jump |= keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::ArrowUp);
    intent.slide |=
        keys.just_pressed(KeyCode::ControlLeft) || keys.just_pressed(KeyCode::ArrowDown);
}
