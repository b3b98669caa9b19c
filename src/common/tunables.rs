//! Tunable gameplay constants.
//!
//! Everything the designers would want to tweak lives here, grouped by the
//! system that reads it. Animation clip durations are an explicit table
//! rather than a lookup by clip-name substring, so a missing entry is a
//! visible `warn!` with a fixed fallback instead of a silent mismatch.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub player: PlayerTunables,
    pub shield: ShieldTunables,
    pub magnet: MagnetTunables,
    pub track: TrackTunables,
    pub chaser: ChaserTunables,
    pub score_multiplier: f32,
    pub clip_durations: ClipDurations,
}

#[derive(Debug, Clone)]
pub struct PlayerTunables {
    pub lane_distance: f32,
    pub lane_change_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    /// Downward velocity at which a jump is reclassified as a fall.
    pub fall_threshold: f32,
    pub max_health: i32,
    pub stumble_duration: f32,
    pub stumble_speed_reduction: f32,
    /// Real delay between the death animation firing and the game-over screen.
    pub game_over_delay: f32,
}

#[derive(Debug, Clone)]
pub struct ShieldTunables {
    pub charges: u8,
    pub duration: f32,
    pub orbit_radius: f32,
    pub orbit_height: f32,
    pub spin_degrees_per_sec: f32,
}

#[derive(Debug, Clone)]
pub struct MagnetTunables {
    pub duration: f32,
    pub radius: f32,
    pub pull_speed: f32,
}

#[derive(Debug, Clone)]
pub struct TrackTunables {
    pub segment_length: f32,
    pub max_active_segments: usize,
    pub spawn_trigger_distance: f32,
    pub pool_size_per_kind: usize,
}

#[derive(Debug, Clone)]
pub struct ChaserTunables {
    pub pool_size: usize,
    pub spawn_interval_z: f32,
    pub x_spawn_range: f32,
    pub spawn_y_offset: f32,
    /// First spawn lands this far ahead of the player's start.
    pub first_spawn_ahead: f32,
    pub spawn_lookahead: f32,
    pub speed: f32,
    pub chase_range: f32,
    pub deactivate_after: f32,
    pub turn_smoothness: f32,
    pub aim_error: f32,
    pub stop_behind_distance: f32,
    pub repool_delay: f32,
}

/// Named animation clip durations, replacing clip-name substring scans.
#[derive(Debug, Clone)]
pub struct ClipDurations {
    table: HashMap<String, f32>,
    pub fallback: f32,
}

impl ClipDurations {
    pub fn new(entries: &[(&str, f32)], fallback: f32) -> Self {
        Self {
            table: entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            fallback,
        }
    }

    /// Duration of a named clip; warns and falls back when unconfigured.
    pub fn seconds(&self, clip: &str) -> f32 {
        match self.table.get(clip) {
            Some(s) => *s,
            None => {
                warn!("no duration configured for clip {clip:?}, using fallback");
                self.fallback
            }
        }
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player: PlayerTunables {
                lane_distance: 2.0,
                lane_change_speed: 10.0,
                jump_force: 7.0,
                gravity: 12.0,
                fall_threshold: -0.5,
                max_health: 2,
                stumble_duration: 2.5,
                stumble_speed_reduction: 0.5,
                game_over_delay: 2.1,
            },
            shield: ShieldTunables {
                charges: 3,
                duration: 5.0,
                orbit_radius: 1.2,
                orbit_height: 1.2,
                spin_degrees_per_sec: 100.0,
            },
            magnet: MagnetTunables {
                duration: 5.0,
                radius: 10.0,
                pull_speed: 10.0,
            },
            track: TrackTunables {
                segment_length: 50.0,
                max_active_segments: 6,
                spawn_trigger_distance: 70.0,
                pool_size_per_kind: 3,
            },
            chaser: ChaserTunables {
                pool_size: 10,
                spawn_interval_z: 15.0,
                x_spawn_range: 3.0,
                spawn_y_offset: 0.5,
                first_spawn_ahead: 50.0,
                spawn_lookahead: 70.0,
                speed: 8.0,
                chase_range: 30.0,
                deactivate_after: 6.0,
                turn_smoothness: 2.0,
                aim_error: 2.0,
                stop_behind_distance: 2.0,
                repool_delay: 10.0,
            },
            score_multiplier: 1.0,
            clip_durations: ClipDurations::new(&[("slide", 1.1), ("die", 2.0)], 1.0),
        }
    }
}

/// Forward speed as a step function of time spent running.
///
/// The clock only accrues while alive and not stumbling, so the value a
/// stumble interrupted is exactly the value restored afterwards.
pub fn forward_speed_for(elapsed_run_secs: f32) -> f32 {
    match elapsed_run_secs {
        t if t < 30.0 => 6.0,
        t if t < 50.0 => 7.0,
        t if t < 80.0 => 8.0,
        t if t < 120.0 => 9.0,
        t if t < 150.0 => 10.0,
        _ => 11.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_steps_through_breakpoints_and_caps() {
        assert_eq!(forward_speed_for(0.0), 6.0);
        assert_eq!(forward_speed_for(29.9), 6.0);
        assert_eq!(forward_speed_for(30.0), 7.0);
        assert_eq!(forward_speed_for(79.9), 8.0);
        assert_eq!(forward_speed_for(120.0), 10.0);
        assert_eq!(forward_speed_for(150.0), 11.0);
        assert_eq!(forward_speed_for(10_000.0), 11.0);
    }

    #[test]
    fn clip_table_hits_and_falls_back() {
        let clips = ClipDurations::new(&[("slide", 0.8)], 1.0);
        assert_eq!(clips.seconds("slide"), 0.8);
        assert_eq!(clips.seconds("vault"), 1.0);
    }
}
