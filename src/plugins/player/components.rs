use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct Player;

/// Lateral lane index: 0 left, 1 middle, 2 right.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane(pub u8);

impl Lane {
    pub const LEFTMOST: u8 = 0;
    pub const RIGHTMOST: u8 = 2;

    /// World X of the lane centre. Deriving the target from the index (not
    /// from the current position) means repeated changes cannot drift.
    #[inline]
    pub fn center_x(self, lane_distance: f32) -> f32 {
        (self.0 as f32 - 1.0) * lane_distance
    }
}

/// Exponential glide toward the current lane centre. `changing` stays true
/// until the player is within 0.1 units of the target; a new lane change is
/// only accepted once it clears.
#[derive(Component, Debug, Default)]
pub struct LaneGlide {
    pub target_x: f32,
    pub changing: bool,
}

/// Forward/vertical motion facts.
#[derive(Component, Debug)]
pub struct RunMotion {
    /// Run clock feeding the speed breakpoints. Frozen while stumbling, so
    /// the speed a stumble interrupted is exactly the speed restored.
    pub elapsed: f32,
    pub forward_speed: f32,
    pub vertical_velocity: f32,
    pub distance: f32,
    pub(super) last_z: f32,
}

impl RunMotion {
    pub fn new(start_z: f32) -> Self {
        Self {
            elapsed: 0.0,
            forward_speed: crate::common::tunables::forward_speed_for(0.0),
            vertical_velocity: 0.0,
            distance: 0.0,
            last_z: start_z,
        }
    }
}

/// Mutually exclusive movement stances. Stumble and death are orthogonal
/// and live in [`Vitals`].
#[derive(Component, Debug, Clone, PartialEq)]
pub enum Stance {
    Running,
    Jumping,
    Falling,
    Sliding { until: Timer },
}

impl Stance {
    #[inline]
    pub fn airborne(&self) -> bool {
        matches!(self, Stance::Jumping | Stance::Falling)
    }
}

/// Health, stumble and the death sequence. `dead` is terminal: once set,
/// the only remaining transition is the delayed game-over signal.
#[derive(Component, Debug)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
    pub stumble: Option<Timer>,
    pub dead: bool,
    pub game_over_at: Option<Timer>,
}

impl Vitals {
    pub fn new(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            stumble: None,
            dead: false,
            game_over_at: None,
        }
    }

    #[inline]
    pub fn stumbling(&self) -> bool {
        self.stumble.is_some()
    }
}

/// Active buffs. Shield charge count is the orb list length; consuming a
/// charge despawns exactly one orb.
#[derive(Component, Debug, Default)]
pub struct Buffs {
    pub shield: Option<ShieldBuff>,
    pub magnet: Option<MagnetBuff>,
}

#[derive(Debug)]
pub struct ShieldBuff {
    pub expiry: Timer,
    pub orbs: Vec<Entity>,
}

impl ShieldBuff {
    #[inline]
    pub fn charges(&self) -> usize {
        self.orbs.len()
    }
}

#[derive(Debug)]
pub struct MagnetBuff {
    pub expiry: Timer,
    pub radius: f32,
}

/// Marker for the orbiting shield instances parented to the player.
#[derive(Component, Debug)]
pub struct ShieldOrb;

/// Named animation flags, written by the state machine and read by the
/// presentation layer. The die trigger is one-shot.
#[derive(Component, Debug, Default)]
pub struct CharacterAnimator {
    pub running: bool,
    pub jumping: bool,
    pub falling: bool,
    pub injured: bool,
    pub sliding: bool,
    pub die_triggered: bool,
}

/// Pressed-this-tick control intents, latched in `Update` and consumed by
/// the fixed-step movement system.
#[derive(Resource, Debug, Default)]
pub struct ControlIntent {
    pub lane_left: bool,
    pub lane_right: bool,
    pub jump: bool,
    pub slide: bool,
}
