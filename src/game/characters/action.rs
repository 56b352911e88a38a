// Action identifiers and clip metadata

use std::fmt;

/// The fixed set of actions a character can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionId {
    Stand,
    Seat,
    StandToSeat,
    Kick,
    Jump,
    Walking,
    Collision,
}

impl ActionId {
    /// Every action the library must hold before locomotion may run
    pub const ALL: [ActionId; 7] = [
        ActionId::Stand,
        ActionId::Seat,
        ActionId::StandToSeat,
        ActionId::Kick,
        ActionId::Jump,
        ActionId::Walking,
        ActionId::Collision,
    ];

    /// The default resting action
    pub const IDLE: ActionId = ActionId::Stand;

    /// Name used by the asset pipeline
    pub fn name(self) -> &'static str {
        match self {
            Self::Stand => "stand",
            Self::Seat => "seat",
            Self::StandToSeat => "standToSeat",
            Self::Kick => "kick",
            Self::Jump => "jump",
            Self::Walking => "walking",
            Self::Collision => "collision",
        }
    }

    /// Source file the clip is authored in
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Stand => "character_stand.fbx",
            Self::Seat => "character_seat.fbx",
            Self::StandToSeat => "character_stand_to_seat.fbx",
            Self::Kick => "character_kick.fbx",
            Self::Jump => "character_jump.fbx",
            Self::Walking => "character_walking.fbx",
            Self::Collision => "character_collision.fbx",
        }
    }

    /// Loop mode the state machine relies on for this action
    ///
    /// Actions that finish on their own (and hold every other input while
    /// they play) are one-shots; the rest loop.
    pub fn loop_mode(self) -> LoopMode {
        match self {
            Self::StandToSeat | Self::Kick | Self::Jump | Self::Collision => LoopMode::OneShotHold,
            Self::Stand | Self::Seat | Self::Walking => LoopMode::Looping,
        }
    }

    /// Look up an action by its asset pipeline name
    pub fn from_name(name: &str) -> Result<Self, ActionError> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| ActionError::UnknownAction(name.to_string()))
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How playback behaves at the clip boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Wrap around and keep playing
    Looping,
    /// Play once and hold the last frame
    OneShotHold,
}

/// Direction a clip plays in by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackDirection {
    #[default]
    Forward,
    Reverse,
}

impl PlaybackDirection {
    /// Flip the direction when `reversed` is set
    pub fn flipped(self, reversed: bool) -> Self {
        match (self, reversed) {
            (dir, false) => dir,
            (Self::Forward, true) => Self::Reverse,
            (Self::Reverse, true) => Self::Forward,
        }
    }

    /// Playback rate sign: +1 forward, -1 reverse
    pub fn rate(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}

/// Metadata of one loaded clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionDescriptor {
    pub id: ActionId,
    /// Clip length in seconds
    pub duration: f32,
    pub loop_mode: LoopMode,
    pub direction: PlaybackDirection,
    /// Root motion was stripped from the clip; movement comes from locomotion only
    pub in_place: bool,
}

impl ActionDescriptor {
    pub fn new(id: ActionId, duration: f32, loop_mode: LoopMode) -> Self {
        Self {
            id,
            duration: duration.max(0.0),
            loop_mode,
            direction: PlaybackDirection::Forward,
            in_place: false,
        }
    }

    /// A clip that wraps around
    #[allow(dead_code)]
    pub fn looping(id: ActionId, duration: f32) -> Self {
        Self::new(id, duration, LoopMode::Looping)
    }

    /// A clip that plays once and holds its last frame
    #[allow(dead_code)]
    pub fn one_shot(id: ActionId, duration: f32) -> Self {
        Self::new(id, duration, LoopMode::OneShotHold)
    }

    #[allow(dead_code)]
    pub fn with_direction(mut self, direction: PlaybackDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    pub fn is_one_shot(&self) -> bool {
        self.loop_mode == LoopMode::OneShotHold
    }
}

/// Errors raised when referencing actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Action not ready: {0} has not been registered")]
    NotReady(ActionId),

    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_actions_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for id in ActionId::ALL {
            assert!(seen.insert(id));
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(ActionId::from_name("standToSeat"), Ok(ActionId::StandToSeat));
        assert_eq!(ActionId::from_name("walking"), Ok(ActionId::Walking));
        assert_eq!(
            ActionId::from_name("dance"),
            Err(ActionError::UnknownAction("dance".to_string()))
        );
    }

    #[test]
    fn test_names_round_trip_for_every_action() {
        for id in ActionId::ALL {
            assert_eq!(ActionId::from_name(id.name()), Ok(id));
            assert!(id.file_name().ends_with(".fbx"));
        }
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(PlaybackDirection::Forward.flipped(false).rate(), 1.0);
        assert_eq!(PlaybackDirection::Forward.flipped(true).rate(), -1.0);
        assert_eq!(PlaybackDirection::Reverse.flipped(true).rate(), 1.0);
    }

    #[test]
    fn test_descriptor_builders() {
        let kick = ActionDescriptor::one_shot(ActionId::Kick, 1.2);
        assert!(kick.is_one_shot());
        assert_eq!(kick.direction, PlaybackDirection::Forward);

        let walk = ActionDescriptor::looping(ActionId::Walking, 1.0).with_in_place(true);
        assert!(!walk.is_one_shot());
        assert!(walk.in_place);
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        assert_eq!(ActionDescriptor::looping(ActionId::Stand, -1.0).duration, 0.0);
    }

    #[test]
    fn test_error_display() {
        let err = ActionError::NotReady(ActionId::Kick);
        assert_eq!(err.to_string(), "Action not ready: kick has not been registered");
    }
}
