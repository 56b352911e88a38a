// Character action state machine

use log::debug;

use crate::engine::input::{InputSnapshot, Trigger};

use super::action::ActionId;
use super::animation::ActionFinished;

/// Represents the current state of a character
///
/// Exactly one action plays per state. The sit transitions share the
/// single stand-to-seat clip: played reversed to sit down, forward to
/// stand back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still
    #[default]
    Idle,
    /// Moving on the ground
    Walking,
    /// Standing up from the seat
    SitTransitionIn,
    /// Sitting
    Seated,
    /// Sitting down
    SitTransitionOut,
    Kicking,
    Jumping,
    /// Bumped into the environment
    CollisionReacting,
}

impl CharacterState {
    /// The action played in this state
    pub fn action(&self) -> ActionId {
        match self {
            Self::Idle => ActionId::Stand,
            Self::Walking => ActionId::Walking,
            Self::SitTransitionIn | Self::SitTransitionOut => ActionId::StandToSeat,
            Self::Seated => ActionId::Seat,
            Self::Kicking => ActionId::Kick,
            Self::Jumping => ActionId::Jump,
            Self::CollisionReacting => ActionId::Collision,
        }
    }

    /// Whether the clip plays backwards in this state
    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::SitTransitionOut)
    }

    /// Where a one-shot state goes once its clip finishes
    pub fn on_complete(&self) -> Option<ActionId> {
        match self {
            Self::SitTransitionOut => Some(ActionId::Seat),
            Self::SitTransitionIn | Self::Kicking | Self::Jumping | Self::CollisionReacting => {
                Some(ActionId::Stand)
            }
            Self::Idle | Self::Walking | Self::Seated => None,
        }
    }

    /// The state that plays `id` in the given direction
    pub fn for_action(id: ActionId, reversed: bool) -> Self {
        match id {
            ActionId::Stand => Self::Idle,
            ActionId::Walking => Self::Walking,
            ActionId::Seat => Self::Seated,
            ActionId::StandToSeat if reversed => Self::SitTransitionOut,
            ActionId::StandToSeat => Self::SitTransitionIn,
            ActionId::Kick => Self::Kicking,
            ActionId::Jump => Self::Jumping,
            ActionId::Collision => Self::CollisionReacting,
        }
    }

    /// A one-shot is in flight; no new transitions are accepted
    pub fn is_one_shot(&self) -> bool {
        matches!(
            self,
            Self::SitTransitionIn
                | Self::SitTransitionOut
                | Self::Kicking
                | Self::Jumping
                | Self::CollisionReacting
        )
    }

    /// Sitting down or seated; locomotion is locked
    pub fn is_sitting(&self) -> bool {
        matches!(self, Self::SitTransitionOut | Self::Seated)
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Walking)
    }

    pub fn flags(&self) -> StateFlags {
        StateFlags {
            is_moving: self.is_moving(),
            is_sitting: self.is_sitting(),
            is_action_playing: self.is_one_shot(),
        }
    }

    /// Transition table
    pub fn can_transition_to(&self, next: CharacterState) -> bool {
        use CharacterState::*;
        match self {
            Idle | Walking => matches!(
                next,
                Idle | Walking | CollisionReacting | SitTransitionOut | Kicking | Jumping
            ),
            SitTransitionOut => matches!(next, Seated),
            Seated => matches!(next, SitTransitionIn),
            SitTransitionIn | Kicking | Jumping | CollisionReacting => matches!(next, Idle),
        }
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        self.action().name()
    }
}

/// Flag view of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateFlags {
    pub is_moving: bool,
    pub is_sitting: bool,
    pub is_action_playing: bool,
}

/// What locomotion and collision said about this tick's movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementProbe {
    /// The input asks for a non-zero displacement
    pub has_intent: bool,
    /// The displaced volume overlaps the environment
    pub blocked: bool,
}

/// Outcome of one tick's resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    /// State resolved this tick; `None` while a one-shot is in flight
    pub target: Option<CharacterState>,
    /// Apply the movement intent
    pub commit: bool,
    /// The movement intent was refused because of a collision
    pub rolled_back: bool,
    /// Trigger accepted this tick, to be cleared by the input owner
    pub consumed: Option<Trigger>,
}

impl Decision {
    fn hold() -> Self {
        Self::default()
    }

    fn settle(state: CharacterState) -> Self {
        Self {
            target: Some(state),
            ..Self::default()
        }
    }

    fn triggered(state: CharacterState, trigger: Trigger) -> Self {
        Self {
            target: Some(state),
            consumed: Some(trigger),
            ..Self::default()
        }
    }
}

/// State machine that selects the character's action every tick
#[derive(Debug)]
pub struct ActionStateMachine {
    current_state: CharacterState,
    previous_state: CharacterState,
    state_time: f32,
}

impl Default for ActionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: CharacterState::Idle,
            previous_state: CharacterState::Idle,
            state_time: 0.0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn flags(&self) -> StateFlags {
        self.current_state.flags()
    }

    /// Resolve this tick's transition
    ///
    /// First match wins:
    /// 1. a one-shot in flight holds everything
    /// 2. movement (unless sitting) walks, or reacts to a collision
    /// 3. sit toggle
    /// 4. kick (not while sitting)
    /// 5. jump (not while sitting)
    /// 6. otherwise rest on idle unless sitting
    ///
    /// Triggers that lose out stay set on the input and are picked up on a
    /// later tick once nothing outranks them.
    pub fn resolve(&mut self, input: &InputSnapshot, probe: MovementProbe) -> Decision {
        let flags = self.flags();

        let decision = if flags.is_action_playing {
            Decision::hold()
        } else if probe.has_intent && !flags.is_sitting {
            if probe.blocked {
                Decision {
                    target: Some(CharacterState::CollisionReacting),
                    rolled_back: true,
                    ..Decision::default()
                }
            } else {
                Decision {
                    target: Some(CharacterState::Walking),
                    commit: true,
                    ..Decision::default()
                }
            }
        } else if input.sit_toggle {
            let next = if flags.is_sitting {
                CharacterState::SitTransitionIn
            } else {
                CharacterState::SitTransitionOut
            };
            Decision::triggered(next, Trigger::SitToggle)
        } else if input.kick && !flags.is_sitting {
            Decision::triggered(CharacterState::Kicking, Trigger::Kick)
        } else if input.jump && !flags.is_sitting {
            Decision::triggered(CharacterState::Jumping, Trigger::Jump)
        } else if !flags.is_sitting {
            Decision::settle(CharacterState::Idle)
        } else {
            Decision::hold()
        };

        if let Some(target) = decision.target {
            self.transition(target);
        }
        decision
    }

    /// Follow a finished one-shot to the state of the action that replaced it
    pub fn on_action_finished(&mut self, event: &ActionFinished) {
        self.transition(CharacterState::for_action(event.next, false));
    }

    /// Advance the time spent in the current state
    pub fn advance(&mut self, dt: f32) {
        self.state_time += dt;
    }

    /// Return to idle regardless of the current state
    pub fn reset(&mut self) {
        self.previous_state = self.current_state;
        self.current_state = CharacterState::Idle;
        self.state_time = 0.0;
    }

    /// Transition to a new state
    fn transition(&mut self, new_state: CharacterState) {
        if self.current_state == new_state {
            return;
        }
        debug_assert!(
            self.current_state.can_transition_to(new_state),
            "illegal transition {:?} -> {:?}",
            self.current_state,
            new_state
        );
        debug!("State {:?} -> {:?}", self.current_state, new_state);
        self.previous_state = self.current_state;
        self.current_state = new_state;
        self.state_time = 0.0;
    }
}
