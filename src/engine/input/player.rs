// Per-character input state management

use super::action::Action;
use super::snapshot::{InputSnapshot, Trigger};
use std::collections::HashSet;

/// Held movement axes and latched triggers for one character
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions whose source is currently held down
    pressed: HashSet<Action>,

    /// Triggers raised by a press and not yet consumed or released
    latched: HashSet<Trigger>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if a trigger is waiting to be consumed
    pub fn is_latched(&self, trigger: Trigger) -> bool {
        self.latched.contains(&trigger)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            if let Some(trigger) = action.trigger() {
                self.latched.insert(trigger);
            }
        }
    }

    /// Register an action release
    ///
    /// Releasing the key drops a trigger that was never consumed.
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            if let Some(trigger) = action.trigger() {
                self.latched.remove(&trigger);
            }
        }
    }

    /// Clear a trigger after the simulation accepted it
    pub fn consume(&mut self, trigger: Trigger) {
        self.latched.remove(&trigger);
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.latched.clear();
    }

    /// Sample the current state for one tick
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            forward: self.is_pressed(Action::MoveForward),
            back: self.is_pressed(Action::MoveBack),
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            sit_toggle: self.is_latched(Trigger::SitToggle),
            kick: self.is_latched(Trigger::Kick),
            jump: self.is_latched(Trigger::Jump),
        }
    }
}
