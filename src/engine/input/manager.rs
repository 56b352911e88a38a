// Input manager - Main coordination system for all input

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use super::snapshot::{InputSnapshot, Trigger};
use std::mem;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Main input manager: routes key events through the bindings into the
/// character's input state
#[derive(Debug, Default)]
pub struct InputManager {
    /// Key bindings
    config: InputConfig,

    /// Input state of the controlled character
    player: PlayerInput,

    /// Set once a quit binding is pressed
    quit_requested: bool,

    /// Meta actions pressed since they were last taken, in press order
    commands: Vec<Action>,
}

impl InputManager {
    /// Create a new input manager with default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    /// Create an input manager with custom bindings
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
            quit_requested: false,
            commands: Vec::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state, event.repeat);
        }
    }

    /// Process a single key transition
    pub fn process_key(&mut self, key_code: KeyCode, state: ElementState, repeat: bool) {
        let Some(action) = self.config.get_action(InputSource::key(key_code)) else {
            return;
        };

        match (action, state) {
            (Action::Quit, ElementState::Pressed) => self.quit_requested = true,
            (Action::Quit, ElementState::Released) => {}
            (Action::Reset | Action::TogglePause, ElementState::Pressed) if !repeat => {
                self.commands.push(action)
            }
            (Action::Reset | Action::TogglePause, _) => {}
            // Key repeat never re-raises a trigger
            (_, ElementState::Pressed) if repeat => {}
            (_, ElementState::Pressed) => self.player.press(action),
            (_, ElementState::Released) => self.player.release(action),
        }
    }

    /// Sample input for one simulation tick
    pub fn snapshot(&self) -> InputSnapshot {
        self.player.snapshot()
    }

    /// Clear a trigger the simulation accepted
    pub fn consume(&mut self, trigger: Trigger) {
        self.player.consume(trigger);
    }

    /// Whether a quit binding was pressed
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Take the meta actions pressed since the last call
    pub fn take_commands(&mut self) -> Vec<Action> {
        mem::take(&mut self.commands)
    }

    /// Get the character's input state
    #[allow(dead_code)]
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Get the key bindings
    #[allow(dead_code)]
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Get mutable key bindings
    #[allow(dead_code)]
    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Drop all held keys and pending triggers (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.player.reset();
    }
}
