// Input action definitions and mappings

use winit::keyboard::KeyCode;

use super::snapshot::Trigger;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement axes (held)
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,

    // Discrete triggers (single-fire)
    ToggleSit,
    Kick,
    Jump,

    // Meta actions
    Quit,
    /// Put the character back on its spawn point
    Reset,
    TogglePause,
}

impl Action {
    /// The discrete trigger this action raises, if it is one
    pub fn trigger(self) -> Option<Trigger> {
        match self {
            Action::ToggleSit => Some(Trigger::SitToggle),
            Action::Kick => Some(Trigger::Kick),
            Action::Jump => Some(Trigger::Jump),
            Action::MoveForward
            | Action::MoveBack
            | Action::MoveLeft
            | Action::MoveRight
            | Action::Quit
            | Action::Reset
            | Action::TogglePause => None,
        }
    }
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    // Future: Add controller support
    // GamepadButton(gilrs::Button),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings for the character
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD)
        (InputSource::key(KeyCode::KeyW), Action::MoveForward),
        (InputSource::key(KeyCode::KeyS), Action::MoveBack),
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        // Actions
        (InputSource::key(KeyCode::KeyC), Action::ToggleSit),
        (InputSource::key(KeyCode::KeyK), Action::Kick),
        (InputSource::key(KeyCode::KeyJ), Action::Jump),
    ]
}

/// Global bindings (not character-specific)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Quit),
        (InputSource::key(KeyCode::KeyR), Action::Reset),
        (InputSource::key(KeyCode::KeyP), Action::TogglePause),
    ]
}
