// Input handling system
//
// Turns keyboard events into one `InputSnapshot` per simulation tick.
//
// ## Architecture
//
// - `action`: Defines input actions and default key bindings
// - `config`: Key binding configuration and remapping
// - `player`: Held axes and latched triggers for one character
// - `snapshot`: The per-tick view handed to the simulation
// - `manager`: Main input manager coordinating everything
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Trigger};
//
// let mut input_manager = InputManager::new();
//
// // In your event loop, process keyboard events
// input_manager.process_keyboard_event(&key_event);
//
// // Once per simulation tick
// let snapshot = input_manager.snapshot();
// let report = character.tick(&ctx, &snapshot, dt)?;
//
// // Triggers are single-fire: clear whatever the tick accepted
// if let Some(trigger) = report.consumed {
//     input_manager.consume(trigger);
// }
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;
pub mod snapshot;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
pub use snapshot::{InputSnapshot, Trigger};
