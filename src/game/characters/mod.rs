// Character system
//
// This module contains everything related to playable characters:
// - Action catalogue, library and clip loading
// - Animation blending with one-shot completion
// - Locomotion and collision-gated movement
// - State machine for character behavior

pub mod action;
pub mod animation;
pub mod character;
pub mod library;
pub mod loader;
pub mod locomotion;
pub mod state;
pub mod stats;

// Re-export the types the driver wires together
pub use action::ActionId;
pub use character::{Character, SimContext};
pub use library::ActionLibrary;
pub use loader::{clip_descriptor, ClipLoader};
pub use stats::CharacterStats;
