// Character tuning - one set of values shared by every character instance

use glam::Vec3;

use super::animation::DEFAULT_FADE_DURATION;

/// Movement, collision and blending parameters for a character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    // Movement
    /// Ground speed (units/second)
    pub move_speed: f32,

    // Animation
    /// Crossfade duration between actions (seconds)
    pub fade_duration: f32,

    // Collision
    /// Half size of the character's bounding box
    pub half_extents: Vec3,
    /// Offset from the actor's position (feet) to the box center
    pub pivot_offset: Vec3,
    /// Inward margin applied before collision queries, so near-touching
    /// geometry does not count as a hit
    pub collision_margin: f32,

    // Spawning
    pub spawn_position: Vec3,
}

/// The character stats used by default
pub const BASE_STATS: CharacterStats = CharacterStats {
    // Movement - 0.03 units per frame at 60 FPS
    move_speed: 1.8,

    // Animation
    fade_duration: DEFAULT_FADE_DURATION,

    // Collision - roughly a 1.8 unit tall humanoid
    half_extents: Vec3::new(0.25, 0.9, 0.2),
    pivot_offset: Vec3::new(0.0, 0.9, 0.0),
    collision_margin: 0.05,

    spawn_position: Vec3::new(0.8, 0.1, 0.2),
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Get the standard character stats
    pub fn standard() -> Self {
        BASE_STATS
    }
}
