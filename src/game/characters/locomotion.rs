// Ground-plane movement from input flags

use glam::Vec3;

use crate::core::math::yaw_from_direction;
use crate::engine::input::InputSnapshot;
use crate::engine::physics::{aabb_from_center, Aabb};

use super::stats::CharacterStats;

/// Committed pose of a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub position: Vec3,
    /// Yaw about +Y in radians
    pub heading: f32,
}

impl Actor {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            heading: 0.0,
        }
    }
}

/// Displacement the character wants to make this tick (not yet applied)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// Unit direction on the ground plane, zero when standing still
    pub direction: Vec3,
    pub displacement: Vec3,
    /// Facing of `direction`; `None` when there is no direction
    pub heading: Option<f32>,
}

impl MovementIntent {
    /// No movement at all
    pub fn none() -> Self {
        Self {
            direction: Vec3::ZERO,
            displacement: Vec3::ZERO,
            heading: None,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.direction != Vec3::ZERO
    }

    /// Where the actor would end up
    pub fn target(&self, actor: &Actor) -> Vec3 {
        actor.position + self.displacement
    }
}

/// Turns movement flags into a tentative displacement
#[derive(Debug, Clone, Copy)]
pub struct LocomotionIntegrator {
    speed: f32,
}

impl LocomotionIntegrator {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    #[allow(dead_code)]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Compute this tick's movement intent
    ///
    /// Forward is -Z and right is +X. Opposing axes cancel.
    pub fn compute_intent(&self, input: &InputSnapshot, dt: f32) -> MovementIntent {
        if !input.any_axis() {
            return MovementIntent::none();
        }

        let mut direction = Vec3::ZERO;
        if input.forward {
            direction.z -= 1.0;
        }
        if input.back {
            direction.z += 1.0;
        }
        if input.left {
            direction.x -= 1.0;
        }
        if input.right {
            direction.x += 1.0;
        }

        if direction == Vec3::ZERO {
            return MovementIntent::none();
        }

        let direction = direction.normalize();
        MovementIntent {
            direction,
            displacement: direction * self.speed * dt,
            heading: yaw_from_direction(direction),
        }
    }

    /// Apply an intent to the actor
    ///
    /// Rolling back a blocked move means simply not calling this.
    pub fn commit(actor: &mut Actor, intent: &MovementIntent) {
        actor.position += intent.displacement;
        if let Some(heading) = intent.heading {
            actor.heading = heading;
        }
    }
}

/// Bounding box of a character used for environment queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorBounds {
    pub half_extents: Vec3,
    pub pivot_offset: Vec3,
    pub margin: f32,
}

impl ActorBounds {
    pub fn from_stats(stats: &CharacterStats) -> Self {
        Self {
            half_extents: stats.half_extents,
            pivot_offset: stats.pivot_offset,
            margin: stats.collision_margin,
        }
    }

    /// The shrunk query volume for an actor standing at `position`
    pub fn candidate_at(&self, position: Vec3) -> Aabb {
        let half = (self.half_extents - Vec3::splat(self.margin)).max(Vec3::ZERO);
        aabb_from_center(position + self.pivot_offset, half)
    }
}
