// Character context: one controllable character and its per-tick pipeline

use glam::Vec3;
use log::{debug, info, warn};

use crate::engine::input::{InputSnapshot, Trigger};
use crate::engine::physics::{CollisionVolumeIndex, VolumeId};

use super::action::{ActionError, ActionId};
use super::animation::{ActionFinished, AnimationBlendController};
use super::library::ActionLibrary;
use super::locomotion::{Actor, ActorBounds, LocomotionIntegrator};
use super::state::{ActionStateMachine, CharacterState, MovementProbe, StateFlags};
use super::stats::CharacterStats;

/// Unique identifier for a character
pub type CharacterId = u32;

/// Shared, read-only collaborators of a tick
///
/// Both are built once during setup and may be shared between any number
/// of characters.
#[derive(Debug, Clone, Copy)]
pub struct SimContext<'a> {
    pub library: &'a ActionLibrary,
    pub colliders: &'a CollisionVolumeIndex,
}

/// What happened during one tick
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// False while the library is still loading and nothing ran
    pub ran: bool,
    pub state: CharacterState,
    /// Set when the state changed this tick
    pub changed_from: Option<CharacterState>,
    /// The movement intent was applied to the actor
    pub committed: bool,
    /// Volume that refused the move
    pub blocked_by: Option<VolumeId>,
    /// Trigger accepted this tick; the input owner must clear it
    pub consumed: Option<Trigger>,
    pub finished: Option<ActionFinished>,
}

impl TickReport {
    fn inert(state: CharacterState) -> Self {
        Self {
            ran: false,
            state,
            changed_from: None,
            committed: false,
            blocked_by: None,
            consumed: None,
            finished: None,
        }
    }
}

/// Pose handed to the renderer each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub heading: f32,
}

/// A controllable character
///
/// Owns everything that changes per tick: the actor pose, the state
/// machine and the animation controller. Several characters can share one
/// library and one collision index.
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display and logs)
    pub name: String,

    stats: CharacterStats,
    actor: Actor,
    bounds: ActorBounds,
    locomotion: LocomotionIntegrator,
    state_machine: ActionStateMachine,
    animation: AnimationBlendController,
}

impl Character {
    /// Spawn a character playing idle at the configured spawn point
    ///
    /// Only the idle clip has to be registered; the rest of the library may
    /// still be loading.
    pub fn spawn(
        id: CharacterId,
        name: &str,
        stats: CharacterStats,
        library: &ActionLibrary,
    ) -> Result<Self, ActionError> {
        let idle = library.get(ActionId::IDLE)?;
        let animation = AnimationBlendController::new(idle, stats.fade_duration);

        info!("Spawned '{}' at {}", name, stats.spawn_position);

        Ok(Self {
            id,
            name: name.to_string(),
            actor: Actor::new(stats.spawn_position),
            bounds: ActorBounds::from_stats(&stats),
            locomotion: LocomotionIntegrator::new(stats.move_speed),
            state_machine: ActionStateMachine::new(),
            animation,
            stats,
        })
    }

    /// Run one simulation tick
    ///
    /// Locomotion proposes a move, the collision index checks the proposed
    /// volume, the state machine decides, and the animation controller
    /// follows the decision and advances by `dt`. Does nothing until the
    /// library is ready.
    pub fn tick(
        &mut self,
        ctx: &SimContext<'_>,
        input: &InputSnapshot,
        dt: f32,
    ) -> Result<TickReport, ActionError> {
        let before = self.state_machine.state();
        let held_for = self.state_machine.state_time();
        if !ctx.library.is_ready() {
            return Ok(TickReport::inert(before));
        }

        let intent = self.locomotion.compute_intent(input, dt);
        let blocked_by = if intent.is_moving() {
            let candidate = self.bounds.candidate_at(intent.target(&self.actor));
            ctx.colliders.first_intersecting(&candidate)
        } else {
            None
        };

        let decision = self.state_machine.resolve(
            input,
            MovementProbe {
                has_intent: intent.is_moving(),
                blocked: blocked_by.is_some(),
            },
        );

        if decision.commit {
            LocomotionIntegrator::commit(&mut self.actor, &intent);
        }
        if decision.rolled_back {
            if let Some(volume) = blocked_by {
                debug!(
                    "'{}' blocked by '{}', move rolled back",
                    self.name,
                    ctx.colliders.name(volume).unwrap_or("?")
                );
            }
        }

        if let Some(target) = decision.target {
            self.animation.transition_to(
                ctx.library,
                target.action(),
                target.is_reversed(),
                target.on_complete(),
            )?;
        }

        let finished = self.animation.update(ctx.library, dt)?;
        if let Some(event) = &finished {
            debug!("'{}' finished {} -> {}", self.name, event.finished, event.next);
            self.state_machine.on_action_finished(event);
        }
        self.state_machine.advance(dt);

        debug_assert_eq!(
            self.state_machine.flags().is_action_playing,
            self.animation.is_action_playing(),
            "state machine and animation disagree about the one-shot"
        );

        let after = self.state_machine.state();
        if after != before {
            info!(
                "'{}': {:?} -> {:?} ({}) after {:.2}s",
                self.name,
                before,
                after,
                after.animation_name(),
                held_for
            );
        }

        Ok(TickReport {
            ran: true,
            state: after,
            changed_from: (after != before).then_some(before),
            committed: decision.commit,
            blocked_by: if decision.rolled_back { blocked_by } else { None },
            consumed: decision.consumed,
            finished,
        })
    }

    /// Return to idle at the spawn point, cancelling any in-flight action
    pub fn reset(&mut self, library: &ActionLibrary) -> Result<(), ActionError> {
        self.animation.interrupt(library)?;
        self.state_machine.reset();
        self.actor = Actor::new(self.stats.spawn_position);
        info!(
            "'{}' (#{}) reset from {:?}",
            self.name,
            self.id,
            self.state_machine.previous_state()
        );
        Ok(())
    }

    /// Move the character without a collision check (teleport)
    #[allow(dead_code)]
    pub fn set_position(&mut self, position: Vec3) {
        if !position.is_finite() {
            warn!("Ignoring non-finite position for '{}'", self.name);
            return;
        }
        self.actor.position = position;
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    pub fn flags(&self) -> StateFlags {
        self.state_machine.flags()
    }

    #[allow(dead_code)]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.actor.position,
            heading: self.actor.heading,
        }
    }

    pub fn animation(&self) -> &AnimationBlendController {
        &self.animation
    }

    #[allow(dead_code)]
    pub fn state_machine(&self) -> &ActionStateMachine {
        &self.state_machine
    }

    #[allow(dead_code)]
    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }
}
