// Character animation blending

use std::mem;

use log::debug;

use crate::core::math::{move_towards, wrap};

use super::action::{ActionDescriptor, ActionError, ActionId, LoopMode};
use super::library::ActionLibrary;

/// Crossfade length in seconds
pub const DEFAULT_FADE_DURATION: f32 = 0.2;

/// Playback state of one clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveAction {
    pub id: ActionId,
    /// Current playback time in seconds, within `[0, duration]`
    pub time: f32,
    /// Playback rate; the sign encodes direction
    pub rate: f32,
    /// Blend weight in `[0, 1]`
    pub weight: f32,
    pub duration: f32,
    pub loop_mode: LoopMode,
}

impl ActiveAction {
    /// Start a clip from its beginning, or from its end when played reversed
    fn start(descriptor: &ActionDescriptor, reversed: bool) -> Self {
        let rate = descriptor.direction.flipped(reversed).rate();
        Self {
            id: descriptor.id,
            time: if rate < 0.0 { descriptor.duration } else { 0.0 },
            rate,
            weight: 0.0,
            duration: descriptor.duration,
            loop_mode: descriptor.loop_mode,
        }
    }

    /// Advance playback, returns true once a one-shot sits on its boundary
    fn advance(&mut self, dt: f32) -> bool {
        let time = self.time + dt * self.rate;
        match self.loop_mode {
            LoopMode::Looping => {
                self.time = wrap(time, self.duration);
                false
            }
            LoopMode::OneShotHold => {
                self.time = time.clamp(0.0, self.duration);
                self.at_boundary()
            }
        }
    }

    /// Has playback reached the end it is heading towards?
    pub fn at_boundary(&self) -> bool {
        if self.rate < 0.0 {
            self.time <= 0.0
        } else {
            self.time >= self.duration
        }
    }

    #[allow(dead_code)]
    pub fn is_reversed(&self) -> bool {
        self.rate < 0.0
    }
}

/// Result of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A crossfade into the new action started
    Started,
    /// The action was already active; nothing changed
    Unchanged,
}

/// Raised when a one-shot action reaches its boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionFinished {
    /// The one-shot that completed
    pub finished: ActionId,
    /// The action the controller moved on to
    pub next: ActionId,
}

/// The single completion slot, armed per one-shot activation
#[derive(Debug, Clone, Copy)]
struct Completion {
    action: ActionId,
    next: Option<ActionId>,
}

/// Owns the active action, crossfades between actions, and raises
/// one-shot completion
///
/// Exactly one action is active at any time. Outgoing actions keep
/// playing while their weight fades to zero and are dropped afterwards.
#[derive(Debug, Clone)]
pub struct AnimationBlendController {
    active: ActiveAction,
    fading: Vec<ActiveAction>,
    completion: Option<Completion>,
    fade_duration: f32,
    idle: ActionId,
    completions: u64,
}

impl AnimationBlendController {
    /// Create a controller already playing the idle clip at full weight
    pub fn new(idle: &ActionDescriptor, fade_duration: f32) -> Self {
        let mut active = ActiveAction::start(idle, false);
        active.weight = 1.0;
        Self {
            active,
            fading: Vec::new(),
            completion: None,
            fade_duration: fade_duration.max(0.0),
            idle: idle.id,
            completions: 0,
        }
    }

    /// Crossfade into `id`
    ///
    /// Requesting the action that is already active is a no-op. One-shot
    /// clips arm the completion slot; when they finish the controller moves
    /// on to `on_complete`, or to idle when none is given.
    pub fn transition_to(
        &mut self,
        library: &ActionLibrary,
        id: ActionId,
        reversed: bool,
        on_complete: Option<ActionId>,
    ) -> Result<Transition, ActionError> {
        if id == self.active.id {
            return Ok(Transition::Unchanged);
        }

        let descriptor = library.get(id)?;
        // Fail now rather than when the clip finishes
        if let Some(next) = on_complete {
            library.get(next)?;
        }

        let incoming = ActiveAction::start(descriptor, reversed);
        let outgoing = mem::replace(&mut self.active, incoming);
        self.fading.retain(|layer| layer.id != id);
        self.fading.push(outgoing);

        // A new activation always replaces whatever was armed before
        self.completion = descriptor.is_one_shot().then_some(Completion {
            action: id,
            next: on_complete,
        });

        debug!(
            "Animation {} -> {}{}",
            outgoing.id,
            id,
            if reversed { " (reversed)" } else { "" }
        );
        Ok(Transition::Started)
    }

    /// Advance fades and playback by `dt` seconds
    ///
    /// Returns the completion event on the tick a one-shot reaches its
    /// boundary. The slot is emptied before anything else happens, so each
    /// activation completes at most once.
    pub fn update(
        &mut self,
        library: &ActionLibrary,
        dt: f32,
    ) -> Result<Option<ActionFinished>, ActionError> {
        let step = if self.fade_duration > 0.0 {
            dt / self.fade_duration
        } else {
            f32::INFINITY
        };

        self.active.weight = move_towards(self.active.weight, 1.0, step);
        for layer in &mut self.fading {
            layer.weight = move_towards(layer.weight, 0.0, step);
            layer.advance(dt);
        }
        self.fading.retain(|layer| layer.weight > 0.0);

        let reached_boundary = self.active.advance(dt);
        if !reached_boundary {
            return Ok(None);
        }

        let Some(completion) = self.completion.take() else {
            return Ok(None);
        };
        if completion.action != self.active.id {
            return Ok(None);
        }

        self.completions += 1;
        let next = completion.next.unwrap_or(self.idle);
        self.transition_to(library, next, false, None)?;

        Ok(Some(ActionFinished {
            finished: completion.action,
            next,
        }))
    }

    /// Cancel any in-flight one-shot and return to idle
    pub fn interrupt(&mut self, library: &ActionLibrary) -> Result<Transition, ActionError> {
        self.completion = None;
        self.transition_to(library, self.idle, false, None)
    }

    /// Is a one-shot waiting for its completion?
    pub fn is_action_playing(&self) -> bool {
        self.completion.is_some()
    }

    /// The one active action
    pub fn active(&self) -> &ActiveAction {
        &self.active
    }

    /// Actions still fading out
    #[allow(dead_code)]
    pub fn fading(&self) -> &[ActiveAction] {
        &self.fading
    }

    /// Every layer contributing to the pose, active first
    pub fn layers(&self) -> impl Iterator<Item = &ActiveAction> {
        std::iter::once(&self.active).chain(self.fading.iter())
    }

    /// Current blend weight of an action (0 when not playing)
    #[allow(dead_code)]
    pub fn weight_of(&self, id: ActionId) -> f32 {
        self.layers()
            .filter(|layer| layer.id == id)
            .map(|layer| layer.weight)
            .sum()
    }

    /// Number of one-shot completions raised so far
    #[allow(dead_code)]
    pub fn completions(&self) -> u64 {
        self.completions
    }

    #[allow(dead_code)]
    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::loader::standard_clips;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn library() -> ActionLibrary {
        let mut library = ActionLibrary::from_descriptors(standard_clips());
        // Round numbers keep the arithmetic readable
        library.register(ActionId::Kick, ActionDescriptor::one_shot(ActionId::Kick, 1.0));
        library.register(
            ActionId::StandToSeat,
            ActionDescriptor::one_shot(ActionId::StandToSeat, 1.5),
        );
        library.register(ActionId::Walking, ActionDescriptor::looping(ActionId::Walking, 1.0));
        library
    }

    fn controller(library: &ActionLibrary) -> AnimationBlendController {
        let idle = library.get(ActionId::Stand).unwrap();
        AnimationBlendController::new(idle, DEFAULT_FADE_DURATION)
    }

    #[test]
    fn test_starts_on_idle_at_full_weight() {
        let library = library();
        let controller = controller(&library);
        assert_eq!(controller.active().id, ActionId::Stand);
        assert_eq!(controller.active().weight, 1.0);
        assert!(controller.fading().is_empty());
        assert!(!controller.is_action_playing());
    }

    #[test]
    fn test_transition_to_active_action_is_noop() {
        let library = library();
        let mut controller = controller(&library);

        let first = controller
            .transition_to(&library, ActionId::Walking, false, None)
            .unwrap();
        controller.update(&library, 0.05).unwrap();
        let before = controller.active().to_owned();
        let fading_before = controller.fading().len();

        let second = controller
            .transition_to(&library, ActionId::Walking, false, None)
            .unwrap();

        assert_eq!(first, Transition::Started);
        assert_eq!(second, Transition::Unchanged);
        assert_eq!(*controller.active(), before);
        assert_eq!(controller.fading().len(), fading_before);
    }

    #[test]
    fn test_crossfade_completes_after_fade_duration() {
        let library = library();
        let mut controller = controller(&library);
        controller
            .transition_to(&library, ActionId::Walking, false, None)
            .unwrap();

        controller.update(&library, 0.1).unwrap();
        assert_relative_eq!(controller.weight_of(ActionId::Walking), 0.5);
        assert_relative_eq!(controller.weight_of(ActionId::Stand), 0.5);

        controller.update(&library, 0.1).unwrap();
        assert_relative_eq!(controller.weight_of(ActionId::Walking), 1.0);
        assert_eq!(controller.weight_of(ActionId::Stand), 0.0);
        assert!(controller.fading().is_empty());
    }

    #[test]
    fn test_looping_playback_wraps() {
        let library = library();
        let mut controller = controller(&library);
        controller
            .transition_to(&library, ActionId::Walking, false, None)
            .unwrap();
        controller.update(&library, 2.25).unwrap();
        assert_abs_diff_eq!(controller.active().time, 0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_one_shot_fires_once_and_returns_to_idle() {
        let library = library();
        let mut controller = controller(&library);
        controller
            .transition_to(&library, ActionId::Kick, false, None)
            .unwrap();
        assert!(controller.is_action_playing());

        assert_eq!(controller.update(&library, 0.6).unwrap(), None);
        let finished = controller.update(&library, 0.6).unwrap();

        assert_eq!(
            finished,
            Some(ActionFinished {
                finished: ActionId::Kick,
                next: ActionId::Stand
            })
        );
        assert!(!controller.is_action_playing());
        assert_eq!(controller.active().id, ActionId::Stand);

        for _ in 0..100 {
            assert_eq!(controller.update(&library, 0.1).unwrap(), None);
        }
        assert_eq!(controller.completions(), 1);
    }

    #[test]
    fn test_one_shot_holds_last_frame_while_fading_out() {
        let library = library();
        let mut controller = controller(&library);
        controller
            .transition_to(&library, ActionId::Kick, false, None)
            .unwrap();
        controller.update(&library, 1.0).unwrap();

        let kick = controller
            .fading()
            .iter()
            .find(|layer| layer.id == ActionId::Kick)
            .copied()
            .unwrap();
        assert_eq!(kick.time, 1.0);

        controller.update(&library, 0.1).unwrap();
        let kick = controller
            .fading()
            .iter()
            .find(|layer| layer.id == ActionId::Kick)
            .copied()
            .unwrap();
        assert_eq!(kick.time, 1.0);
    }

    #[test]
    fn test_reversed_playback_runs_from_end_to_start() {
        let library = library();
        let mut controller = controller(&library);
        controller
            .transition_to(&library, ActionId::StandToSeat, true, Some(ActionId::Seat))
            .unwrap();

        assert!(controller.active().is_reversed());
        assert_eq!(controller.active().time, 1.5);
        assert_eq!(controller.active().rate, -1.0);

        controller.update(&library, 0.5).unwrap();
        assert_relative_eq!(controller.active().time, 1.0);

        let finished = controller.update(&library, 1.0).unwrap();
        assert_eq!(
            finished,
            Some(ActionFinished {
                finished: ActionId::StandToSeat,
                next: ActionId::Seat
            })
        );
        assert_eq!(controller.active().id, ActionId::Seat);
    }

    #[test]
    fn test_new_transition_disarms_previous_one_shot() {
        let library = library();
        let mut controller = controller(&library);
        controller
            .transition_to(&library, ActionId::Kick, false, None)
            .unwrap();
        controller
            .transition_to(&library, ActionId::Walking, false, None)
            .unwrap();
        assert!(!controller.is_action_playing());

        for _ in 0..50 {
            assert_eq!(controller.update(&library, 0.1).unwrap(), None);
        }
        assert_eq!(controller.completions(), 0);
    }

    #[test]
    fn test_interrupt_cancels_in_flight_one_shot() {
        let library = library();
        let mut controller = controller(&library);
        controller
            .transition_to(&library, ActionId::Kick, false, None)
            .unwrap();
        controller.interrupt(&library).unwrap();

        assert!(!controller.is_action_playing());
        assert_eq!(controller.active().id, ActionId::Stand);
        assert_eq!(controller.update(&library, 5.0).unwrap(), None);
    }

    #[test]
    fn test_unregistered_action_is_rejected() {
        let mut library = ActionLibrary::new();
        library.register(ActionId::Stand, ActionDescriptor::looping(ActionId::Stand, 2.0));
        let mut controller = controller(&library);

        assert_eq!(
            controller.transition_to(&library, ActionId::Kick, false, None),
            Err(ActionError::NotReady(ActionId::Kick))
        );
        // The previous animation keeps playing
        assert_eq!(controller.active().id, ActionId::Stand);
        assert!(controller.fading().is_empty());
    }

    #[test]
    fn test_unregistered_completion_target_is_rejected_up_front() {
        let mut library = ActionLibrary::new();
        library.register(ActionId::Stand, ActionDescriptor::looping(ActionId::Stand, 2.0));
        library.register(ActionId::Kick, ActionDescriptor::one_shot(ActionId::Kick, 1.0));
        let mut controller = controller(&library);

        assert_eq!(
            controller.transition_to(&library, ActionId::Kick, false, Some(ActionId::Seat)),
            Err(ActionError::NotReady(ActionId::Seat))
        );
        assert!(!controller.is_action_playing());
    }

    #[test]
    fn test_zero_fade_switches_instantly() {
        let library = library();
        let idle = library.get(ActionId::Stand).unwrap();
        let mut controller = AnimationBlendController::new(idle, 0.0);
        controller
            .transition_to(&library, ActionId::Walking, false, None)
            .unwrap();
        controller.update(&library, 0.016).unwrap();

        assert_eq!(controller.weight_of(ActionId::Walking), 1.0);
        assert!(controller.fading().is_empty());
    }
}
