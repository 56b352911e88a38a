// Clip manifest and staggered clip arrival

use log::{debug, info};

use super::action::{ActionDescriptor, ActionId};
use super::library::ActionLibrary;

/// Authored metadata for one clip
pub fn clip_descriptor(id: ActionId) -> ActionDescriptor {
    let duration = match id {
        ActionId::Stand => 2.0,
        ActionId::Seat => 2.5,
        // One clip serves both sitting down and standing up
        ActionId::StandToSeat => 1.5,
        ActionId::Kick => 1.2,
        ActionId::Jump => 1.0,
        ActionId::Walking => 1.0,
        ActionId::Collision => 0.8,
    };
    // Position tracks of the walk are discarded on load so it walks in place
    ActionDescriptor::new(id, duration, id.loop_mode()).with_in_place(id == ActionId::Walking)
}

/// Every clip in the manifest
#[allow(dead_code)]
pub fn standard_clips() -> Vec<ActionDescriptor> {
    ActionId::ALL.into_iter().map(clip_descriptor).collect()
}

#[derive(Debug, Clone, Copy)]
struct PendingClip {
    descriptor: ActionDescriptor,
    remaining: f32,
}

/// Clips that arrive one after another, each after its own latency
///
/// Stands in for an asynchronous asset pipeline: the simulation keeps
/// ticking while clips trickle into the library.
#[derive(Debug, Clone, Default)]
pub struct ClipLoader {
    pending: Vec<PendingClip>,
}

impl ClipLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every clip except idle, which ships with the character model
    pub fn standard(stagger: f32) -> Self {
        let mut loader = Self::new();
        for (i, id) in ActionId::ALL
            .into_iter()
            .filter(|id| *id != ActionId::IDLE)
            .enumerate()
        {
            loader.request(clip_descriptor(id), stagger * (i + 1) as f32);
        }
        loader
    }

    /// Queue a clip that arrives after `latency` seconds
    pub fn request(&mut self, descriptor: ActionDescriptor, latency: f32) {
        self.pending.push(PendingClip {
            descriptor,
            remaining: latency.max(0.0),
        });
    }

    /// Advance time and return the clips that arrived
    pub fn poll(&mut self, dt: f32) -> Vec<ActionDescriptor> {
        let mut arrived = Vec::new();
        self.pending.retain_mut(|clip| {
            clip.remaining -= dt;
            if clip.remaining <= 0.0 {
                arrived.push(clip.descriptor);
                false
            } else {
                true
            }
        });
        arrived
    }

    /// Advance time and register whatever arrived
    pub fn deliver(&mut self, dt: f32, library: &mut ActionLibrary) -> usize {
        let arrived = self.poll(dt);
        for descriptor in &arrived {
            info!(
                "Loaded animation: {} ({}{})",
                descriptor.id,
                descriptor.id.file_name(),
                if descriptor.in_place { ", in place" } else { "" }
            );
            library.register(descriptor.id, *descriptor);
        }

        if !arrived.is_empty() {
            if self.is_finished() {
                info!("All clips delivered");
            } else {
                debug!(
                    "{} clips pending, library missing {:?}",
                    self.pending(),
                    library.missing()
                );
            }
        }
        arrived.len()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::action::LoopMode;

    #[test]
    fn test_manifest_loop_modes() {
        for id in [
            ActionId::Kick,
            ActionId::Jump,
            ActionId::Collision,
            ActionId::StandToSeat,
        ] {
            assert_eq!(clip_descriptor(id).loop_mode, LoopMode::OneShotHold);
        }
        for id in [ActionId::Stand, ActionId::Seat, ActionId::Walking] {
            assert_eq!(clip_descriptor(id).loop_mode, LoopMode::Looping);
        }
        assert!(clip_descriptor(ActionId::Walking).in_place);
    }

    #[test]
    fn test_standard_clips_fill_library() {
        let library = ActionLibrary::from_descriptors(standard_clips());
        assert!(library.is_ready());
    }

    #[test]
    fn test_standard_loader_skips_idle() {
        let loader = ClipLoader::standard(0.1);
        assert_eq!(loader.pending(), 6);
    }

    #[test]
    fn test_clips_arrive_after_latency() {
        let mut loader = ClipLoader::new();
        loader.request(clip_descriptor(ActionId::Kick), 0.5);
        loader.request(clip_descriptor(ActionId::Jump), 1.0);

        assert!(loader.poll(0.25).is_empty());
        let arrived = loader.poll(0.25);
        assert_eq!(arrived.len(), 1);
        assert_eq!(arrived[0].id, ActionId::Kick);
        assert!(!loader.is_finished());

        assert_eq!(loader.poll(0.5)[0].id, ActionId::Jump);
        assert!(loader.is_finished());
    }

    #[test]
    fn test_deliver_registers_into_library() {
        let mut library = ActionLibrary::new();
        library.register(ActionId::Stand, clip_descriptor(ActionId::Stand));
        let mut loader = ClipLoader::standard(0.1);

        let mut delivered = 0;
        for _ in 0..10 {
            delivered += loader.deliver(0.1, &mut library);
        }
        assert_eq!(delivered, 6);
        assert!(library.is_ready());
    }
}
