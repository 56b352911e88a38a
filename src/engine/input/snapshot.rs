// Per-tick input snapshot consumed by the simulation

/// Discrete single-fire triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    SitToggle,
    Kick,
    Jump,
}

/// Input state sampled fresh every tick
///
/// Movement axes are independent and may cancel each other out.
/// Trigger flags stay set until whoever owns the input clears them after
/// the simulation reports them as consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sit_toggle: bool,
    pub kick: bool,
    pub jump: bool,
}

impl InputSnapshot {
    /// A snapshot with no input at all
    #[allow(dead_code)]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Is the given trigger currently set?
    #[allow(dead_code)]
    pub fn is_triggered(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::SitToggle => self.sit_toggle,
            Trigger::Kick => self.kick,
            Trigger::Jump => self.jump,
        }
    }

    /// Set or clear a trigger flag
    pub fn set_trigger(&mut self, trigger: Trigger, value: bool) {
        match trigger {
            Trigger::SitToggle => self.sit_toggle = value,
            Trigger::Kick => self.kick = value,
            Trigger::Jump => self.jump = value,
        }
    }

    /// Builder-style helper setting a trigger
    #[allow(dead_code)]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.set_trigger(trigger, true);
        self
    }

    /// Is any movement axis held (even if the axes cancel)?
    pub fn any_axis(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_snapshot_is_empty() {
        let snapshot = InputSnapshot::idle();
        assert!(!snapshot.any_axis());
        assert!(!snapshot.is_triggered(Trigger::SitToggle));
        assert!(!snapshot.is_triggered(Trigger::Kick));
        assert!(!snapshot.is_triggered(Trigger::Jump));
    }

    #[test]
    fn test_set_and_clear_trigger() {
        let mut snapshot = InputSnapshot::idle().with_trigger(Trigger::Kick);
        assert!(snapshot.kick);
        snapshot.set_trigger(Trigger::Kick, false);
        assert!(!snapshot.kick);
    }
}
