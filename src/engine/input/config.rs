// Key binding table and remapping

use super::action::{default_bindings, global_bindings, Action, InputSource};
use log::debug;
use std::collections::HashMap;

/// Which key drives which action
///
/// A source maps to at most one action; an action may have several sources.
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    #[allow(dead_code)]
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Character bindings plus global bindings
    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        config.reset_to_defaults();
        config
    }

    /// Bind a source, replacing whatever it drove before
    #[allow(dead_code)]
    pub fn bind(&mut self, source: InputSource, action: Action) {
        if let Some(previous) = self.bindings.insert(source, action) {
            if previous != action {
                debug!("{:?} rebound from {:?} to {:?}", source, previous, action);
            }
        }
    }

    /// Unbind an input source, returning the action it drove
    #[allow(dead_code)]
    pub fn unbind_source(&mut self, source: InputSource) -> Option<Action> {
        self.bindings.remove(&source)
    }

    /// Unbind all sources for an action
    #[allow(dead_code)]
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Every source bound to an action
    #[allow(dead_code)]
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(source, _)| *source)
            .collect()
    }

    #[allow(dead_code)]
    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Reset to the default bindings
    pub fn reset_to_defaults(&mut self) {
        self.bindings = default_bindings().into_iter().chain(global_bindings()).collect();
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_default_config_binds_wasd() {
        let config = InputConfig::default();
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyW)),
            Some(Action::MoveForward)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyC)),
            Some(Action::ToggleSit)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Escape)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_rebind_replaces_previous_action() {
        let mut config = InputConfig::default();
        config.bind(InputSource::key(KeyCode::KeyK), Action::Jump);

        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyK)),
            Some(Action::Jump)
        );
        assert!(!config.has_binding(Action::Kick));
        assert_eq!(config.get_sources(Action::Jump).len(), 2);
    }

    #[test]
    fn test_unbind_action_removes_all_sources() {
        let mut config = InputConfig::from_bindings(vec![
            (InputSource::key(KeyCode::ArrowUp), Action::MoveForward),
            (InputSource::key(KeyCode::KeyW), Action::MoveForward),
        ]);
        config.unbind_action(Action::MoveForward);

        assert!(!config.has_binding(Action::MoveForward));
        assert_eq!(config.get_action(InputSource::key(KeyCode::ArrowUp)), None);
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyW)), None);
    }

    #[test]
    fn test_unbind_source_returns_previous_action() {
        let mut config = InputConfig::default();
        assert_eq!(
            config.unbind_source(InputSource::key(KeyCode::KeyJ)),
            Some(Action::Jump)
        );
        assert_eq!(config.unbind_source(InputSource::key(KeyCode::KeyJ)), None);
        assert!(!config.has_binding(Action::Jump));
    }

    #[test]
    fn test_reset_to_defaults_restores_bindings() {
        let mut config = InputConfig::default();
        config.clear();
        assert!(!config.has_binding(Action::Kick));

        config.reset_to_defaults();
        assert!(config.has_binding(Action::Kick));
    }
}
