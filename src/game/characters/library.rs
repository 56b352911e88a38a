// Registry of loaded clip metadata

use std::collections::HashMap;

use log::{info, warn};

use super::action::{ActionDescriptor, ActionError, ActionId};

/// Maps action identifiers to their clip metadata
///
/// Clips arrive one by one from the asset loader. The library only reports
/// ready once every action in [`ActionId::ALL`] is present; nothing may drive
/// locomotion before that.
#[derive(Debug, Clone, Default)]
pub struct ActionLibrary {
    descriptors: HashMap<ActionId, ActionDescriptor>,
}

impl ActionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from a batch of descriptors
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = ActionDescriptor>) -> Self {
        let mut library = Self::new();
        for descriptor in descriptors {
            library.register(descriptor.id, descriptor);
        }
        library
    }

    /// Register (or replace) the descriptor for an action
    ///
    /// The loop mode is fixed per action: a clip delivered with the other
    /// mode is coerced, since a looping kick would never hand control back.
    pub fn register(&mut self, id: ActionId, mut descriptor: ActionDescriptor) {
        if descriptor.id != id {
            warn!(
                "Descriptor for {} registered under {}, relabelling",
                descriptor.id, id
            );
            descriptor.id = id;
        }
        if descriptor.loop_mode != id.loop_mode() {
            warn!(
                "Clip {} delivered as {:?}, playing it as {:?}",
                id,
                descriptor.loop_mode,
                id.loop_mode()
            );
            descriptor.loop_mode = id.loop_mode();
        }

        let was_ready = self.is_ready();
        self.descriptors.insert(id, descriptor);

        if !was_ready && self.is_ready() {
            info!("Action library ready ({} actions)", self.len());
        }
    }

    /// True once every required action is registered
    pub fn is_ready(&self) -> bool {
        ActionId::ALL.iter().all(|id| self.descriptors.contains_key(id))
    }

    /// Actions still waiting for their clip
    pub fn missing(&self) -> Vec<ActionId> {
        ActionId::ALL
            .into_iter()
            .filter(|id| !self.descriptors.contains_key(id))
            .collect()
    }

    #[allow(dead_code)]
    pub fn contains(&self, id: ActionId) -> bool {
        self.descriptors.contains_key(&id)
    }

    /// Get the descriptor for an action
    pub fn get(&self, id: ActionId) -> Result<&ActionDescriptor, ActionError> {
        self.descriptors.get(&id).ok_or(ActionError::NotReady(id))
    }

    /// Get the descriptor by asset pipeline name
    #[allow(dead_code)]
    pub fn get_by_name(&self, name: &str) -> Result<&ActionDescriptor, ActionError> {
        self.get(ActionId::from_name(name)?)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
