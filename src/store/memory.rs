use super::{StateStore, StoreError};

/// Keeps the current state name in a private slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub fn with_state(state: impl Into<String>) -> Self {
        Self {
            slot: Some(state.into()),
        }
    }
}

impl StateStore for MemoryStore {
    fn load_state(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.clone())
    }

    fn store_state(&mut self, name: &str) -> Result<(), StoreError> {
        self.slot = Some(name.to_string());
        Ok(())
    }
}
