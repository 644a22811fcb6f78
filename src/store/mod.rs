//! Persistence of the current state name.
//!
//! The engine reads and writes the current state only through
//! [`StateStore`]. Two implementations ship with the crate:
//! - [`MemoryStore`]: a private slot, the default for `Machine::new`
//! - [`RecordStore`]: a JSON record (row or document) with a configurable
//!   column name

mod error;
mod memory;
mod record;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use record::{RecordStore, StoreConfig, DEFAULT_COLUMN};

/// Load/store pair the engine persists the current state through.
///
/// `store_state` is treated as complete when it returns. Implementations
/// backed by a database must keep the "absent means initial state" contract:
/// an unset value loads as `None`.
///
/// # Example
///
/// ```rust
/// use stateline::store::{StateStore, StoreError};
/// use std::collections::HashMap;
///
/// /// Keeps states for many documents in one map, keyed by document id.
/// struct DocumentStore<'a> {
///     id: u64,
///     documents: &'a mut HashMap<u64, String>,
/// }
///
/// impl StateStore for DocumentStore<'_> {
///     fn load_state(&self) -> Result<Option<String>, StoreError> {
///         Ok(self.documents.get(&self.id).cloned())
///     }
///
///     fn store_state(&mut self, name: &str) -> Result<(), StoreError> {
///         self.documents.insert(self.id, name.to_string());
///         Ok(())
///     }
/// }
/// ```
pub trait StateStore {
    /// The last stored state name, or `None` if never set.
    fn load_state(&self) -> Result<Option<String>, StoreError>;

    /// Record `name` as the current state.
    fn store_state(&mut self, name: &str) -> Result<(), StoreError>;
}

impl<T: StateStore + ?Sized> StateStore for &mut T {
    fn load_state(&self) -> Result<Option<String>, StoreError> {
        (**self).load_state()
    }

    fn store_state(&mut self, name: &str) -> Result<(), StoreError> {
        (**self).store_state(name)
    }
}

impl<T: StateStore + ?Sized> StateStore for Box<T> {
    fn load_state(&self) -> Result<Option<String>, StoreError> {
        (**self).load_state()
    }

    fn store_state(&mut self, name: &str) -> Result<(), StoreError> {
        (**self).store_state(name)
    }
}
