//! Record-backed store with a configurable state column.

use super::{StateStore, StoreError};
use crate::core::Specification;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Column used when none is configured.
pub const DEFAULT_COLUMN: &str = "current_state";

/// Per-type persistence configuration.
///
/// ```rust
/// use stateline::store::StoreConfig;
///
/// let config: StoreConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.column, "current_state");
///
/// let legacy: StoreConfig = serde_json::from_str(r#"{"column": "foo_bar"}"#).unwrap();
/// assert_eq!(legacy.column, "foo_bar");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the attribute holding the current state
    pub column: String,
}

impl StoreConfig {
    pub fn with_column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
        }
    }
}

/// Stores the current state in one column of a JSON record.
///
/// A missing or null column loads as unset. Every `store_state` writes the
/// record immediately.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordStore {
    record: Map<String, Value>,
    config: StoreConfig,
}

impl RecordStore {
    pub fn new(record: Map<String, Value>, config: StoreConfig) -> Self {
        Self { record, config }
    }

    /// An empty record with the default column.
    pub fn empty() -> Self {
        Self::new(Map::new(), StoreConfig::default())
    }

    pub fn column(&self) -> &str {
        &self.config.column
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.record
    }

    pub fn into_record(self) -> Map<String, Value> {
        self.record
    }

    /// Write the resolved current state into the column.
    ///
    /// A new record has no state yet, which reads as the initial state.
    /// Writing it out lets queries filter records by state immediately.
    pub fn write_initial_state<H>(&mut self, spec: &Specification<H>) -> Result<(), StoreError> {
        let loaded = self.load_state()?;
        let name = spec.resolve_state(loaded.as_deref()).name().to_string();
        debug!(column = %self.config.column, state = %name, "writing initial state");
        self.store_state(&name)
    }
}

impl StateStore for RecordStore {
    fn load_state(&self) -> Result<Option<String>, StoreError> {
        match self.record.get(&self.config.column) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(name)) => Ok(Some(name.clone())),
            Some(other) => Err(StoreError::InvalidValue {
                column: self.config.column.clone(),
                found: other.clone(),
            }),
        }
    }

    fn store_state(&mut self, name: &str) -> Result<(), StoreError> {
        self.record
            .insert(self.config.column.clone(), Value::String(name.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::transition;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn order_spec() -> Specification<()> {
        Specification::builder()
            .state("submitted")
            .event(transition("accept", "accepted"))
            .state("accepted")
            .build()
            .unwrap()
    }

    #[test]
    fn null_column_loads_as_unset() {
        let store = RecordStore::new(
            record(json!({"title": "nil state", "current_state": null})),
            StoreConfig::default(),
        );
        assert_eq!(store.load_state().unwrap(), None);
    }

    #[test]
    fn custom_column_is_used() {
        let mut store = RecordStore::new(
            record(json!({"title": "some order", "foo_bar": "accepted"})),
            StoreConfig::with_column("foo_bar"),
        );
        assert_eq!(store.load_state().unwrap().as_deref(), Some("accepted"));

        store.store_state("shipped").unwrap();
        assert_eq!(store.record()["foo_bar"], "shipped");
        assert!(!store.record().contains_key(DEFAULT_COLUMN));
    }

    #[test]
    fn non_string_column_is_rejected() {
        let store = RecordStore::new(record(json!({"current_state": 3})), StoreConfig::default());
        assert!(matches!(
            store.load_state(),
            Err(StoreError::InvalidValue { .. })
        ));
    }

    #[test]
    fn write_initial_state_fills_new_records() {
        let mut store = RecordStore::empty();
        store.write_initial_state(&order_spec()).unwrap();
        assert_eq!(store.record()["current_state"], "submitted");
    }

    #[test]
    fn write_initial_state_keeps_existing_state() {
        let mut store = RecordStore::new(
            record(json!({"current_state": "accepted"})),
            StoreConfig::default(),
        );
        store.write_initial_state(&order_spec()).unwrap();
        assert_eq!(store.record()["current_state"], "accepted");
    }
}
