//! Checkpoint and resume for machines.
//!
//! A checkpoint captures what a machine needs to continue after a restart:
//! the current state name and, when the machine records one, its transition
//! history. Hooks and actions are not serializable and come from the
//! specification the machine is resumed with, which must have the same
//! initial state as the one the checkpoint was taken under.

use crate::core::StateHistory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine.
///
/// # Example
///
/// ```rust
/// use stateline::builder::transition;
/// use stateline::checkpoint::Checkpoint;
/// use stateline::core::Specification;
/// use stateline::engine::Machine;
/// use stateline::store::MemoryStore;
/// use std::sync::Arc;
///
/// let spec = Arc::new(
///     Specification::<()>::builder()
///         .state("submitted")
///         .event(transition("accept", "accepted"))
///         .state("accepted")
///         .build()
///         .unwrap(),
/// );
///
/// let mut machine = Machine::new(Arc::clone(&spec), ()).with_history(16);
/// machine.process_event("accept", &[]).unwrap();
///
/// let json = machine.checkpoint().unwrap().to_json().unwrap();
/// let restored = Checkpoint::from_json(&json).unwrap();
/// let resumed = Machine::resume(spec, (), MemoryStore::new(), restored).unwrap();
///
/// assert!(resumed.is_in("accepted").unwrap());
/// assert_eq!(resumed.history().unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the specification the checkpoint was taken from
    pub initial_state: String,

    /// Current state of the machine
    pub current_state: String,

    /// Recent transitions, if the machine kept a history
    #[serde(default)]
    pub history: Option<StateHistory>,
}

impl Checkpoint {
    pub fn new(
        initial_state: String,
        current_state: String,
        history: Option<StateHistory>,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            initial_state,
            current_state,
            history,
        }
    }

    /// Reject checkpoints written by an unknown format version.
    pub fn validate_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.validate_version()?;
        Ok(checkpoint)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.validate_version()?;
        Ok(checkpoint)
    }
}
