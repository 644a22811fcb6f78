//! Results of a single dispatch.

use serde_json::Value;

/// Result of a dispatch that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    /// The transition was committed.
    Transitioned {
        from: String,
        to: String,
        event: String,
        /// Value returned by the action, if any
        value: Option<Value>,
    },

    /// The action halted without raising. Nothing changed.
    Halted { reason: Option<String> },
}

impl Dispatch {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Dispatch::Transitioned { .. })
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Dispatch::Halted { .. })
    }

    /// Value returned by the action of a committed transition.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Dispatch::Transitioned { value, .. } => value.as_ref(),
            Dispatch::Halted { .. } => None,
        }
    }
}

/// Halt recorded by the most recent dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HaltRecord {
    pub reason: Option<String>,
    pub fatal: bool,
}
