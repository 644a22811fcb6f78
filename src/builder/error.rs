//! Definition errors raised while building a specification.

use thiserror::Error;

/// Errors that make a specification malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("No states declared. Call .state(name) before .build()")]
    NoStates,

    #[error("State '{0}' is declared twice")]
    DuplicateState(String),

    #[error("State name conflicts with state set name: {0}")]
    StateConflictsWithSet(String),

    #[error("State set name conflicts with state name: {0}")]
    SetConflictsWithState(String),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("State set '{0}' is declared twice")]
    DuplicateStateSet(String),

    #[error("Callback registered for event '{0}', which no state declares")]
    UnknownEvent(String),

    #[error("Missing target in event definition for '{event}'. Call .to(state)")]
    MissingTarget { event: String },

    #[error("{declaration} for '{name}' declared outside of a state. Call .state(name) first")]
    NoStateInScope {
        declaration: &'static str,
        name: String,
    },

    #[error("Event[{event}] on state '{state}' targets '{target}', which is not a declared state")]
    UndeclaredTarget {
        state: String,
        event: String,
        target: String,
    },
}
