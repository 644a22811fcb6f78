//! Errors raised while dispatching events.

use crate::checkpoint::CheckpointError;
use crate::core::{HaltSignal, HookError};
use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

/// Inconsistencies discovered at dispatch or resolution time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Event[{event}]'s to[{target}] is not a declared state")]
    UndeclaredTarget { event: String, target: String },

    #[error("No specification defined for '{tag}' or any of its ancestors")]
    MissingSpecification { tag: String },
}

/// Which hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Transition,
    Exit,
    Entry,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookKind::Transition => "on_transition",
            HookKind::Exit => "on_exit",
            HookKind::Entry => "on_entry",
        })
    }
}

/// Errors returned by `Machine` operations.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("There is no event {event} defined for the {state} state")]
    NoTransitionAllowed { state: String, event: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// An action halted fatally without supplying its own signal.
    #[error("Transition halted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    TransitionHalted { reason: Option<String> },

    /// An action halted fatally with a caller-supplied signal.
    #[error("Transition aborted: {signal}")]
    Aborted {
        reason: Option<String>,
        #[source]
        signal: HaltSignal,
    },

    #[error("{hook} hook failed in state '{state}': {source}")]
    Hook {
        hook: HookKind,
        state: String,
        #[source]
        source: HookError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

impl MachineError {
    /// Reason given by the action for a fatal halt.
    pub fn halt_reason(&self) -> Option<&str> {
        match self {
            MachineError::TransitionHalted { reason } | MachineError::Aborted { reason, .. } => {
                reason.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_halt(&self) -> bool {
        matches!(
            self,
            MachineError::TransitionHalted { .. } | MachineError::Aborted { .. }
        )
    }
}
