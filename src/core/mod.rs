//! Graph model of a state machine.
//!
//! This module contains the data the engine runs over:
//! - States, events and state sets
//! - The `Specification` that owns them
//! - Hook and action signatures, and the `Outcome` an action returns
//! - Opt-in, bounded transition history
//!
//! Nothing here performs a transition. The engine lives in
//! [`engine`](crate::engine).

mod event;
mod history;
mod hooks;
mod specification;
mod state;
mod state_set;

pub use event::{Event, DOC_WEIGHT};
pub use history::{StateHistory, StateTransition};
pub use hooks::{Action, HaltSignal, Hook, HookError, HookResult, Outcome, Transit};
pub use specification::Specification;
pub use state::State;
pub use state_set::{SqlListOptions, StateSet};

/// Metadata attached to states and events.
pub type Meta = std::collections::BTreeMap<String, serde_json::Value>;
