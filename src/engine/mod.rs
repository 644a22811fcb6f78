//! Transition engine.
//!
//! [`Machine`] pairs a host value with a shared specification and a
//! [`StateStore`](crate::store::StateStore), and runs the dispatch protocol:
//! action, halt check, target check, `on_transition`, exit hook, store,
//! entry hook.
//!
//! # Halting
//!
//! An action returns an [`Outcome`](crate::core::Outcome). A non-fatal halt
//! makes `process_event` return `Ok(Dispatch::Halted)`; a fatal halt makes it
//! return `Err(MachineError::TransitionHalted)` or the action's own signal as
//! `MachineError::Aborted`. Either way nothing is stored, and the next
//! dispatch starts with a clean halt state.

mod dispatch;
mod error;
mod machine;

pub use dispatch::{Dispatch, HaltRecord};
pub use error::{ConfigurationError, HookKind, MachineError};
pub use machine::Machine;
