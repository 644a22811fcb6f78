//! Hook and action signatures shared by states, events and the engine.
//!
//! Hooks observe a transition; actions decide whether it happens. An action
//! never mutates engine state directly. It reports its decision through an
//! [`Outcome`] value that the engine interprets.

use serde_json::Value;
use std::error::Error;
use std::fmt;

/// Error type returned by lifecycle hooks.
pub type HookError = Box<dyn Error + Send + Sync>;

/// Result type returned by lifecycle hooks.
pub type HookResult = Result<(), HookError>;

/// Signal propagated to the caller when an action halts fatally.
pub type HaltSignal = Box<dyn Error + Send + Sync>;

/// Entry, exit and transition hook.
///
/// Receives the host value and a description of the transition in flight.
pub type Hook<H> = Box<dyn Fn(&mut H, &Transit<'_>) -> HookResult + Send + Sync>;

/// Event action. Receives the host value and the event's trailing arguments.
pub type Action<H> = Box<dyn Fn(&mut H, &[Value]) -> Outcome + Send + Sync>;

/// The transition a hook is observing.
///
/// For an entry hook `from` is the prior state; for an exit hook `to` is the
/// state being entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transit<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub event: &'a str,
    pub args: &'a [Value],
}

/// Decision returned by an event action.
///
/// # Example
///
/// ```rust
/// use stateline::core::Outcome;
///
/// fn age(by: u64) -> Outcome {
///     if by > 100 {
///         Outcome::halt("too fast")
///     } else {
///         Outcome::proceed()
///     }
/// }
///
/// assert!(age(120).is_halt());
/// assert!(!age(1).is_halt());
/// ```
pub enum Outcome {
    /// Continue with the transition. The value is handed back to the caller.
    Proceed(Option<Value>),

    /// Abort the transition and report failure without raising.
    Halt { reason: Option<String> },

    /// Abort the transition and propagate an error to the caller.
    ///
    /// With no signal the caller receives `MachineError::TransitionHalted`.
    HaltFatal {
        reason: Option<String>,
        signal: Option<HaltSignal>,
    },
}

impl Outcome {
    /// Continue without a return value.
    pub fn proceed() -> Self {
        Outcome::Proceed(None)
    }

    /// Continue and hand `value` back to the caller of `process_event`.
    pub fn value(value: impl Into<Value>) -> Self {
        Outcome::Proceed(Some(value.into()))
    }

    /// Non-fatal halt with a reason.
    pub fn halt(reason: impl Into<String>) -> Self {
        Outcome::Halt {
            reason: Some(reason.into()),
        }
    }

    /// Fatal halt that surfaces as `MachineError::TransitionHalted`.
    pub fn halt_fatal(reason: impl Into<String>) -> Self {
        Outcome::HaltFatal {
            reason: Some(reason.into()),
            signal: None,
        }
    }

    /// Fatal halt that surfaces the caller-supplied `signal`.
    pub fn halt_with<E>(reason: impl Into<String>, signal: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Outcome::HaltFatal {
            reason: Some(reason.into()),
            signal: Some(Box::new(signal)),
        }
    }

    pub fn is_halt(&self) -> bool {
        !matches!(self, Outcome::Proceed(_))
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::proceed()
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Proceed(value) => f.debug_tuple("Proceed").field(value).finish(),
            Outcome::Halt { reason } => f.debug_struct("Halt").field("reason", reason).finish(),
            Outcome::HaltFatal { reason, signal } => f
                .debug_struct("HaltFatal")
                .field("reason", reason)
                .field("signal", &signal.as_ref().map(|s| s.to_string()))
                .finish(),
        }
    }
}
