//! Machine: a host value driven by a specification.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{
    Event, Hook, Outcome, Specification, State, StateHistory, StateTransition, Transit,
};
use crate::engine::dispatch::{Dispatch, HaltRecord};
use crate::engine::error::{ConfigurationError, HookKind, MachineError};
use crate::resolver::Registry;
use crate::store::{MemoryStore, StateStore};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// A host value whose current state is governed by a [`Specification`].
///
/// Actions and hooks receive `&mut H`. The current state lives in the store
/// `S`, never in the machine itself. Besides the host and the store, a machine
/// holds only the last halt and, if enabled with
/// [`with_history`](Self::with_history), a bounded transition history.
pub struct Machine<H, S = MemoryStore> {
    spec: Arc<Specification<H>>,
    host: H,
    store: S,
    halt: Option<HaltRecord>,
    history: Option<StateHistory>,
}

impl<H> Machine<H, MemoryStore> {
    /// Create a machine that keeps its state in memory.
    pub fn new(spec: Arc<Specification<H>>, host: H) -> Self {
        Self::with_store(spec, host, MemoryStore::new())
    }
}

impl<H, S: StateStore> Machine<H, S> {
    /// Create a machine persisting through `store`.
    pub fn with_store(spec: Arc<Specification<H>>, host: H, store: S) -> Self {
        Self {
            spec,
            host,
            store,
            halt: None,
            history: None,
        }
    }

    /// Keep the last `capacity` committed transitions.
    pub fn with_history(mut self, capacity: usize) -> Self {
        self.history = Some(StateHistory::new(capacity));
        self
    }

    /// Create a machine with the specification resolved for `tag`.
    pub fn from_registry(
        registry: &Registry<H>,
        tag: &str,
        host: H,
        store: S,
    ) -> Result<Self, ConfigurationError> {
        let spec = registry.resolve(tag)?;
        Ok(Self::with_store(spec, host, store))
    }

    /// Rebuild a machine from a checkpoint.
    ///
    /// The checkpoint must come from a specification with the same initial
    /// state. The checkpointed state is written through `store`, replacing
    /// whatever it held, and the history is restored if one was saved.
    pub fn resume(
        spec: Arc<Specification<H>>,
        host: H,
        mut store: S,
        checkpoint: Checkpoint,
    ) -> Result<Self, MachineError> {
        checkpoint.validate_version()?;
        if checkpoint.initial_state != spec.initial_state().name() {
            return Err(CheckpointError::SpecificationMismatch {
                expected: spec.initial_state().name().to_string(),
                found: checkpoint.initial_state,
            }
            .into());
        }
        if spec.state(&checkpoint.current_state).is_none() {
            return Err(CheckpointError::UndeclaredState {
                state: checkpoint.current_state,
            }
            .into());
        }

        store.store_state(&checkpoint.current_state)?;
        debug!(
            checkpoint = %checkpoint.id,
            state = %checkpoint.current_state,
            "resumed from checkpoint"
        );

        Ok(Self {
            spec,
            host,
            store,
            halt: None,
            history: checkpoint.history,
        })
    }

    pub fn spec(&self) -> &Arc<Specification<H>> {
        &self.spec
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (H, S) {
        (self.host, self.store)
    }

    /// Recent committed transitions, `None` unless enabled.
    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }

    /// The current state as seen through the store.
    ///
    /// An unset, empty or undeclared stored name resolves to the initial
    /// state.
    pub fn current_state(&self) -> Result<&State<H>, MachineError> {
        let loaded = self.store.load_state()?;
        Ok(self.spec.resolve_state(loaded.as_deref()))
    }

    /// Whether the current state is `state`.
    pub fn is_in(&self, state: &str) -> Result<bool, MachineError> {
        Ok(self.current_state()?.name() == state)
    }

    /// Whether the current state belongs to the state set `set`.
    pub fn in_set(&self, set: &str) -> Result<bool, MachineError> {
        Ok(self.current_state()?.in_set(set))
    }

    /// Whether the most recent dispatch was halted.
    pub fn halted(&self) -> bool {
        self.halt.is_some()
    }

    /// Reason given by the most recent halt.
    pub fn halted_because(&self) -> Option<&str> {
        self.halt.as_ref().and_then(|h| h.reason.as_deref())
    }

    pub fn last_halt(&self) -> Option<&HaltRecord> {
        self.halt.as_ref()
    }

    /// Snapshot the persisted state and history.
    pub fn checkpoint(&self) -> Result<Checkpoint, MachineError> {
        let current = self.current_state()?.name().to_string();
        Ok(Checkpoint::new(
            self.spec.initial_state().name().to_string(),
            current,
            self.history.clone(),
        ))
    }

    /// Dispatch `name` with trailing `args`.
    ///
    /// The protocol runs in this order:
    /// 1. look up the event on the current state
    /// 2. clear the previous halt
    /// 3. run the action, or the registered event callback
    /// 4. stop here if the action halted
    /// 5. resolve the target state
    /// 6. run `on_transition`
    /// 7. run the exit hook, store the target, run the entry hook
    pub fn process_event(&mut self, name: &str, args: &[Value]) -> Result<Dispatch, MachineError> {
        let spec = Arc::clone(&self.spec);
        let loaded = self.store.load_state()?;
        let from = spec.resolve_state(loaded.as_deref());

        let event = from
            .event(name)
            .ok_or_else(|| MachineError::NoTransitionAllowed {
                state: from.name().to_string(),
                event: name.to_string(),
            })?;

        self.halt = None;

        let value = match self.run_action(&spec, event, args) {
            Outcome::Proceed(value) => value,
            Outcome::Halt { reason } => {
                debug!(event = name, state = from.name(), ?reason, "transition halted");
                self.halt = Some(HaltRecord {
                    reason: reason.clone(),
                    fatal: false,
                });
                return Ok(Dispatch::Halted { reason });
            }
            Outcome::HaltFatal { reason, signal } => {
                debug!(event = name, state = from.name(), ?reason, "transition halted fatally");
                self.halt = Some(HaltRecord {
                    reason: reason.clone(),
                    fatal: true,
                });
                return Err(match signal {
                    Some(signal) => MachineError::Aborted { reason, signal },
                    None => MachineError::TransitionHalted { reason },
                });
            }
        };

        let to = spec
            .state(event.to())
            .ok_or_else(|| ConfigurationError::UndeclaredTarget {
                event: name.to_string(),
                target: event.to().to_string(),
            })?;

        let transit = Transit {
            from: from.name(),
            to: to.name(),
            event: name,
            args,
        };

        run_hook(spec.on_transition(), &mut self.host, &transit, HookKind::Transition, from)?;
        run_hook(from.exit_hook(), &mut self.host, &transit, HookKind::Exit, from)?;
        self.store.store_state(to.name())?;
        run_hook(to.entry_hook(), &mut self.host, &transit, HookKind::Entry, to)?;

        if let Some(history) = self.history.as_mut() {
            history.push(StateTransition {
                from: from.name().to_string(),
                to: to.name().to_string(),
                event: name.to_string(),
                timestamp: Utc::now(),
            });
        }
        info!(event = name, from = from.name(), to = to.name(), "transition committed");

        Ok(Dispatch::Transitioned {
            from: from.name().to_string(),
            to: to.name().to_string(),
            event: name.to_string(),
            value,
        })
    }

    fn run_action(&mut self, spec: &Specification<H>, event: &Event<H>, args: &[Value]) -> Outcome {
        match (&event.action, spec.event_callback(event.name())) {
            (Some(action), _) => action(&mut self.host, args),
            (None, Some(callback)) => callback(&mut self.host, args),
            (None, None) => Outcome::proceed(),
        }
    }
}

fn run_hook<H>(
    hook: Option<&Hook<H>>,
    host: &mut H,
    transit: &Transit<'_>,
    kind: HookKind,
    state: &State<H>,
) -> Result<(), MachineError> {
    let Some(hook) = hook else {
        return Ok(());
    };
    hook(host, transit).map_err(|source| MachineError::Hook {
        hook: kind,
        state: state.name().to_string(),
        source,
    })
}
