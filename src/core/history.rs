//! Transition history tracking.
//!
//! Machines keep no history unless asked to. An enabled history is a ring of
//! fixed capacity: once full, recording a transition drops the oldest one.
//! Halted and rejected dispatches leave no record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use stateline::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "submitted".to_string(),
///     to: "accepted".to_string(),
///     event: "accept".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "accept");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being left
    pub from: String,
    /// The state being entered
    pub to: String,
    /// The event that triggered the transition
    pub event: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// The most recent committed transitions, oldest first.
///
/// Holds at most `capacity` entries. Recording is constant time.
///
/// # Example
///
/// ```rust
/// use stateline::builder::transition;
/// use stateline::core::Specification;
/// use stateline::engine::Machine;
/// use std::sync::Arc;
///
/// let spec = Specification::<()>::builder()
///     .state("on")
///     .event(transition("flip", "off"))
///     .state("off")
///     .event(transition("flip", "on"))
///     .build()
///     .unwrap();
///
/// let mut switch = Machine::new(Arc::new(spec), ()).with_history(2);
/// for _ in 0..3 {
///     switch.process_event("flip", &[]).unwrap();
/// }
///
/// let history = switch.history().unwrap();
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), vec!["off", "on", "off"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    capacity: usize,
    transitions: VecDeque<StateTransition>,
}

impl StateHistory {
    /// An empty history keeping at most `capacity` transitions (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append in place, evicting the oldest entry when full.
    pub(crate) fn push(&mut self, transition: StateTransition) {
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// States traversed: the oldest retained `from`, then each `to`.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }

    /// Time between the oldest and newest retained transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
