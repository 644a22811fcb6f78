//! Builder for events declared inside a state.

use crate::builder::error::DefinitionError;
use crate::core::{Action, Event, Meta, Outcome};
use serde_json::Value;

/// Builder for a single event with a fluent API.
///
/// The target may be given through [`to`](Self::to) or its alias
/// [`transitions_to`](Self::transitions_to); both set the same field.
pub struct EventBuilder<H> {
    name: String,
    to: Option<String>,
    meta: Meta,
    action: Option<Action<H>>,
}

impl<H> EventBuilder<H> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            to: None,
            meta: Meta::new(),
            action: None,
        }
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Alias of [`to`](Self::to).
    pub fn transitions_to(self, state: impl Into<String>) -> Self {
        self.to(state)
    }

    /// Attach a metadata entry.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Set the action run before the transition (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut H, &[Value]) -> Outcome + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the event.
    pub fn build(self) -> Result<Event<H>, DefinitionError> {
        let to = self.to.ok_or_else(|| DefinitionError::MissingTarget {
            event: self.name.clone(),
        })?;

        Ok(Event::new(self.name, to, self.meta, self.action))
    }
}
