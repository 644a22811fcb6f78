//! Events: named, state-scoped edges of the graph.

use super::hooks::Action;
use super::Meta;
use serde_json::Value;
use std::fmt;

/// Metadata key read by the diagram exporter as edge weight.
pub const DOC_WEIGHT: &str = "doc_weight";

/// An edge from the state that declares it to the state named by `to`.
///
/// The target is not checked when the event is declared. A target that does
/// not name a state is reported when the event is dispatched.
pub struct Event<H> {
    name: String,
    to: String,
    meta: Meta,
    pub(crate) action: Option<Action<H>>,
}

impl<H> Event<H> {
    pub(crate) fn new(
        name: String,
        to: String,
        meta: Meta,
        action: Option<Action<H>>,
    ) -> Self {
        Self {
            name,
            to,
            meta,
            action,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the target state.
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// The `doc_weight` metadata entry, if present.
    pub fn doc_weight(&self) -> Option<&Value> {
        self.meta.get(DOC_WEIGHT)
    }
}

impl<H> fmt::Debug for Event<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("to", &self.to)
            .field("meta", &self.meta)
            .field("action", &self.action.is_some())
            .finish()
    }
}
