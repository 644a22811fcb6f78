//! States: named nodes of the graph.
//!
//! A state owns the events that may be dispatched while the machine is in it,
//! plus its entry and exit hooks.

use super::event::Event;
use super::hooks::Hook;
use super::Meta;
use std::collections::BTreeSet;
use std::fmt;

/// A node in a [`Specification`](super::Specification).
///
/// States are created by the specification builder and are immutable once
/// the specification is built.
///
/// # Example
///
/// ```rust
/// use stateline::core::Specification;
/// use stateline::builder::EventBuilder;
///
/// let spec = Specification::<()>::builder()
///     .state("new")
///     .event(EventBuilder::new("age").to("old"))
///     .state("old")
///     .build()
///     .unwrap();
///
/// let new = spec.state("new").unwrap();
/// assert_eq!(new.name(), "new");
/// assert_eq!(new.event("age").unwrap().to(), "old");
/// assert!(new.event("rejuvenate").is_none());
/// ```
pub struct State<H> {
    name: String,
    meta: Meta,
    events: Vec<Event<H>>,
    sets: BTreeSet<String>,
    pub(crate) on_entry: Option<Hook<H>>,
    pub(crate) on_exit: Option<Hook<H>>,
    pub(crate) entry_callback: Option<Hook<H>>,
    pub(crate) exit_callback: Option<Hook<H>>,
}

impl<H> State<H> {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            meta: Meta::new(),
            events: Vec::new(),
            sets: BTreeSet::new(),
            on_entry: None,
            on_exit: None,
            entry_callback: None,
            exit_callback: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Look up an event declared on this state.
    pub fn event(&self, name: &str) -> Option<&Event<H>> {
        self.events.iter().find(|e| e.name() == name)
    }

    /// Events in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &Event<H>> {
        self.events.iter()
    }

    /// Names of the state sets this state belongs to.
    pub fn sets(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(String::as_str)
    }

    pub fn in_set(&self, set: &str) -> bool {
        self.sets.contains(set)
    }

    pub fn has_on_entry(&self) -> bool {
        self.on_entry.is_some()
    }

    pub fn has_on_exit(&self) -> bool {
        self.on_exit.is_some()
    }

    /// Hook to run when entering this state.
    ///
    /// An explicit `on_entry` hook shadows a registered entry callback.
    pub(crate) fn entry_hook(&self) -> Option<&Hook<H>> {
        self.on_entry.as_ref().or(self.entry_callback.as_ref())
    }

    /// Hook to run when leaving this state.
    pub(crate) fn exit_hook(&self) -> Option<&Hook<H>> {
        self.on_exit.as_ref().or(self.exit_callback.as_ref())
    }

    pub(crate) fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    pub(crate) fn join_set(&mut self, set: &str) {
        self.sets.insert(set.to_string());
    }

    /// Insert an event. A redeclared name replaces the earlier event in place.
    pub(crate) fn insert_event(&mut self, event: Event<H>) {
        match self.events.iter_mut().find(|e| e.name() == event.name()) {
            Some(slot) => *slot = event,
            None => self.events.push(event),
        }
    }
}

impl<H> fmt::Display for State<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<H> fmt::Debug for State<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("meta", &self.meta)
            .field("events", &self.events)
            .field("sets", &self.sets)
            .field("on_entry", &self.on_entry.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(name: &str, to: &str) -> Event<()> {
        Event::new(name.to_string(), to.to_string(), Meta::new(), None)
    }

    #[test]
    fn insert_event_keeps_declaration_order() {
        let mut state = State::<()>::new("draft".to_string());
        state.insert_event(event("submit", "review"));
        state.insert_event(event("discard", "trash"));

        let names: Vec<_> = state.events().map(|e| e.name()).collect();
        assert_eq!(names, vec!["submit", "discard"]);
    }

    #[test]
    fn redeclared_event_replaces_in_place() {
        let mut state = State::<()>::new("draft".to_string());
        state.insert_event(event("submit", "review"));
        state.insert_event(event("discard", "trash"));
        state.insert_event(event("submit", "published"));

        let names: Vec<_> = state.events().map(|e| e.name()).collect();
        assert_eq!(names, vec!["submit", "discard"]);
        assert_eq!(state.event("submit").unwrap().to(), "published");
    }

    #[test]
    fn set_membership() {
        let mut state = State::<()>::new("open".to_string());
        state.join_set("active");
        state.join_set("active");

        assert!(state.in_set("active"));
        assert!(!state.in_set("closed"));
        assert_eq!(state.sets().count(), 1);
    }

    #[test]
    fn explicit_hook_shadows_callback() {
        let mut state = State::<Vec<&'static str>>::new("open".to_string());
        state.entry_callback = Some(Box::new(|log, _| {
            log.push("callback");
            Ok(())
        }));
        state.on_entry = Some(Box::new(|log, _| {
            log.push("explicit");
            Ok(())
        }));

        let mut log = Vec::new();
        let transit = crate::core::Transit {
            from: "closed",
            to: "open",
            event: "reopen",
            args: &[],
        };
        (state.entry_hook().unwrap())(&mut log, &transit).unwrap();
        assert_eq!(log, vec!["explicit"]);
        assert!(state.exit_hook().is_none());
    }

    #[test]
    fn display_is_name_and_meta_is_mutable() {
        let mut state = State::<()>::new("main".to_string());
        state.meta_mut().insert("importance".to_string(), json!(8));

        assert_eq!(state.to_string(), "main");
        assert_eq!(state.meta()["importance"], 8);
    }
}
