//! Builder for constructing specifications.

use crate::builder::error::DefinitionError;
use crate::builder::event::EventBuilder;
use crate::core::{Action, Hook, HookResult, Outcome, Specification, State, StateSet, Transit};
use serde_json::Value;
use std::collections::HashMap;

/// Builder for a [`Specification`] with a fluent API.
///
/// `state` opens a scope: `event`, `meta`, `on_entry` and `on_exit` attach to
/// the most recently declared state. The first error is kept and returned by
/// `build`; declarations after it are ignored.
pub struct SpecificationBuilder<H> {
    states: Vec<State<H>>,
    index: HashMap<String, usize>,
    state_sets: Vec<StateSet>,
    scoped: Option<usize>,
    on_transition: Option<Hook<H>>,
    callbacks: HashMap<String, Action<H>>,
    entry_callbacks: Vec<(String, Hook<H>)>,
    exit_callbacks: Vec<(String, Hook<H>)>,
    error: Option<DefinitionError>,
}

impl<H> SpecificationBuilder<H> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
            state_sets: Vec::new(),
            scoped: None,
            on_transition: None,
            callbacks: HashMap::new(),
            entry_callbacks: Vec::new(),
            exit_callbacks: Vec::new(),
            error: None,
        }
    }

    fn fail(mut self, error: DefinitionError) -> Self {
        self.error.get_or_insert(error);
        self
    }

    fn scoped_state(&mut self) -> Option<&mut State<H>> {
        match self.scoped {
            Some(i) => self.states.get_mut(i),
            None => None,
        }
    }

    /// Declare a state and make it the current scope.
    ///
    /// The first declared state is the initial state.
    pub fn state(mut self, name: impl Into<String>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let name = name.into();
        if self.state_sets.iter().any(|s| s.name() == name) {
            return self.fail(DefinitionError::StateConflictsWithSet(name));
        }
        if self.index.contains_key(&name) {
            return self.fail(DefinitionError::DuplicateState(name));
        }

        self.index.insert(name.clone(), self.states.len());
        self.scoped = Some(self.states.len());
        self.states.push(State::new(name));
        self
    }

    /// Attach a metadata entry to the scoped state.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let key = key.into();
        match self.scoped_state() {
            Some(state) => {
                state.meta_mut().insert(key, value.into());
                self
            }
            None => self.fail(DefinitionError::NoStateInScope {
                declaration: "meta",
                name: key,
            }),
        }
    }

    /// Declare an event on the scoped state.
    ///
    /// Redeclaring an event name on the same state replaces the earlier one.
    pub fn event(mut self, event: EventBuilder<H>) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.scoped.is_none() {
            let name = event.name().to_string();
            return self.fail(DefinitionError::NoStateInScope {
                declaration: "event",
                name,
            });
        }
        match event.build() {
            Ok(event) => {
                if let Some(state) = self.scoped_state() {
                    state.insert_event(event);
                }
                self
            }
            Err(e) => self.fail(e),
        }
    }

    /// Set the entry hook of the scoped state. Last write wins.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &Transit<'_>) -> HookResult + Send + Sync + 'static,
    {
        if self.error.is_some() {
            return self;
        }
        match self.scoped_state() {
            Some(state) => {
                state.on_entry = Some(Box::new(hook));
                self
            }
            None => self.fail(DefinitionError::NoStateInScope {
                declaration: "on_entry",
                name: String::new(),
            }),
        }
    }

    /// Set the exit hook of the scoped state. Last write wins.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &Transit<'_>) -> HookResult + Send + Sync + 'static,
    {
        if self.error.is_some() {
            return self;
        }
        match self.scoped_state() {
            Some(state) => {
                state.on_exit = Some(Box::new(hook));
                self
            }
            None => self.fail(DefinitionError::NoStateInScope {
                declaration: "on_exit",
                name: String::new(),
            }),
        }
    }

    /// Declare a named group of already declared states.
    ///
    /// Duplicate members are collapsed. Each set name may be declared once.
    pub fn state_set<I, N>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        if self.error.is_some() {
            return self;
        }
        let name = name.into();
        if self.index.contains_key(&name) {
            return self.fail(DefinitionError::SetConflictsWithState(name));
        }
        if self.state_sets.iter().any(|s| s.name() == name) {
            return self.fail(DefinitionError::DuplicateStateSet(name));
        }

        let mut names: Vec<String> = Vec::new();
        for member in members {
            let member = member.into();
            if !names.contains(&member) {
                names.push(member);
            }
        }

        let mut positions = Vec::with_capacity(names.len());
        for member in &names {
            match self.index.get(member) {
                Some(&i) => positions.push(i),
                None => return self.fail(DefinitionError::UnknownState(member.clone())),
            }
        }
        for i in positions {
            self.states[i].join_set(&name);
        }

        self.state_sets.push(StateSet::new(name, names));
        self
    }

    /// Set the hook run on every transition, before exit and entry hooks.
    /// Last write wins.
    pub fn on_transition<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &Transit<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.on_transition = Some(Box::new(hook));
        self
    }

    /// Register the action run for events named `event` that declare none.
    ///
    /// `build` fails if no state declares an event of that name.
    pub fn event_callback<F>(mut self, event: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut H, &[Value]) -> Outcome + Send + Sync + 'static,
    {
        self.callbacks.insert(event.into(), Box::new(action));
        self
    }

    /// Register the entry hook used when `state` declares no `on_entry`.
    pub fn entry_callback<F>(mut self, state: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut H, &Transit<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.entry_callbacks.push((state.into(), Box::new(hook)));
        self
    }

    /// Register the exit hook used when `state` declares no `on_exit`.
    pub fn exit_callback<F>(mut self, state: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut H, &Transit<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.exit_callbacks.push((state.into(), Box::new(hook)));
        self
    }

    /// Build the specification.
    pub fn build(mut self) -> Result<Specification<H>, DefinitionError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.states.is_empty() {
            return Err(DefinitionError::NoStates);
        }

        let mut undeclared: Vec<&String> = self
            .callbacks
            .keys()
            .filter(|event| self.states.iter().all(|s| s.event(event).is_none()))
            .collect();
        undeclared.sort();
        if let Some(event) = undeclared.first() {
            return Err(DefinitionError::UnknownEvent(event.to_string()));
        }

        for (state, hook) in self.entry_callbacks {
            let i = *self
                .index
                .get(&state)
                .ok_or(DefinitionError::UnknownState(state))?;
            self.states[i].entry_callback = Some(hook);
        }
        for (state, hook) in self.exit_callbacks {
            let i = *self
                .index
                .get(&state)
                .ok_or(DefinitionError::UnknownState(state))?;
            self.states[i].exit_callback = Some(hook);
        }

        Ok(Specification::from_parts(
            self.states,
            self.state_sets,
            self.on_transition,
            self.callbacks,
        ))
    }
}

impl<H> Default for SpecificationBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_requires_states() {
        let result = SpecificationBuilder::<()>::new().build();
        assert_eq!(result.unwrap_err(), DefinitionError::NoStates);
    }

    #[test]
    fn first_state_is_initial() {
        let spec = SpecificationBuilder::<()>::new()
            .state("one")
            .state("two")
            .build()
            .unwrap();

        assert_eq!(spec.initial_state().name(), "one");
    }

    #[test]
    fn duplicate_state_is_rejected() {
        let result = SpecificationBuilder::<()>::new()
            .state("one")
            .state("one")
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::DuplicateState("one".to_string())
        );
    }

    #[test]
    fn missing_target_names_the_event() {
        let result = SpecificationBuilder::<()>::new()
            .state("new")
            .event(EventBuilder::new("event1"))
            .state("next")
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::MissingTarget {
                event: "event1".to_string()
            }
        );
    }

    #[test]
    fn event_outside_state_is_rejected() {
        let result = SpecificationBuilder::<()>::new()
            .event(EventBuilder::new("go").to("somewhere"))
            .state("somewhere")
            .build();

        assert!(matches!(
            result,
            Err(DefinitionError::NoStateInScope {
                declaration: "event",
                ..
            })
        ));
    }

    #[test]
    fn first_error_wins() {
        let result = SpecificationBuilder::<()>::new()
            .state("a")
            .state("a")
            .event(EventBuilder::new("broken"))
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::DuplicateState("a".to_string())
        );
    }

    #[test]
    fn hooks_attach_to_the_scoped_state() {
        let spec = SpecificationBuilder::<()>::new()
            .state("new")
            .event(EventBuilder::new("age").to("old"))
            .on_exit(|_, _| Ok(()))
            .state("old")
            .on_entry(|_, _| Ok(()))
            .meta("importance", 8)
            .build()
            .unwrap();

        let new = spec.state("new").unwrap();
        let old = spec.state("old").unwrap();
        assert!(new.has_on_exit());
        assert!(!new.has_on_entry());
        assert!(old.has_on_entry());
        assert!(!old.has_on_exit());
        assert_eq!(old.meta()["importance"], json!(8));
    }

    #[test]
    fn state_set_deduplicates_and_records_membership() {
        let spec = SpecificationBuilder::<()>::new()
            .state("pending")
            .state("active")
            .state("closed")
            .state_set("open", ["pending", "active", "pending"])
            .build()
            .unwrap();

        let open = spec.state_set("open").unwrap();
        assert_eq!(open.state_names(), &["pending".to_string(), "active".to_string()]);
        assert!(spec.state("pending").unwrap().in_set("open"));
        assert!(!spec.state("closed").unwrap().in_set("open"));
    }

    #[test]
    fn state_set_with_unknown_member_is_rejected() {
        let result = SpecificationBuilder::<()>::new()
            .state("pending")
            .state_set("open", ["pending", "missing"])
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownState("missing".to_string())
        );
    }

    #[test]
    fn set_name_cannot_shadow_state() {
        let result = SpecificationBuilder::<()>::new()
            .state("open")
            .state_set("open", ["open"])
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::SetConflictsWithState("open".to_string())
        );
    }

    #[test]
    fn state_name_cannot_shadow_set() {
        let result = SpecificationBuilder::<()>::new()
            .state("pending")
            .state_set("open", ["pending"])
            .state("open")
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::StateConflictsWithSet("open".to_string())
        );
    }

    #[test]
    fn state_set_cannot_be_redeclared() {
        let result = SpecificationBuilder::<()>::new()
            .state("a")
            .state("b")
            .state_set("open", ["a"])
            .state_set("open", ["b"])
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::DuplicateStateSet("open".to_string())
        );
    }

    #[test]
    fn event_callback_for_undeclared_event_is_rejected() {
        let result = SpecificationBuilder::<()>::new()
            .state("new")
            .event(EventBuilder::new("age").to("old"))
            .state("old")
            .event_callback("agee", |_, _| Outcome::proceed())
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownEvent("agee".to_string())
        );
    }

    #[test]
    fn event_callback_for_declared_event_is_accepted() {
        let spec = SpecificationBuilder::<()>::new()
            .state("new")
            .event(EventBuilder::new("age").to("old"))
            .state("old")
            .event_callback("age", |_, _| Outcome::proceed())
            .build()
            .unwrap();

        assert!(spec.event_callback("age").is_some());
    }

    #[test]
    fn callback_for_unknown_state_is_rejected() {
        let result = SpecificationBuilder::<()>::new()
            .state("new")
            .entry_callback("ghost", |_, _| Ok(()))
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownState("ghost".to_string())
        );
    }

    #[test]
    fn on_transition_last_write_wins() {
        let spec = SpecificationBuilder::<Vec<u8>>::new()
            .state("one")
            .on_transition(|log, _| {
                log.push(1);
                Ok(())
            })
            .on_transition(|log, _| {
                log.push(2);
                Ok(())
            })
            .build()
            .unwrap();

        let mut log = Vec::new();
        let transit = Transit {
            from: "one",
            to: "one",
            event: "noop",
            args: &[],
        };
        (spec.on_transition().unwrap())(&mut log, &transit).unwrap();
        assert_eq!(log, vec![2]);
    }
}
