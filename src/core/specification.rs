//! The immutable graph describing one state machine shape.

use super::hooks::{Action, Hook};
use super::state::State;
use super::state_set::StateSet;
use crate::builder::{DefinitionError, SpecificationBuilder};
use std::collections::HashMap;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

/// States, events, state sets and hooks of one machine shape.
///
/// A specification is produced by [`SpecificationBuilder`] and never mutated
/// afterwards. Machines share it behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use stateline::core::Specification;
/// use stateline::builder::EventBuilder;
///
/// let spec = Specification::<()>::builder()
///     .state("submitted")
///     .event(EventBuilder::new("accept").to("accepted"))
///     .state("accepted")
///     .event(EventBuilder::new("ship").to("shipped"))
///     .state("shipped")
///     .state_set("open", ["submitted", "accepted"])
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.initial_state().name(), "submitted");
/// assert_eq!(spec.states().count(), 3);
/// assert!(spec.state_set("open").unwrap().contains("accepted"));
/// ```
pub struct Specification<H> {
    states: Vec<State<H>>,
    index: HashMap<String, usize>,
    state_sets: Vec<StateSet>,
    on_transition: Option<Hook<H>>,
    callbacks: HashMap<String, Action<H>>,
}

impl<H> Specification<H> {
    /// Start declaring a specification.
    pub fn builder() -> SpecificationBuilder<H> {
        SpecificationBuilder::new()
    }

    /// Assemble a specification. `states` must be non-empty with unique names.
    pub(crate) fn from_parts(
        states: Vec<State<H>>,
        state_sets: Vec<StateSet>,
        on_transition: Option<Hook<H>>,
        callbacks: HashMap<String, Action<H>>,
    ) -> Self {
        let index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name().to_string(), i))
            .collect();
        Self {
            states,
            index,
            state_sets,
            on_transition,
            callbacks,
        }
    }

    /// The first declared state.
    pub fn initial_state(&self) -> &State<H> {
        &self.states[0]
    }

    pub fn state(&self, name: &str) -> Option<&State<H>> {
        self.index.get(name).map(|&i| &self.states[i])
    }

    /// States in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &State<H>> {
        self.states.iter()
    }

    pub fn state_set(&self, name: &str) -> Option<&StateSet> {
        self.state_sets.iter().find(|s| s.name() == name)
    }

    pub fn state_sets(&self) -> impl Iterator<Item = &StateSet> {
        self.state_sets.iter()
    }

    pub fn has_on_transition(&self) -> bool {
        self.on_transition.is_some()
    }

    pub(crate) fn on_transition(&self) -> Option<&Hook<H>> {
        self.on_transition.as_ref()
    }

    /// Action registered for events named `event` that declare no action.
    pub(crate) fn event_callback(&self, event: &str) -> Option<&Action<H>> {
        self.callbacks.get(event)
    }

    /// Map a persisted state name onto a declared state.
    ///
    /// An absent, empty or undeclared name resolves to the initial state.
    pub fn resolve_state(&self, persisted: Option<&str>) -> &State<H> {
        match persisted {
            None | Some("") => self.initial_state(),
            Some(name) => self.state(name).unwrap_or_else(|| {
                warn!(
                    persisted = name,
                    initial = self.initial_state().name(),
                    "persisted state is not declared, falling back to initial state"
                );
                self.initial_state()
            }),
        }
    }

    /// Check every event target up front.
    ///
    /// Dispatch validates targets lazily; this reports all dangling targets
    /// at once instead of one per failed dispatch.
    pub fn validate_targets(&self) -> Validation<(), NonEmptyVec<DefinitionError>> {
        let checks: Vec<Validation<(), NonEmptyVec<DefinitionError>>> = self
            .states
            .iter()
            .flat_map(|state| state.events().map(move |event| (state, event)))
            .map(|(state, event)| {
                if self.index.contains_key(event.to()) {
                    Validation::success(())
                } else {
                    Validation::fail(DefinitionError::UndeclaredTarget {
                        state: state.name().to_string(),
                        event: event.name().to_string(),
                        target: event.to().to_string(),
                    })
                }
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<H> fmt::Debug for Specification<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("states", &self.states)
            .field("state_sets", &self.state_sets)
            .field("on_transition", &self.on_transition.is_some())
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::EventBuilder;

    fn order_spec() -> Specification<()> {
        Specification::builder()
            .state("submitted")
            .event(EventBuilder::new("accept").to("accepted"))
            .state("accepted")
            .event(EventBuilder::new("ship").to("shipped"))
            .state("shipped")
            .build()
            .unwrap()
    }

    #[test]
    fn initial_state_is_first_declared() {
        assert_eq!(order_spec().initial_state().name(), "submitted");
    }

    #[test]
    fn resolve_state_falls_back_to_initial() {
        let spec = order_spec();

        assert_eq!(spec.resolve_state(None).name(), "submitted");
        assert_eq!(spec.resolve_state(Some("")).name(), "submitted");
        assert_eq!(spec.resolve_state(Some("lost")).name(), "submitted");
        assert_eq!(spec.resolve_state(Some("shipped")).name(), "shipped");
    }

    #[test]
    fn states_iterate_in_declaration_order() {
        let names: Vec<_> = order_spec().states().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["submitted", "accepted", "shipped"]);
    }

    #[test]
    fn validate_targets_passes_for_closed_graph() {
        assert!(order_spec().validate_targets().is_success());
    }

    #[test]
    fn validate_targets_reports_every_dangling_target() {
        let spec: Specification<()> = Specification::builder()
            .state("initial")
            .event(EventBuilder::new("solve").to("solved"))
            .event(EventBuilder::new("give_up").to("abandoned"))
            .event(EventBuilder::new("retry").to("initial"))
            .build()
            .unwrap();

        match spec.validate_targets() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| matches!(
                    e,
                    DefinitionError::UndeclaredTarget { target, .. } if target == "solved"
                )));
                assert!(errors.iter().any(|e| matches!(
                    e,
                    DefinitionError::UndeclaredTarget { target, .. } if target == "abandoned"
                )));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }
}
