//! Builder API for declaring specifications.
//!
//! This module provides the fluent builders that turn a declarative
//! description into a [`Specification`](crate::core::Specification), and the
//! `machine_sugar!` macro for per-state and per-event helper methods.

pub mod error;
pub mod event;
pub mod macros;
pub mod specification;

pub use error::DefinitionError;
pub use event::EventBuilder;
pub use specification::SpecificationBuilder;

/// Shorthand for an event without metadata or action.
///
/// # Example
///
/// ```
/// use stateline::builder::transition;
/// use stateline::core::Specification;
///
/// let spec = Specification::<()>::builder()
///     .state("red")
///     .event(transition("go", "green"))
///     .state("green")
///     .event(transition("stop", "red"))
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.state("red").unwrap().event("go").unwrap().to(), "green");
/// ```
pub fn transition<H>(name: impl Into<String>, to: impl Into<String>) -> EventBuilder<H> {
    EventBuilder::new(name).to(to)
}
