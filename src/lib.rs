//! Stateline: a declarative finite state machine engine
//!
//! A host type declares its states, the events legal in each state, the
//! state each event leads to, and hooks run on entry, exit and transition.
//! The engine keeps no state of its own: the current state is read from and
//! written to a pluggable store.
//!
//! # Core Concepts
//!
//! - **Specification**: immutable graph of states, events and hooks, built
//!   once per type with the fluent builder
//! - **Machine**: a host value plus a store, driven by `process_event`
//! - **Outcome**: what an action decides (proceed, halt, halt fatally)
//! - **Registry**: specification lookup across a type hierarchy
//!
//! # Example
//!
//! ```rust
//! use stateline::builder::EventBuilder;
//! use stateline::core::{Outcome, Specification};
//! use stateline::engine::{Dispatch, Machine};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Article {
//!     reviews: u32,
//! }
//!
//! let spec = Specification::builder()
//!     .state("new")
//!     .event(EventBuilder::new("submit").to("awaiting_review"))
//!     .state("awaiting_review")
//!     .event(
//!         EventBuilder::new("review")
//!             .to("reviewed")
//!             .action(|article: &mut Article, _args| {
//!                 article.reviews += 1;
//!                 if article.reviews < 2 {
//!                     Outcome::halt("needs a second reviewer")
//!                 } else {
//!                     Outcome::proceed()
//!                 }
//!             }),
//!     )
//!     .state("reviewed")
//!     .build()
//!     .unwrap();
//!
//! let mut article = Machine::new(Arc::new(spec), Article::default());
//! article.process_event("submit", &[]).unwrap();
//!
//! let first = article.process_event("review", &[]).unwrap();
//! assert!(matches!(first, Dispatch::Halted { .. }));
//! assert_eq!(article.halted_because(), Some("needs a second reviewer"));
//!
//! article.process_event("review", &[]).unwrap();
//! assert!(article.is_in("reviewed").unwrap());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod diagram;
pub mod engine;
pub mod resolver;
pub mod store;

// Re-export commonly used types
pub use builder::{DefinitionError, EventBuilder, SpecificationBuilder};
pub use self::core::{Outcome, Specification, State, Transit};
pub use engine::{ConfigurationError, Dispatch, Machine, MachineError};
pub use resolver::Registry;
pub use serde_json::Value;
pub use store::{MemoryStore, RecordStore, StateStore, StoreConfig};
