//! Specification lookup across a type hierarchy.
//!
//! Each registered type tag may own a specification and may name a parent.
//! Resolution walks from the tag towards the root and stops at the first tag
//! that owns one. A tag that owns a specification shadows every ancestor's;
//! specifications are never merged.

use crate::core::Specification;
use crate::engine::ConfigurationError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

struct Entry<H> {
    parent: Option<String>,
    spec: Option<Arc<Specification<H>>>,
}

/// Registry of type tags, their parents and their specifications.
///
/// # Example
///
/// ```rust
/// use stateline::builder::transition;
/// use stateline::core::Specification;
/// use stateline::resolver::Registry;
///
/// let order = Specification::<()>::builder()
///     .state("submitted")
///     .event(transition("accept", "accepted"))
///     .state("accepted")
///     .build()
///     .unwrap();
/// let special = Specification::<()>::builder().state("start_big").build().unwrap();
///
/// let mut registry = Registry::new();
/// registry
///     .register("Order", None, Some(order))
///     .register("BigOrder", Some("Order"), None)
///     .register("SpecialBigOrder", Some("BigOrder"), Some(special));
///
/// assert_eq!(registry.resolve("BigOrder").unwrap().initial_state().name(), "submitted");
/// assert_eq!(registry.resolve("SpecialBigOrder").unwrap().initial_state().name(), "start_big");
/// ```
pub struct Registry<H> {
    entries: HashMap<String, Entry<H>>,
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `tag` with an optional parent and an optional specification.
    ///
    /// Registering a tag again replaces its entry.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        parent: Option<&str>,
        spec: Option<Specification<H>>,
    ) -> &mut Self {
        self.entries.insert(
            tag.into(),
            Entry {
                parent: parent.map(str::to_string),
                spec: spec.map(Arc::new),
            },
        );
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// The tag whose specification applies to `tag`.
    pub fn owner<'a>(&'a self, tag: &'a str) -> Option<&'a str> {
        let mut current = tag;
        // A parent cycle can visit at most every entry once.
        for _ in 0..=self.entries.len() {
            let entry = self.entries.get(current)?;
            if entry.spec.is_some() {
                return Some(current);
            }
            current = entry.parent.as_deref()?;
        }
        None
    }

    /// Find the specification that applies to `tag`.
    pub fn resolve(&self, tag: &str) -> Result<Arc<Specification<H>>, ConfigurationError> {
        let owner = self
            .owner(tag)
            .ok_or_else(|| ConfigurationError::MissingSpecification {
                tag: tag.to_string(),
            })?;
        debug!(tag, owner, "resolved specification");

        self.entries
            .get(owner)
            .and_then(|e| e.spec.clone())
            .ok_or_else(|| ConfigurationError::MissingSpecification {
                tag: tag.to_string(),
            })
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (tag, entry) in &self.entries {
            map.entry(tag, &(entry.parent.as_deref(), entry.spec.is_some()));
        }
        map.finish()
    }
}
