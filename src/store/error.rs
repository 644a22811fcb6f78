//! Store error types.

use serde_json::Value;
use thiserror::Error;

/// Errors raised by a [`StateStore`](super::StateStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The state column holds something other than a string or null
    #[error("Column '{column}' holds a non-string value: {found}")]
    InvalidValue { column: String, found: Value },

    /// The backing store failed
    #[error("State store backend failed: {0}")]
    Backend(String),
}
