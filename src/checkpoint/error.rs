use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckpointError {
    #[error("Could not encode checkpoint: {0}")]
    Encode(String),

    #[error("Could not decode checkpoint: {0}")]
    Decode(String),

    /// Written by a newer or older release with a different layout
    #[error("Checkpoint format v{found} is not readable, expected v{supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Taken under a specification with a different initial state
    #[error("Checkpoint was taken under initial state '{found}', specification starts at '{expected}'")]
    SpecificationMismatch { expected: String, found: String },

    /// The checkpointed state is not declared by the specification resumed with
    #[error("Checkpoint state '{state}' is not declared")]
    UndeclaredState { state: String },
}
