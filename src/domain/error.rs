//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy contracts.
/// These are independent of any scene-host concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed hierarchy description: {0}")]
    MalformedDescription(String),

    #[error("child index {index} out of range (child count {len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("node '{0}' already has a parent")]
    DuplicateParenting(String),

    #[error("attaching '{0}' would create a cycle")]
    CycleDetected(String),

    #[error("stale node reference")]
    StaleNode,
}

/// Result type for domain layer operations.
pub type DomainResult<T> = Result<T, DomainError>;
