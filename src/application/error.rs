//! Application-level errors (wraps domain and host errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::HostError;

/// Application errors add scaffold-building context on top of the domain
/// and scene-host layers.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("host operation failed: {0}")]
    HostOperationFailed(#[from] HostError),

    #[error("invalid rig name: {0:?}")]
    InvalidRigName(String),

    #[error("scaffold template is missing node: {0}")]
    MissingTemplateNode(String),
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
