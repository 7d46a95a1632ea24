//! Error types for orgcal.

use thiserror::Error;

/// Errors that can occur while building an agenda.
#[derive(Error, Debug)]
pub enum OrgCalError {
    #[error("Calendar service error: {0}")]
    Service(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for orgcal operations.
pub type OrgCalResult<T> = Result<T, OrgCalError>;
