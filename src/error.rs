//! Crate-level error type.

use thiserror::Error;

use crate::backends::BackendError;
use crate::conditions::ValidationError;

/// Any failure surfaced by the library
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Rejected input, reported before any resolution
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Unusable request payload (image data, loan application)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
