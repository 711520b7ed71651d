//! Consignment extension error types.

use thiserror::Error;

use crate::report::ValidationError;

/// Errors raised while validating or storing consignment settings.
#[derive(Debug, Error)]
pub enum ConsignmentError {
    /// A field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The underlying store failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ConsignmentError {
    /// Create a persistence error.
    #[must_use]
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
