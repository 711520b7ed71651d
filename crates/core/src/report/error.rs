//! Report error types.

use consignment_shared::MoneyError;
use consignment_shared::types::ReportId;
use thiserror::Error;

use super::validation::ValidationError;

/// Errors that can occur while building, totalling or storing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report failed pre-commit validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Money arithmetic failed, e.g. movements in mixed currencies.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The report already carries a different identity.
    #[error("Report already has id {current}, cannot assign {requested}")]
    IdAlreadyAssigned {
        /// The identity already assigned.
        current: ReportId,
        /// The identity that was rejected.
        requested: ReportId,
    },

    /// Report not found.
    #[error("Report not found: {0}")]
    NotFound(ReportId),

    /// The underlying store failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ReportError {
    /// Create a persistence error.
    #[must_use]
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Returns true if this error is a currency mismatch during aggregation.
    #[must_use]
    pub fn is_currency_mismatch(&self) -> bool {
        matches!(self, Self::Money(MoneyError::CurrencyMismatch { .. }))
    }
}
