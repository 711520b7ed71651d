//! Pre-commit validation of report state.

use std::collections::HashSet;

use thiserror::Error;

use super::entity::Report;
use super::types::ReportStatus;

/// Maximum length, in characters, of a stored file path.
pub const MAX_FILE_LENGTH: usize = 191;

/// A report field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {constraint}")]
pub struct ValidationError {
    /// The offending field.
    pub field: &'static str,
    /// The constraint that was violated.
    pub constraint: String,
}

impl ValidationError {
    /// Creates a validation error for a field.
    #[must_use]
    pub fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

/// Validates a report before it is inserted or updated.
///
/// # Errors
///
/// Returns the first violated constraint.
pub fn validate_report(report: &Report) -> Result<(), ValidationError> {
    if report.manufacturer().is_none() {
        return Err(ValidationError::new("manufacturer", "must not be blank"));
    }

    if report.error().is_some() && report.status() != ReportStatus::Error {
        return Err(ValidationError::new(
            "error",
            format!("must be empty when status is {}", report.status()),
        ));
    }

    if let Some(file) = report.file_path() {
        validate_max_length("file", file)?;
    }

    let mut seen = HashSet::with_capacity(report.stock_movement_count());
    for movement in report.stock_movements() {
        if !seen.insert(movement.id()) {
            return Err(ValidationError::new(
                "stock_movements",
                format!("stock movement {} is referenced twice", movement.id()),
            ));
        }
    }

    Ok(())
}

/// Checks that a string column fits the 191 character limit.
///
/// # Errors
///
/// Returns an error naming `field` if the value is too long.
pub fn validate_max_length(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length > MAX_FILE_LENGTH {
        return Err(ValidationError::new(
            field,
            format!("must be at most {MAX_FILE_LENGTH} characters, got {length}"),
        ));
    }

    Ok(())
}
