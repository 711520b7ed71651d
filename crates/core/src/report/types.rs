//! Report status values.

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Outcome of a consignment report run.
///
/// Stored and serialized as the lowercase strings `pending`, `successful` and `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// The run has not finished yet.
    #[default]
    Pending,
    /// The run finished and the report can be delivered.
    Successful,
    /// The run failed.
    Error,
}

impl ReportStatus {
    /// Every status a report can have.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Successful, Self::Error];

    /// Convert to database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Successful => "successful",
            Self::Error => "error",
        }
    }

    /// Parse from database string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "successful" => Some(Self::Successful),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ValidationError::new(
                "status",
                format!("{s:?} is not one of pending, successful, error"),
            )
        })
    }
}
