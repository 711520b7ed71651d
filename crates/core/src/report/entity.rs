//! The consignment report entity.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use consignment_shared::types::{ManufacturerId, ReportId, StockMovementId};
use consignment_shared::{Currency, DEFAULT_CURRENCY, Money, MoneyError};
use serde::Serialize;

use super::error::ReportError;
use super::types::ReportStatus;
use super::validation::{ValidationError, validate_report};
use crate::stock::StockMovement;

/// One run of the consignment report for a manufacturer.
///
/// A report starts out `pending` with no stock movements. The job runner
/// attaches movements as it processes them and finally marks the run as
/// successful or failed. A run is never reset to `pending`; re-running means
/// creating a new report. Stored status only comes back through [`Report::restore`].
///
/// Stock movements are kept sorted by their creation time, oldest first, no
/// matter in which order they were added.
///
/// A report is not synchronized. Concurrent mutation of one report is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Report {
    id: Option<ReportId>,
    manufacturer: Option<ManufacturerId>,
    status: ReportStatus,
    error: Option<String>,
    file: Option<String>,
    stock_movements: Vec<StockMovement>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

/// Stored state of a report, used to rebuild it from persistence.
#[derive(Debug, Clone)]
pub struct StoredReport {
    /// Assigned identity.
    pub id: ReportId,
    /// The manufacturer the report belongs to.
    pub manufacturer: ManufacturerId,
    /// Stored status.
    pub status: ReportStatus,
    /// Stored error message.
    pub error: Option<String>,
    /// Stored file path.
    pub file: Option<String>,
    /// Referenced stock movements, in any order.
    pub stock_movements: Vec<StockMovement>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Creates a pending report for a manufacturer.
    #[must_use]
    pub fn new(manufacturer: ManufacturerId) -> Self {
        Self {
            manufacturer: Some(manufacturer),
            ..Self::default()
        }
    }

    /// Rebuilds a report from its stored state.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stored state breaks a report invariant.
    pub fn restore(stored: StoredReport) -> Result<Self, ValidationError> {
        let mut report = Self {
            id: Some(stored.id),
            manufacturer: Some(stored.manufacturer),
            status: stored.status,
            error: stored.error,
            file: stored.file,
            stock_movements: Vec::with_capacity(stored.stock_movements.len()),
            created_at: Some(stored.created_at),
            updated_at: Some(stored.updated_at),
        };
        report.set_stock_movements(stored.stock_movements);
        report.validate()?;

        Ok(report)
    }

    // ========== Identity & timestamps ==========

    /// Returns the identity, if the persistence layer assigned one.
    #[must_use]
    pub const fn id(&self) -> Option<ReportId> {
        self.id
    }

    /// Assigns the identity. Assigning the same identity again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::IdAlreadyAssigned` if a different identity is set.
    pub fn assign_id(&mut self, id: ReportId) -> Result<&mut Self, ReportError> {
        match self.id {
            Some(current) if current != id => Err(ReportError::IdAlreadyAssigned {
                current,
                requested: id,
            }),
            _ => {
                self.id = Some(id);
                Ok(self)
            }
        }
    }

    /// Returns when the report was first stored.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns when the report was last stored.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Maintains the timestamps on write.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }

    // ========== Manufacturer ==========

    /// Returns the manufacturer the report is for.
    #[must_use]
    pub const fn manufacturer(&self) -> Option<ManufacturerId> {
        self.manufacturer
    }

    /// Sets the manufacturer the report is for.
    pub fn set_manufacturer(&mut self, manufacturer: ManufacturerId) -> &mut Self {
        self.manufacturer = Some(manufacturer);
        self
    }

    // ========== Status ==========

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ReportStatus {
        self.status
    }

    /// Returns the error message of a failed run.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks the run as failed, from any state.
    pub fn mark_as_error(&mut self, error: Option<String>) -> &mut Self {
        self.status = ReportStatus::Error;
        self.error = error;
        self
    }

    /// Marks the run as successful, from any state, clearing any error.
    pub fn mark_as_success(&mut self) -> &mut Self {
        self.status = ReportStatus::Successful;
        self.error = None;
        self
    }

    /// Returns true if the report has exactly this status.
    #[must_use]
    pub fn is_status(&self, status: ReportStatus) -> bool {
        self.status == status
    }

    /// Returns true if the run succeeded.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.is_status(ReportStatus::Successful)
    }

    /// Returns true if the run failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_status(ReportStatus::Error)
    }

    /// Returns true if the report can be delivered to the consignor.
    ///
    /// Currently this is the same as being successful.
    #[must_use]
    pub fn is_deliverable(&self) -> bool {
        self.is_successful()
    }

    // ========== File ==========

    /// Returns the generated report file.
    #[must_use]
    pub fn file(&self) -> Option<PathBuf> {
        self.file_path().map(PathBuf::from)
    }

    /// Returns the stored file path.
    #[must_use]
    pub fn file_path(&self) -> Option<&str> {
        self.file.as_deref().filter(|path| !path.is_empty())
    }

    /// Attaches the generated report file. Only the path is kept.
    ///
    /// # Errors
    ///
    /// Returns a validation error on `file` if the path is not valid UTF-8, since
    /// it could not be read back unchanged.
    pub fn set_file(&mut self, file: impl AsRef<Path>) -> Result<&mut Self, ValidationError> {
        let path = file
            .as_ref()
            .to_str()
            .ok_or_else(|| ValidationError::new("file", "must be valid UTF-8"))?;
        self.file = Some(path.to_owned());
        Ok(self)
    }

    // ========== Stock movements ==========

    /// Returns the referenced stock movements, oldest first.
    #[must_use]
    pub fn stock_movements(&self) -> &[StockMovement] {
        &self.stock_movements
    }

    /// Returns the number of referenced stock movements.
    #[must_use]
    pub fn stock_movement_count(&self) -> usize {
        self.stock_movements.len()
    }

    /// Returns true if a movement with this identity is referenced.
    #[must_use]
    pub fn contains_stock_movement(&self, id: StockMovementId) -> bool {
        self.stock_movements.iter().any(|m| m.id() == id)
    }

    /// References a stock movement unless it is already referenced.
    pub fn add_stock_movement(&mut self, movement: StockMovement) -> &mut Self {
        if !self.contains_stock_movement(movement.id()) {
            // Equal timestamps keep insertion order.
            let index = self
                .stock_movements
                .partition_point(|m| m.created_at() <= movement.created_at());
            self.stock_movements.insert(index, movement);
        }
        self
    }

    /// Drops a stock movement reference. Unknown movements are ignored.
    pub fn remove_stock_movement(&mut self, movement: &StockMovement) -> &mut Self {
        self.stock_movements.retain(|m| m.id() != movement.id());
        self
    }

    /// Drops all stock movement references.
    pub fn clear_stock_movements(&mut self) -> &mut Self {
        self.stock_movements.clear();
        self
    }

    /// Adds every given movement. Already referenced movements are kept.
    pub fn set_stock_movements(
        &mut self,
        movements: impl IntoIterator<Item = StockMovement>,
    ) -> &mut Self {
        for movement in movements {
            self.add_stock_movement(movement);
        }
        self
    }

    // ========== Totals ==========

    /// Sums the total price of every stock movement.
    ///
    /// The sum is kept in the currency of the oldest movement. `default_currency`
    /// is only used when there are no movements.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the movements use different currencies,
    /// or `MoneyError::Overflow` if the sum does not fit.
    pub fn total(&self, default_currency: Currency) -> Result<Money, MoneyError> {
        let Some(first) = self.stock_movements.first() else {
            return Ok(Money::zero(default_currency));
        };

        self.stock_movements
            .iter()
            .try_fold(Money::zero(first.currency()), |total, movement| {
                total.checked_add(movement.total_price())
            })
    }

    /// Same as [`Report::total`] with DKK as the default currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the movements use different currencies,
    /// or `MoneyError::Overflow` if the sum does not fit.
    pub fn total_or_default(&self) -> Result<Money, MoneyError> {
        self.total(DEFAULT_CURRENCY)
    }

    // ========== Validation ==========

    /// Validates the report before it is committed.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, naming the field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_report(self)
    }
}
