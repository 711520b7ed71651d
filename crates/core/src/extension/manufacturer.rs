//! Consignment settings of a manufacturer.

use consignment_shared::types::{ManufacturerId, StockMovementId};
use serde::{Deserialize, Serialize};

use crate::report::ValidationError;
use crate::report::validation::validate_max_length;
use crate::stock::StockMovement;

/// Whether a manufacturer takes part in consignment reporting, and how far
/// reporting has got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerConsignment {
    manufacturer_id: ManufacturerId,
    consignment: bool,
    consignment_class: Option<String>,
    last_stock_movement: Option<StockMovementId>,
}

impl ManufacturerConsignment {
    /// Creates settings for a manufacturer that is not enrolled.
    #[must_use]
    pub const fn new(manufacturer_id: ManufacturerId) -> Self {
        Self {
            manufacturer_id,
            consignment: false,
            consignment_class: None,
            last_stock_movement: None,
        }
    }

    /// Rebuilds settings from stored values.
    #[must_use]
    pub fn from_parts(
        manufacturer_id: ManufacturerId,
        consignment: bool,
        consignment_class: Option<String>,
        last_stock_movement: Option<StockMovementId>,
    ) -> Self {
        Self {
            manufacturer_id,
            consignment,
            consignment_class,
            last_stock_movement,
        }
    }

    /// Returns the manufacturer these settings belong to.
    #[must_use]
    pub const fn manufacturer_id(&self) -> ManufacturerId {
        self.manufacturer_id
    }

    /// Returns true if the manufacturer is enrolled in consignment reporting.
    #[must_use]
    pub const fn is_consignment(&self) -> bool {
        self.consignment
    }

    /// Enrolls or withdraws the manufacturer.
    pub fn set_consignment(&mut self, consignment: bool) -> &mut Self {
        self.consignment = consignment;
        self
    }

    /// Returns the consignment class tag.
    #[must_use]
    pub fn consignment_class(&self) -> Option<&str> {
        self.consignment_class.as_deref()
    }

    /// Sets the consignment class tag.
    pub fn set_consignment_class(&mut self, consignment_class: Option<String>) -> &mut Self {
        self.consignment_class = consignment_class;
        self
    }

    /// Returns the last stock movement included in a report.
    ///
    /// This is the watermark the next incremental report starts after.
    #[must_use]
    pub const fn last_stock_movement(&self) -> Option<StockMovementId> {
        self.last_stock_movement
    }

    /// Sets the last reported stock movement.
    pub fn set_last_stock_movement(&mut self, movement: Option<StockMovementId>) -> &mut Self {
        self.last_stock_movement = movement;
        self
    }

    /// Moves the watermark to the newest of the given reported movements.
    ///
    /// Leaves the watermark alone when `movements` is empty.
    pub fn advance_watermark<'a>(
        &mut self,
        movements: impl IntoIterator<Item = &'a StockMovement>,
    ) -> &mut Self {
        // Later entries win ties, matching report order.
        if let Some(newest) = movements
            .into_iter()
            .max_by(|a, b| a.created_at().cmp(&b.created_at()))
        {
            self.last_stock_movement = Some(newest.id());
        }
        self
    }

    /// Validates the settings before they are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the consignment class is too long.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(class) = &self.consignment_class {
            validate_max_length("consignment_class", class)?;
        }
        Ok(())
    }
}
