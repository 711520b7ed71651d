//! Immutable stock movement snapshot.

use chrono::{DateTime, Utc};
use consignment_shared::types::StockMovementId;
use consignment_shared::{Currency, Money, MoneyError};
use serde::Serialize;

/// A recorded inventory change (sale, adjustment) with its priced total.
///
/// There are no setters: once a report references a movement, it never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockMovement {
    id: StockMovementId,
    quantity: i32,
    unit_price: Money,
    total_price: Money,
    created_at: DateTime<Utc>,
}

impl StockMovement {
    /// Records a movement, pricing it at `unit_price` times `quantity`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the total does not fit.
    pub fn new(
        id: StockMovementId,
        quantity: i32,
        unit_price: Money,
        created_at: DateTime<Utc>,
    ) -> Result<Self, MoneyError> {
        Ok(Self {
            id,
            quantity,
            unit_price,
            total_price: unit_price.multiply(i64::from(quantity))?,
            created_at,
        })
    }

    /// Rebuilds a movement from a stored snapshot, keeping its stored total.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the unit price and total are
    /// in different currencies.
    pub fn from_snapshot(
        id: StockMovementId,
        quantity: i32,
        unit_price: Money,
        total_price: Money,
        created_at: DateTime<Utc>,
    ) -> Result<Self, MoneyError> {
        if unit_price.currency != total_price.currency {
            return Err(MoneyError::CurrencyMismatch {
                expected: total_price.currency,
                found: unit_price.currency,
            });
        }

        Ok(Self {
            id,
            quantity,
            unit_price,
            total_price,
            created_at,
        })
    }

    /// Returns the movement identity.
    #[must_use]
    pub const fn id(&self) -> StockMovementId {
        self.id
    }

    /// Returns the moved quantity; negative for stock leaving.
    #[must_use]
    pub const fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Returns the unit price.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the precomputed total price.
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// Returns the currency the movement is priced in.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.total_price.currency
    }

    /// Returns when the movement was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
