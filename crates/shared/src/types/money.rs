//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency used when a total has nothing to sum over.
pub const DEFAULT_CURRENCY: Currency = Currency::DKK;

/// Errors raised by money arithmetic and currency parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency of the left-hand amount.
        expected: Currency,
        /// Currency of the right-hand amount.
        found: Currency,
    },

    /// The code is not a three-letter currency code.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// The result does not fit in a `Decimal`.
    #[error("Money overflow in {currency}")]
    Overflow {
        /// Currency of the overflowing amount.
        currency: Currency,
    },
}

/// ISO 4217 style currency code, always three upper-case ASCII letters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// Danish Krone
    pub const DKK: Self = Self(*b"DKK");
    /// Euro
    pub const EUR: Self = Self(*b"EUR");
    /// US Dollar
    pub const USD: Self = Self(*b"USD");
    /// Swedish Krona
    pub const SEK: Self = Self(*b"SEK");
    /// Norwegian Krone
    pub const NOK: Self = Self(*b"NOK");

    /// Parses a currency code, normalizing it to upper case.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidCurrency` unless the code is exactly three ASCII letters.
    pub fn new(code: &str) -> Result<Self, MoneyError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(MoneyError::InvalidCurrency(code.to_string()));
        }

        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// Returns the currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        // Constructed from ASCII letters only.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::fmt::Debug for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Currency({})", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in the smallest currency unit (e.g., øre).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "DKK", "EUR").
    pub currency: Currency,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ. No conversion
    /// is ever attempted. Returns `MoneyError::Overflow` if the sum does not fit.
    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            });
        }

        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency))
            .ok_or(MoneyError::Overflow {
                currency: self.currency,
            })
    }

    /// Multiplies the amount by a whole quantity.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the product does not fit.
    pub fn multiply(self, quantity: i64) -> Result<Self, MoneyError> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency))
            .ok_or(MoneyError::Overflow {
                currency: self.currency,
            })
    }
}
