//! Common types used across the consignment crates.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{Currency, DEFAULT_CURRENCY, Money, MoneyError};
