//! Consignment report runs.
//!
//! This module provides the report entity and everything around it:
//! - The pending/successful/error status machine
//! - Stock movement references, ordered by creation time
//! - Money totals over the referenced movements
//! - Pre-commit validation
//! - The persistence port implemented by the db crate

pub mod entity;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use entity::{Report, StoredReport};
pub use error::ReportError;
pub use store::ReportStore;
pub use types::ReportStatus;
pub use validation::{MAX_FILE_LENGTH, ValidationError};
