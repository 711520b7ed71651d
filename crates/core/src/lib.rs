//! Core business logic for consignment reporting.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `report` - Report runs, their status and totals
//! - `stock` - Immutable stock movement snapshots
//! - `extension` - Consignment fields attached to manufacturers and products

pub mod extension;
pub mod report;
pub mod stock;
