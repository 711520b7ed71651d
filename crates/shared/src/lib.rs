//! Shared types and configuration for consignment reporting.
//!
//! This crate provides common types used across all other crates:
//! - Money and currency types with decimal precision
//! - Typed IDs for type-safe entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{Currency, DEFAULT_CURRENCY, Money, MoneyError};
