//! Consignment fields attached to entities owned by other modules.
//!
//! Manufacturers and products live elsewhere. Their consignment settings are
//! kept as separate components keyed by the owner's identity.

mod error;
mod manufacturer;
mod product;

pub use error::ConsignmentError;
pub use manufacturer::ManufacturerConsignment;
pub use product::ProductConsignment;
