//! `SeaORM` entities for the tables owned by consignment reporting.

pub mod manufacturer_consignment;
pub mod product_consignment;
pub mod report_stock_movements;
pub mod reports;
