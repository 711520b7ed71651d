//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_reports;
mod m20250301_000002_consignment_extensions;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_reports::Migration),
            Box::new(m20250301_000002_consignment_extensions::Migration),
        ]
    }
}
