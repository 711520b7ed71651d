//! Consignment extensions migration.
//!
//! Creates the tables holding consignment fields of manufacturers and products.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(EXTENSIONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS ldc_product_consignment CASCADE;
             DROP TABLE IF EXISTS ldc_manufacturer_consignment CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const EXTENSIONS_SQL: &str = r"
-- Consignment enrollment per manufacturer
CREATE TABLE ldc_manufacturer_consignment (
    manufacturer_id UUID PRIMARY KEY,
    consignment BOOLEAN NOT NULL DEFAULT false,
    consignment_class VARCHAR(191),
    -- Last stock movement used in a report
    last_stock_movement_id UUID,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ldc_manufacturer_consignment_enrolled
    ON ldc_manufacturer_consignment(manufacturer_id) WHERE consignment;

-- Barcode validity per product
CREATE TABLE ldc_product_consignment (
    product_id UUID PRIMARY KEY,
    valid_bar_code BOOLEAN NOT NULL DEFAULT false,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";
