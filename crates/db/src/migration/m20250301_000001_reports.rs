//! Reports migration.
//!
//! Creates the report table and the join table to the stock movements a
//! report is built from.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(REPORTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS ldc_reports_stock_movements CASCADE;
             DROP TABLE IF EXISTS ldc_reports CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const REPORTS_SQL: &str = r"
-- One row per consignment report run
CREATE TABLE ldc_reports (
    id UUID PRIMARY KEY,
    manufacturer_id UUID NOT NULL,
    status VARCHAR(191) NOT NULL DEFAULT 'pending',
    error TEXT,
    file VARCHAR(191),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_ldc_reports_status CHECK (status IN ('pending', 'successful', 'error')),
    CONSTRAINT chk_ldc_reports_error CHECK (error IS NULL OR status = 'error')
);

-- Reports of a manufacturer, newest first
CREATE INDEX idx_ldc_reports_manufacturer ON ldc_reports(manufacturer_id, created_at DESC);

-- Stock movements referenced by a report (movements never change)
CREATE TABLE ldc_reports_stock_movements (
    report_id UUID NOT NULL REFERENCES ldc_reports(id) ON DELETE CASCADE,
    stock_movement_id UUID NOT NULL,
    quantity INTEGER NOT NULL,
    unit_price NUMERIC(19, 4) NOT NULL,
    total_price NUMERIC(19, 4) NOT NULL,
    currency CHAR(3) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    PRIMARY KEY (report_id, stock_movement_id)
);

-- Movements are read in creation order
CREATE INDEX idx_ldc_reports_stock_movements_order
    ON ldc_reports_stock_movements(report_id, created_at ASC);
";
