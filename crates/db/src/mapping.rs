//! Mapping between domain types and `SeaORM` models.
//!
//! The domain types know nothing about tables; every column conversion lives here.

use chrono::{DateTime, Utc};
use consignment_core::extension::{ManufacturerConsignment, ProductConsignment};
use consignment_core::report::{Report, ReportError, ReportStatus, StoredReport, ValidationError};
use consignment_core::stock::StockMovement;
use consignment_shared::types::{ManufacturerId, ProductId, ReportId, StockMovementId};
use consignment_shared::{Currency, Money};
use sea_orm::Set;

use crate::entities::{
    manufacturer_consignment, product_consignment, report_stock_movements, reports,
};

/// Convert a report to an active model with every column set.
///
/// # Errors
///
/// Returns a validation error if the report has no identity or manufacturer yet.
pub fn report_to_active_model(
    report: &Report,
    now: DateTime<Utc>,
) -> Result<reports::ActiveModel, ReportError> {
    let id = report
        .id()
        .ok_or_else(|| ValidationError::new("id", "must be assigned before writing"))?;
    let manufacturer = report
        .manufacturer()
        .ok_or_else(|| ValidationError::new("manufacturer", "must not be blank"))?;

    Ok(reports::ActiveModel {
        id: Set(id.into_inner()),
        manufacturer_id: Set(manufacturer.into_inner()),
        status: Set(report.status().as_str().to_string()),
        error: Set(report.error().map(String::from)),
        file: Set(report.file_path().map(String::from)),
        created_at: Set(report.created_at().unwrap_or(now).into()),
        updated_at: Set(report.updated_at().unwrap_or(now).into()),
    })
}

/// Decimal places kept by the `NUMERIC(19, 4)` price columns.
pub const PRICE_SCALE: u32 = 4;

/// Checks that a movement's prices survive the price columns unrounded.
///
/// # Errors
///
/// Returns a validation error on `stock_movements` if a price has more than
/// [`PRICE_SCALE`] significant decimal places.
pub fn check_price_scale(movement: &StockMovement) -> Result<(), ValidationError> {
    for price in [movement.unit_price(), movement.total_price()] {
        if price.amount.normalize().scale() > PRICE_SCALE {
            return Err(ValidationError::new(
                "stock_movements",
                format!(
                    "stock movement {} has a price with more than {PRICE_SCALE} decimal places",
                    movement.id()
                ),
            ));
        }
    }

    Ok(())
}

/// Convert a referenced stock movement to its join row.
///
/// # Errors
///
/// Returns a validation error if a price would be rounded on write.
pub fn movement_to_active_model(
    report_id: ReportId,
    movement: &StockMovement,
) -> Result<report_stock_movements::ActiveModel, ReportError> {
    check_price_scale(movement)?;

    Ok(report_stock_movements::ActiveModel {
        report_id: Set(report_id.into_inner()),
        stock_movement_id: Set(movement.id().into_inner()),
        quantity: Set(movement.quantity()),
        unit_price: Set(movement.unit_price().amount),
        total_price: Set(movement.total_price().amount),
        currency: Set(movement.currency().to_string()),
        created_at: Set(movement.created_at().into()),
    })
}

/// Convert a stored join row back to a stock movement.
///
/// # Errors
///
/// Returns an error if the stored currency is not a valid code.
pub fn movement_from_model(
    model: report_stock_movements::Model,
) -> Result<StockMovement, ReportError> {
    let currency = Currency::new(&model.currency)?;

    Ok(StockMovement::from_snapshot(
        StockMovementId::from_uuid(model.stock_movement_id),
        model.quantity,
        Money::new(model.unit_price, currency),
        Money::new(model.total_price, currency),
        model.created_at.with_timezone(&Utc),
    )?)
}

/// Convert a stored report row and its join rows back to a report.
///
/// # Errors
///
/// Returns a validation error if the row holds an unknown status or breaks a
/// report invariant.
pub fn report_from_models(
    model: reports::Model,
    movements: Vec<report_stock_movements::Model>,
) -> Result<Report, ReportError> {
    let status: ReportStatus = model.status.parse()?;
    let stock_movements = movements
        .into_iter()
        .map(movement_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Report::restore(StoredReport {
        id: ReportId::from_uuid(model.id),
        manufacturer: ManufacturerId::from_uuid(model.manufacturer_id),
        status,
        error: model.error,
        file: model.file,
        stock_movements,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })?)
}

/// Convert manufacturer settings to an active model.
pub fn manufacturer_to_active_model(
    settings: &ManufacturerConsignment,
    now: DateTime<Utc>,
) -> manufacturer_consignment::ActiveModel {
    manufacturer_consignment::ActiveModel {
        manufacturer_id: Set(settings.manufacturer_id().into_inner()),
        consignment: Set(settings.is_consignment()),
        consignment_class: Set(settings.consignment_class().map(String::from)),
        last_stock_movement_id: Set(settings
            .last_stock_movement()
            .map(StockMovementId::into_inner)),
        updated_at: Set(now.into()),
    }
}

/// Convert a stored manufacturer row to settings.
pub fn manufacturer_from_model(model: manufacturer_consignment::Model) -> ManufacturerConsignment {
    ManufacturerConsignment::from_parts(
        ManufacturerId::from_uuid(model.manufacturer_id),
        model.consignment,
        model.consignment_class,
        model.last_stock_movement_id.map(StockMovementId::from_uuid),
    )
}

/// Convert product settings to an active model.
pub fn product_to_active_model(
    settings: &ProductConsignment,
    now: DateTime<Utc>,
) -> product_consignment::ActiveModel {
    product_consignment::ActiveModel {
        product_id: Set(settings.product_id().into_inner()),
        valid_bar_code: Set(settings.is_valid_bar_code()),
        updated_at: Set(now.into()),
    }
}

/// Convert a stored product row to settings.
pub fn product_from_model(model: product_consignment::Model) -> ProductConsignment {
    let mut settings = ProductConsignment::new(ProductId::from_uuid(model.product_id));
    settings.set_valid_bar_code(model.valid_bar_code);
    settings
}
