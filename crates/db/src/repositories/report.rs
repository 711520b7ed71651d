//! Report repository for database operations.
//!
//! Reports are staged by `persist` and written by `flush`, each flush in a
//! single database transaction.

use std::sync::Arc;

use chrono::Utc;
use consignment_core::report::{Report, ReportError, ReportStore};
use consignment_shared::types::{ManufacturerId, ReportId};
use dashmap::DashMap;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{debug, info, warn};

use crate::entities::{report_stock_movements, reports};
use crate::mapping::{
    check_price_scale, movement_to_active_model, report_from_models, report_to_active_model,
};

/// Report repository backed by `SeaORM`.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
    staged: Arc<DashMap<ReportId, Report>>,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            staged: Arc::new(DashMap::new()),
        }
    }

    /// Returns the number of reports waiting for a flush.
    #[must_use]
    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Finds a report by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored row is invalid.
    pub async fn find_by_id(&self, id: ReportId) -> Result<Option<Report>, ReportError> {
        let found = reports::Entity::find_by_id(id.into_inner())
            .find_with_related(report_stock_movements::Entity)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::persistence(e.to_string()))?;

        found
            .into_iter()
            .next()
            .map(|(model, movements)| report_from_models(model, movements))
            .transpose()
    }

    /// Loads a report that must exist.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NotFound` if there is no such report.
    pub async fn get(&self, id: ReportId) -> Result<Report, ReportError> {
        self.find_by_id(id)
            .await?
            .ok_or(ReportError::NotFound(id))
    }

    /// Lists the reports of a manufacturer, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row is invalid.
    pub async fn find_by_manufacturer(
        &self,
        manufacturer: ManufacturerId,
    ) -> Result<Vec<Report>, ReportError> {
        let found = reports::Entity::find()
            .filter(reports::Column::ManufacturerId.eq(manufacturer.into_inner()))
            .order_by_desc(reports::Column::CreatedAt)
            .find_with_related(report_stock_movements::Entity)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::persistence(e.to_string()))?;

        found
            .into_iter()
            .map(|(model, movements)| report_from_models(model, movements))
            .collect()
    }

    /// Writes the given reports and unstages them once committed.
    async fn commit(&self, reports: Vec<Report>) -> Result<(), ReportError> {
        if reports.is_empty() {
            return Ok(());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ReportError::persistence(e.to_string()))?;

        let now = Utc::now();
        for report in &reports {
            if let Err(err) = write_report(&txn, report, now).await {
                warn!(error = %err, "Report flush failed, rolling back");
                // Dropping the transaction rolls it back.
                return Err(err);
            }
        }

        txn.commit().await.map_err(|e| {
            warn!(error = %e, "Report flush commit failed");
            ReportError::persistence(e.to_string())
        })?;

        // A report persisted again while flushing stays staged.
        for report in &reports {
            if let Some(id) = report.id() {
                self.staged.remove_if(&id, |_, staged| staged == report);
            }
        }
        info!(count = reports.len(), "Flushed reports");

        Ok(())
    }
}

/// Upserts one report row and replaces its stock movement rows.
async fn write_report(
    txn: &DatabaseTransaction,
    report: &Report,
    now: chrono::DateTime<Utc>,
) -> Result<(), ReportError> {
    let mut active = report_to_active_model(report, now)?;
    let id = report
        .id()
        .ok_or_else(|| ReportError::persistence("staged report has no id"))?;
    let db_err = |e: DbErr| ReportError::persistence(e.to_string());

    let existing = reports::Entity::find_by_id(id.into_inner())
        .one(txn)
        .await
        .map_err(db_err)?;

    if existing.is_some() {
        active.created_at = sea_orm::ActiveValue::NotSet;
        active.update(txn).await.map_err(db_err)?;

        report_stock_movements::Entity::delete_many()
            .filter(report_stock_movements::Column::ReportId.eq(id.into_inner()))
            .exec(txn)
            .await
            .map_err(db_err)?;
    } else {
        active.insert(txn).await.map_err(db_err)?;
    }

    if report.stock_movement_count() > 0 {
        let rows = report
            .stock_movements()
            .iter()
            .map(|m| movement_to_active_model(id, m))
            .collect::<Result<Vec<_>, _>>()?;
        report_stock_movements::Entity::insert_many(rows)
            .exec(txn)
            .await
            .map_err(db_err)?;
    }

    Ok(())
}

impl ReportStore for ReportRepository {
    async fn persist(&self, report: &mut Report) -> Result<(), ReportError> {
        report.validate()?;
        for movement in report.stock_movements() {
            check_price_scale(movement)?;
        }

        let id = match report.id() {
            Some(id) => id,
            None => {
                let id = ReportId::new();
                report.assign_id(id)?;
                id
            }
        };
        report.touch(Utc::now());

        debug!(report_id = %id, status = %report.status(), "Staging report");
        self.staged.insert(id, report.clone());

        Ok(())
    }

    async fn flush(&self) -> Result<(), ReportError> {
        let reports: Vec<Report> = self.staged.iter().map(|e| e.value().clone()).collect();
        self.commit(reports).await
    }

    async fn flush_only(&self, ids: &[ReportId]) -> Result<(), ReportError> {
        let reports: Vec<Report> = ids
            .iter()
            .filter_map(|id| self.staged.get(id).map(|e| e.value().clone()))
            .collect();
        self.commit(reports).await
    }
}
