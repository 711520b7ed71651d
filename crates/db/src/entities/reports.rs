//! `SeaORM` Entity for ldc_reports table.

use consignment_core::report::{ReportStatus, ValidationError, validation::validate_max_length};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ldc_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub manufacturer_id: Uuid,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub error: Option<String>,
    pub file: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::report_stock_movements::Entity")]
    StockMovements,
}

impl Related<super::report_stock_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Rejects rows that would break the column contract, on insert and update.
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        check_columns(&self).map_err(|e| DbErr::Custom(e.to_string()))?;
        Ok(self)
    }
}

fn check_columns(model: &ActiveModel) -> Result<(), ValidationError> {
    if let ActiveValue::Set(status) | ActiveValue::Unchanged(status) = &model.status {
        status.parse::<ReportStatus>()?;
    }
    if let ActiveValue::Set(Some(file)) | ActiveValue::Unchanged(Some(file)) = &model.file {
        validate_max_length("file", file)?;
    }
    Ok(())
}
