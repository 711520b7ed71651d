//! `SeaORM` Entity for ldc_manufacturer_consignment table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ldc_manufacturer_consignment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub manufacturer_id: Uuid,
    pub consignment: bool,
    pub consignment_class: Option<String>,
    pub last_stock_movement_id: Option<Uuid>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
