//! Consignment settings repository for database operations.
//!
//! Manufacturers and products without a stored row read as not enrolled and
//! without a valid barcode.

use chrono::Utc;
use consignment_core::extension::{
    ConsignmentError, ManufacturerConsignment, ProductConsignment,
};
use consignment_shared::types::{ManufacturerId, ProductId};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::entities::{manufacturer_consignment, product_consignment};
use crate::mapping::{
    manufacturer_from_model, manufacturer_to_active_model, product_from_model,
    product_to_active_model,
};

/// Repository for the consignment fields of manufacturers and products.
#[derive(Debug, Clone)]
pub struct ConsignmentRepository {
    db: DatabaseConnection,
}

impl ConsignmentRepository {
    /// Creates a new consignment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the consignment settings of a manufacturer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_manufacturer(
        &self,
        manufacturer: ManufacturerId,
    ) -> Result<ManufacturerConsignment, ConsignmentError> {
        let model = manufacturer_consignment::Entity::find_by_id(manufacturer.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ConsignmentError::persistence(e.to_string()))?;

        Ok(model.map_or_else(
            || ManufacturerConsignment::new(manufacturer),
            manufacturer_from_model,
        ))
    }

    /// Stores the consignment settings of a manufacturer.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the database write fails.
    pub async fn save_manufacturer(
        &self,
        settings: &ManufacturerConsignment,
    ) -> Result<(), ConsignmentError> {
        settings.validate()?;

        manufacturer_consignment::Entity::insert(manufacturer_to_active_model(
            settings,
            Utc::now(),
        ))
        .on_conflict(
            OnConflict::column(manufacturer_consignment::Column::ManufacturerId)
                .update_columns([
                    manufacturer_consignment::Column::Consignment,
                    manufacturer_consignment::Column::ConsignmentClass,
                    manufacturer_consignment::Column::LastStockMovementId,
                    manufacturer_consignment::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(&self.db)
        .await
        .map_err(|e| ConsignmentError::persistence(e.to_string()))?;

        debug!(
            manufacturer_id = %settings.manufacturer_id(),
            consignment = settings.is_consignment(),
            "Saved manufacturer consignment settings"
        );

        Ok(())
    }

    /// Lists every manufacturer enrolled in consignment reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_consignment_manufacturers(
        &self,
    ) -> Result<Vec<ManufacturerConsignment>, ConsignmentError> {
        let models = manufacturer_consignment::Entity::find()
            .filter(manufacturer_consignment::Column::Consignment.eq(true))
            .order_by_asc(manufacturer_consignment::Column::ManufacturerId)
            .all(&self.db)
            .await
            .map_err(|e| ConsignmentError::persistence(e.to_string()))?;

        Ok(models.into_iter().map(manufacturer_from_model).collect())
    }

    /// Finds the consignment settings of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_product(
        &self,
        product: ProductId,
    ) -> Result<ProductConsignment, ConsignmentError> {
        let model = product_consignment::Entity::find_by_id(product.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ConsignmentError::persistence(e.to_string()))?;

        Ok(model.map_or_else(|| ProductConsignment::new(product), product_from_model))
    }

    /// Stores the consignment settings of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn save_product(&self, settings: &ProductConsignment) -> Result<(), ConsignmentError> {
        product_consignment::Entity::insert(product_to_active_model(settings, Utc::now()))
            .on_conflict(
                OnConflict::column(product_consignment::Column::ProductId)
                    .update_columns([
                        product_consignment::Column::ValidBarCode,
                        product_consignment::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ConsignmentError::persistence(e.to_string()))?;

        Ok(())
    }
}
