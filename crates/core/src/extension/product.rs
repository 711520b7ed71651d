//! Consignment settings of a product.

use consignment_shared::types::ProductId;
use serde::{Deserialize, Serialize};

/// Barcode state of a product, as far as consignment reporting cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConsignment {
    product_id: ProductId,
    valid_bar_code: bool,
}

impl ProductConsignment {
    /// Creates settings for a product without a verified barcode.
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            valid_bar_code: false,
        }
    }

    /// Returns the product these settings belong to.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns true if the product barcode is valid.
    #[must_use]
    pub const fn is_valid_bar_code(&self) -> bool {
        self.valid_bar_code
    }

    /// Flags the product barcode as valid or not.
    pub fn set_valid_bar_code(&mut self, valid_bar_code: bool) -> &mut Self {
        self.valid_bar_code = valid_bar_code;
        self
    }
}
