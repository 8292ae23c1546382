//! Cart Models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A cart line joined with its product and current stock
///
/// `unit_price` and `stock` are read at snapshot time; the placement
/// transaction re-checks stock before committing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLineDetail {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub stock: i64,
}

impl CartLineDetail {
    /// Line subtotal in minor units
    pub fn subtotal(&self) -> i64 {
        self.unit_price * self.quantity
    }
}

/// Add-to-cart payload (upserts: quantity accumulates on repeat adds)
#[derive(Debug, Deserialize, Validate)]
pub struct CartAdd {
    pub product_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i64,
}
