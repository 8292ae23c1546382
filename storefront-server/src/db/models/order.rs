//! Order Models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Canceled,
}

/// Order entity
///
/// `total_amount` is in integer minor units, finalized inside the
/// placement transaction from price snapshots.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub phone_number: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A single purchased line with its price snapshot
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price captured at placement time
    pub price: i64,
}

/// Order with its lines, as returned by GET /orders/{id}
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Delivery details supplied when placing an order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 10, max = 15))]
    pub phone_number: String,
    #[validate(length(min = 2, max = 56))]
    pub country: String,
    #[validate(length(min = 1, max = 85))]
    pub city: String,
    #[validate(length(min = 5, max = 100))]
    pub address: String,
}

/// Admin partial update of an existing order
#[derive(Debug, Default, Deserialize, Validate)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    #[validate(length(min = 10, max = 15))]
    pub phone_number: Option<String>,
    #[validate(length(min = 2, max = 56))]
    pub country: Option<String>,
    #[validate(length(min = 1, max = 85))]
    pub city: Option<String>,
    #[validate(length(min = 5, max = 100))]
    pub address: Option<String>,
}

/// Placement response body
#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub order_id: i64,
    pub total_amount: i64,
}
