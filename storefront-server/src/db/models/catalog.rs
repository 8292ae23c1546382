//! Catalog Models — categories and products

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category entity (flat tree via parent_id)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Create category payload
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Product entity with its current stock level
///
/// Price is in integer minor units. Stock comes from the inventory table;
/// the order core reads both as a point-in-time snapshot.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub price: i64,
    pub stock: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: Option<i64>,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i64,
}

/// Partial product update payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    /// Restock: replaces the inventory quantity
    #[validate(range(min = 0))]
    pub stock: Option<i64>,
}
