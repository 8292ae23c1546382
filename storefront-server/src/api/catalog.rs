//! Catalog endpoints

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use crate::db::catalog;
use crate::db::models::{Category, CategoryCreate, Product, ProductCreate, ProductUpdate};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(catalog::list_categories(&state.pool).await?))
}

/// POST /api/v1/categories (admin)
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    payload.validate()?;
    let category = catalog::create_category(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(catalog::list_products(&state.pool).await?))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = catalog::find_product(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;
    Ok(Json(product))
}

/// POST /api/v1/products (admin)
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    payload.validate()?;
    let product = catalog::create_product(&state.pool, &payload).await?;
    tracing::info!(product_id = product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/v1/products/{id} (admin)
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    payload.validate()?;
    let product = catalog::update_product(&state.pool, id, &payload).await?;
    Ok(Json(product))
}
