//! Cart endpoints

use axum::{Extension, Json};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use crate::auth::Identity;
use crate::db::cart;
use crate::db::models::{CartAdd, CartLineDetail};
use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Vec<CartLineDetail>>> {
    let mut conn = state.pool.acquire().await?;
    let lines = cart::lines_for_user(&mut *conn, identity.user_id).await?;
    Ok(Json(lines))
}

/// POST /api/v1/cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CartAdd>,
) -> AppResult<StatusCode> {
    payload.validate()?;
    cart::upsert_line(&state.pool, identity.user_id, payload.product_id, payload.quantity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cart/{product_id}
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(product_id): Path<i64>,
) -> AppResult<StatusCode> {
    cart::remove_line(&state.pool, identity.user_id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
