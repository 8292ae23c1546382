//! Order endpoints

use axum::{Extension, Json};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use crate::auth::Identity;
use crate::db::models::{Order, OrderCreate, OrderCreated, OrderDetail, OrderUpdate};
use crate::db::{orders, users};
use crate::error::{AppError, AppResult};
use crate::orders::place_order;
use crate::state::AppState;

/// POST /api/v1/orders
///
/// Places the order in one transaction, then notifies connected admins
/// and sends the confirmation email. Both side effects run after commit
/// and never fail the request.
pub async fn create_order(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderCreated>)> {
    payload.validate()?;

    let placed = place_order(&state.pool, identity.user_id, &payload).await?;

    state
        .admin_channel
        .broadcast(&format!("New Order with id {}", placed.order_id))
        .await;

    // The order is committed; everything below is best-effort and must not
    // touch the response. Lookups feeding the email run inside the task.
    let mailer = state.mailer.clone();
    let pool = state.pool.clone();
    let user_id = identity.user_id;
    let order_id = placed.order_id;
    tokio::spawn(async move {
        let user = match users::find_by_id(&pool, user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::error!(order_id, user_id, "Confirmation email skipped: user not found");
                return;
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "Confirmation email skipped: user lookup failed");
                return;
            }
        };
        let order = match orders::find_by_id(&pool, order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                tracing::error!(order_id, "Confirmation email skipped: order not found");
                return;
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "Confirmation email skipped: order lookup failed");
                return;
            }
        };
        mailer
            .send_order_confirmation(&user.email, &user.first_name, &order)
            .await;
    });

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            order_id: placed.order_id,
            total_amount: placed.total_amount,
        }),
    ))
}

/// GET /api/v1/orders — the caller's own orders
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(orders::list_for_user(&state.pool, identity.user_id).await?))
}

/// GET /api/v1/orders/{id} — owner or admin only
pub async fn get_order(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let order = orders::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;

    if order.user_id != identity.user_id && !identity.is_admin() {
        return Err(AppError::Forbidden(
            "You do not have access to this order".to_string(),
        ));
    }

    let items = orders::items_for_order(&state.pool, id).await?;
    Ok(Json(OrderDetail { order, items }))
}

/// PATCH /api/v1/orders/{id} (admin)
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    payload.validate()?;
    let order = orders::update_fields(&state.pool, id, &payload).await?;
    tracing::info!(order_id = id, status = ?order.status, "Order updated");
    Ok(Json(order))
}
