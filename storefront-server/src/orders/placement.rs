//! Order placement orchestrator
//!
//! Placement runs as a single database transaction:
//!
//! 1. snapshot the cart (empty cart aborts before any write)
//! 2. insert the pending order with a zero total
//! 3. per cart line: insert the purchased item with its price snapshot,
//!    then atomically reserve stock from the ledger
//! 4. finalize the total from the snapshots
//! 5. clear the cart
//!
//! Any failure drops the transaction, so an order either exists with all
//! of its lines, its total, reserved stock and a cleared cart, or leaves
//! no trace at all. The admin broadcast and confirmation email happen
//! after commit, in the HTTP layer.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::models::OrderCreate;
use crate::db::{cart, inventory, orders};
use crate::db::inventory::ReserveError;
use crate::error::AppError;

/// Outcome of a committed placement
#[derive(Debug)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub total_amount: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        requested: i64,
        available: i64,
    },

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl From<ReserveError> for PlacementError {
    fn from(e: ReserveError) -> Self {
        match e {
            ReserveError::InsufficientStock {
                product_id,
                requested,
                available,
            } => PlacementError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            ReserveError::Db(e) => PlacementError::Db(e),
        }
    }
}

impl From<PlacementError> for AppError {
    fn from(e: PlacementError) -> Self {
        match e {
            PlacementError::EmptyCart => AppError::NotFound("Cart is empty".to_string()),
            PlacementError::InsufficientStock {
                product_id,
                requested,
                available,
            } => AppError::Conflict(format!(
                "Insufficient stock for product {product_id}: requested {requested}, available {available}"
            )),
            PlacementError::Db(e) => AppError::Database(e.to_string()),
        }
    }
}

/// Place an order from the user's cart.
///
/// On success the cart is cleared and stock is reserved; on any error the
/// transaction rolls back and the database is unchanged.
pub async fn place_order(
    pool: &SqlitePool,
    user_id: i64,
    delivery: &OrderCreate,
) -> Result<PlacedOrder, PlacementError> {
    // Write transaction from the start: a deferred BEGIN would take a read
    // snapshot at the cart select and, under contention on the same product,
    // fail the later upgrade with BUSY instead of re-reading the stock.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let lines = cart::lines_for_user(&mut *tx, user_id).await?;
    if lines.is_empty() {
        return Err(PlacementError::EmptyCart);
    }

    // Advisory pre-check against the snapshot; the reservation below is
    // the authoritative one.
    for line in &lines {
        if line.stock < line.quantity {
            return Err(PlacementError::InsufficientStock {
                product_id: line.product_id,
                requested: line.quantity,
                available: line.stock,
            });
        }
    }

    let order_id = orders::insert_pending(
        &mut *tx,
        user_id,
        &delivery.phone_number,
        &delivery.country,
        &delivery.city,
        &delivery.address,
    )
    .await?;

    let mut total_amount: i64 = 0;
    for line in &lines {
        orders::insert_item(&mut *tx, order_id, line.product_id, line.quantity, line.unit_price)
            .await?;
        match inventory::reserve(&mut *tx, line.product_id, line.quantity).await {
            Ok(_) => {}
            Err(e) => {
                warn!(
                    user_id,
                    product_id = line.product_id,
                    "Stock reservation failed, rolling back order placement"
                );
                return Err(e.into());
            }
        }
        total_amount += line.subtotal();
    }

    orders::set_total(&mut *tx, order_id, total_amount).await?;
    cart::clear_for_user(&mut *tx, user_id).await?;

    tx.commit().await?;

    info!(user_id, order_id, total_amount, "Order placed");

    Ok(PlacedOrder {
        order_id,
        total_amount,
    })
}
