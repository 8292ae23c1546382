//! Order repository
//!
//! The transaction-scoped functions take `&mut SqliteConnection` so the
//! placement orchestrator can run them inside a single transaction;
//! pool-taking functions serve the read/update handlers.

use sqlx::{SqliteConnection, SqlitePool};

use crate::db::models::{Order, OrderItem, OrderStatus, OrderUpdate};
use crate::error::{AppError, AppResult};
use crate::util::now_millis;

/// Insert a pending order with a zero total; the total is finalized once
/// every line has been processed.
pub async fn insert_pending(
    conn: &mut SqliteConnection,
    user_id: i64,
    phone_number: &str,
    country: &str,
    city: &str,
    address: &str,
) -> Result<i64, sqlx::Error> {
    let now = now_millis();
    let order_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO "order" (user_id, status, total_amount, phone_number, country, city, address, created_at, updated_at)
        VALUES (?1, 'pending', 0, ?2, ?3, ?4, ?5, ?6, ?6)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(phone_number)
    .bind(country)
    .bind(city)
    .bind(address)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    Ok(order_id)
}

/// Insert one purchased line with its price snapshot
pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    price: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO order_item (order_id, product_id, quantity, price)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(price)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Finalize the order total
pub async fn set_total(
    conn: &mut SqliteConnection,
    order_id: i64,
    total_amount: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(r#"UPDATE "order" SET total_amount = ?2, updated_at = ?3 WHERE id = ?1"#)
        .bind(order_id)
        .bind(total_amount)
        .bind(now_millis())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, order_id: i64) -> AppResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        SELECT id, user_id, status, total_amount, phone_number, country, city, address,
               created_at, updated_at
        FROM "order" WHERE id = ?1
        "#,
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}

pub async fn items_for_order(pool: &SqlitePool, order_id: i64) -> AppResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        r#"
        SELECT id, order_id, product_id, quantity, price
        FROM order_item WHERE order_id = ?1
        ORDER BY id
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Orders belonging to one user, newest first
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        r#"
        SELECT id, user_id, status, total_amount, phone_number, country, city, address,
               created_at, updated_at
        FROM "order" WHERE user_id = ?1
        ORDER BY id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

/// Partial update of status and delivery fields; untouched fields keep
/// their current values via COALESCE.
pub async fn update_fields(
    pool: &SqlitePool,
    order_id: i64,
    update: &OrderUpdate,
) -> AppResult<Order> {
    let status: Option<OrderStatus> = update.status;

    let order = sqlx::query_as::<_, Order>(
        r#"
        UPDATE "order"
        SET status = COALESCE(?2, status),
            phone_number = COALESCE(?3, phone_number),
            country = COALESCE(?4, country),
            city = COALESCE(?5, city),
            address = COALESCE(?6, address),
            updated_at = ?7
        WHERE id = ?1
        RETURNING id, user_id, status, total_amount, phone_number, country, city, address,
                  created_at, updated_at
        "#,
    )
    .bind(order_id)
    .bind(status)
    .bind(update.phone_number.as_deref())
    .bind(update.country.as_deref())
    .bind(update.city.as_deref())
    .bind(update.address.as_deref())
    .bind(now_millis())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;

    Ok(order)
}
