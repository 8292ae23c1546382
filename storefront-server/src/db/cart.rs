//! Cart repository
//!
//! A user has at most one cart line per product (UNIQUE(user_id, product_id));
//! repeated adds accumulate quantity.

use sqlx::{SqliteConnection, SqlitePool};

use crate::db::models::CartLineDetail;
use crate::error::{AppError, AppResult};
use crate::util::now_millis;

/// Snapshot the user's cart lines in insertion order, joined with the
/// product's current price and stock.
///
/// Takes a connection so the placement transaction can read the snapshot
/// inside its own transaction boundary.
pub async fn lines_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<CartLineDetail>, sqlx::Error> {
    sqlx::query_as::<_, CartLineDetail>(
        r#"
        SELECT c.product_id,
               p.name AS product_name,
               c.quantity,
               p.price AS unit_price,
               COALESCE(i.quantity, 0) AS stock
        FROM cart c
        JOIN product p ON p.id = c.product_id
        LEFT JOIN inventory i ON i.product_id = c.product_id
        WHERE c.user_id = ?1
        ORDER BY c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

/// Add a product to the cart, accumulating quantity on repeat adds
pub async fn upsert_line(
    pool: &SqlitePool,
    user_id: i64,
    product_id: i64,
    quantity: i64,
) -> AppResult<()> {
    // Reject unknown products up front so the FK error doesn't surface as a 500
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM product WHERE id = ?1")
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("Product {product_id} not found")));
    }

    sqlx::query(
        r#"
        INSERT INTO cart (user_id, product_id, quantity, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(user_id, product_id)
        DO UPDATE SET quantity = quantity + excluded.quantity
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .bind(now_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove one product line from the cart
pub async fn remove_line(pool: &SqlitePool, user_id: i64, product_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM cart WHERE user_id = ?1 AND product_id = ?2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Product {product_id} is not in the cart"
        )));
    }
    Ok(())
}

/// Delete all of the user's cart lines (placement runs this inside its
/// transaction so the cart only clears when the order commits)
pub async fn clear_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM cart WHERE user_id = ?1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
