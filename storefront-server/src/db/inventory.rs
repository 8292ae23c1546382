//! Inventory ledger
//!
//! Stock reservation is a single conditional UPDATE so the floor check and
//! the decrement are one atomic statement. Two concurrent reservations for
//! the last unit can never both succeed: the second one matches no row.

use sqlx::SqliteConnection;

/// Reservation failure detail
#[derive(Debug)]
pub enum ReserveError {
    /// The floor check failed: not enough units on hand
    InsufficientStock {
        product_id: i64,
        requested: i64,
        available: i64,
    },
    Db(sqlx::Error),
}

impl From<sqlx::Error> for ReserveError {
    fn from(e: sqlx::Error) -> Self {
        ReserveError::Db(e)
    }
}

/// Atomically decrement stock for `product_id` by `quantity`.
///
/// Returns the remaining quantity on success. Fails with
/// [`ReserveError::InsufficientStock`] when the ledger holds fewer units
/// than requested (or the product has no ledger row), leaving the ledger
/// untouched.
pub async fn reserve(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
) -> Result<i64, ReserveError> {
    let remaining: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE inventory
        SET quantity = quantity - ?2
        WHERE product_id = ?1 AND quantity >= ?2
        RETURNING quantity
        "#,
    )
    .bind(product_id)
    .bind(quantity)
    .fetch_optional(&mut *conn)
    .await?;

    match remaining {
        Some(left) => Ok(left),
        None => {
            let available: i64 =
                sqlx::query_scalar("SELECT quantity FROM inventory WHERE product_id = ?1")
                    .bind(product_id)
                    .fetch_optional(&mut *conn)
                    .await?
                    .unwrap_or(0);

            Err(ReserveError::InsufficientStock {
                product_id,
                requested: quantity,
                available,
            })
        }
    }
}

/// Current on-hand quantity (0 when the product has no ledger row)
pub async fn quantity_of(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> Result<i64, sqlx::Error> {
    let qty: Option<i64> =
        sqlx::query_scalar("SELECT quantity FROM inventory WHERE product_id = ?1")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(qty.unwrap_or(0))
}
