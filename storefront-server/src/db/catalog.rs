//! Catalog repository — categories and products

use sqlx::SqlitePool;

use crate::db::models::{Category, CategoryCreate, Product, ProductCreate, ProductUpdate};
use crate::error::{AppError, AppResult};
use crate::util::now_millis;

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.description, p.category_id, p.price,
           COALESCE(i.quantity, 0) AS stock,
           p.created_at, p.updated_at
    FROM product p
    LEFT JOIN inventory i ON i.product_id = p.id
"#;

pub async fn list_categories(pool: &SqlitePool) -> AppResult<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, name, parent_id FROM category ORDER BY id")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

pub async fn create_category(pool: &SqlitePool, payload: &CategoryCreate) -> AppResult<Category> {
    if let Some(parent_id) = payload.parent_id {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM category WHERE id = ?1")
            .bind(parent_id)
            .fetch_optional(pool)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound(format!(
                "Parent category {parent_id} not found"
            )));
        }
    }

    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO category (name, parent_id) VALUES (?1, ?2) RETURNING id, name, parent_id",
    )
    .bind(&payload.name)
    .bind(payload.parent_id)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

pub async fn list_products(pool: &SqlitePool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} ORDER BY p.id"))
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn find_product(pool: &SqlitePool, product_id: i64) -> AppResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} WHERE p.id = ?1"))
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

/// Create a product and its inventory ledger row in one transaction
pub async fn create_product(pool: &SqlitePool, payload: &ProductCreate) -> AppResult<Product> {
    let mut tx = pool.begin().await?;
    let now = now_millis();

    let product_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO product (name, description, category_id, price, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        RETURNING id
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.category_id)
    .bind(payload.price)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO inventory (product_id, quantity) VALUES (?1, ?2)")
        .bind(product_id)
        .bind(payload.stock)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    find_product(pool, product_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Product {product_id} missing after insert")))
}

/// Partial product update; a `stock` value replaces the ledger quantity
pub async fn update_product(
    pool: &SqlitePool,
    product_id: i64,
    update: &ProductUpdate,
) -> AppResult<Product> {
    let mut tx = pool.begin().await?;

    let updated: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE product
        SET name = COALESCE(?2, name),
            description = COALESCE(?3, description),
            category_id = COALESCE(?4, category_id),
            price = COALESCE(?5, price),
            updated_at = ?6
        WHERE id = ?1
        RETURNING id
        "#,
    )
    .bind(product_id)
    .bind(update.name.as_deref())
    .bind(update.description.as_deref())
    .bind(update.category_id)
    .bind(update.price)
    .bind(now_millis())
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
        return Err(AppError::NotFound(format!("Product {product_id} not found")));
    }

    if let Some(stock) = update.stock {
        sqlx::query(
            r#"
            INSERT INTO inventory (product_id, quantity) VALUES (?1, ?2)
            ON CONFLICT(product_id) DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(product_id)
        .bind(stock)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_product(pool, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id} not found")))
}
