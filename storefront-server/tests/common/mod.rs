//! Shared test fixtures
#![allow(dead_code)]

use sqlx::SqlitePool;
use storefront_server::db;
use storefront_server::db::models::OrderCreate;
use tempfile::TempDir;

pub const JWT_SECRET: &str = "test-secret";

/// Fresh migrated database in a temp directory.
///
/// The TempDir must outlive the pool, so both are returned.
pub async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.db");
    let pool = db::connect(path.to_str().unwrap()).await.expect("open test db");
    (dir, pool)
}

pub async fn seed_user(pool: &SqlitePool, email: &str) -> i64 {
    let hash = storefront_server::auth::hash_password("password123").unwrap();
    let user = db::users::create(pool, email, &hash, "Test").await.unwrap();
    user.id
}

pub async fn seed_admin(pool: &SqlitePool, email: &str) -> i64 {
    let id = seed_user(pool, email).await;
    db::users::set_role(pool, id, "admin").await.unwrap();
    id
}

pub async fn seed_product(pool: &SqlitePool, name: &str, price: i64, stock: i64) -> i64 {
    let payload = storefront_server::db::models::ProductCreate {
        name: name.to_string(),
        description: String::new(),
        category_id: None,
        price,
        stock,
    };
    db::catalog::create_product(pool, &payload).await.unwrap().id
}

pub async fn add_to_cart(pool: &SqlitePool, user_id: i64, product_id: i64, quantity: i64) {
    db::cart::upsert_line(pool, user_id, product_id, quantity)
        .await
        .unwrap();
}

pub async fn stock_of(pool: &SqlitePool, product_id: i64) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    db::inventory::quantity_of(&mut *conn, product_id).await.unwrap()
}

pub async fn cart_len(pool: &SqlitePool, user_id: i64) -> usize {
    let mut conn = pool.acquire().await.unwrap();
    db::cart::lines_for_user(&mut *conn, user_id).await.unwrap().len()
}

pub async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "order""#)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn delivery() -> OrderCreate {
    OrderCreate {
        phone_number: "79990001122".to_string(),
        country: "US".to_string(),
        city: "Springfield".to_string(),
        address: "742 Evergreen Terrace".to_string(),
    }
}
