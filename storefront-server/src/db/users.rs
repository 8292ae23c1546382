//! User repository

use sqlx::SqlitePool;

use crate::db::models::User;
use crate::error::{AppError, AppResult};
use crate::util::now_millis;

/// Insert a new user; maps the unique-email violation to a conflict
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    first_name: &str,
) -> AppResult<User> {
    let now = now_millis();
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO user (email, password_hash, first_name, role, created_at)
        VALUES (?1, ?2, ?3, 'user', ?4)
        RETURNING id, email, password_hash, first_name, role, created_at
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("User with email {email} already exists"))
        }
        _ => AppError::from(e),
    })?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, first_name, role, created_at FROM user WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, first_name, role, created_at FROM user WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Promote a user to admin (used by seeding / ops tooling and tests)
pub async fn set_role(pool: &SqlitePool, id: i64, role: &str) -> AppResult<()> {
    sqlx::query("UPDATE user SET role = ?2 WHERE id = ?1")
        .bind(id)
        .bind(role)
        .execute(pool)
        .await?;
    Ok(())
}
