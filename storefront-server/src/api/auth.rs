//! Registration and login

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use validator::Validate;

use crate::auth::{create_token, hash_password, verify_password};
use crate::db::models::{User, UserLogin, UserRegister};
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserRegister>,
) -> AppResult<(StatusCode, Json<User>)> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;
    let user = users::create(&state.pool, &payload.email, &password_hash, &payload.first_name)
        .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<TokenResponse>> {
    let user = users::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::invalid_credentials());
    }

    let access_token = create_token(
        user.id,
        &user.email,
        &user.role,
        &state.jwt_secret,
        state.jwt_expiration_minutes,
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer",
    }))
}
