//! Shared application state

use sqlx::SqlitePool;

use crate::config::Config;
use crate::email::Mailer;
use crate::error::AppError;
use crate::live::AdminChannel;
use crate::db;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    pub mailer: Mailer,
    pub admin_channel: AdminChannel,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let pool = db::connect(&config.database_path).await?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            jwt_expiration_minutes: config.jwt_expiration_minutes,
            mailer: Mailer::new(
                config.mail_api_url.clone(),
                config.mail_api_token.clone(),
                config.mail_from_email.clone(),
            ),
            admin_channel: AdminChannel::new(),
        })
    }

    /// State over an existing pool (tests)
    pub fn with_pool(pool: SqlitePool, jwt_secret: &str) -> Self {
        Self {
            pool,
            jwt_secret: jwt_secret.to_string(),
            jwt_expiration_minutes: 60,
            mailer: Mailer::new(String::new(), String::new(), String::new()),
            admin_channel: AdminChannel::new(),
        }
    }
}
