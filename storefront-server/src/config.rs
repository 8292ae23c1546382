//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
///
/// All fields can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_PATH | storefront.db | SQLite database file |
/// | HTTP_PORT | 8080 | HTTP service port |
/// | JWT_SECRET | (dev fallback) | JWT signing secret, mandatory outside development |
/// | JWT_EXPIRATION_MINUTES | 1440 | Access token lifetime |
/// | MAIL_API_URL | (empty) | Transactional mail API endpoint |
/// | MAIL_API_TOKEN | (empty) | Mail API bearer token |
/// | MAIL_FROM_EMAIL | noreply@storefront.local | Sender address |
/// | ENVIRONMENT | development | development / staging / production |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in minutes
    pub jwt_expiration_minutes: i64,
    /// Transactional mail API endpoint (empty disables outbound mail)
    pub mail_api_url: String,
    /// Mail API bearer token
    pub mail_api_token: String,
    /// Sender address for confirmation mails
    pub mail_from_email: String,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "storefront.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1440),
            mail_api_url: std::env::var("MAIL_API_URL").unwrap_or_default(),
            mail_api_token: std::env::var("MAIL_API_TOKEN").unwrap_or_default(),
            mail_from_email: std::env::var("MAIL_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@storefront.local".into()),
            environment,
        })
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
