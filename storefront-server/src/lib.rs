//! storefront-server — e-commerce backend
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── config.rs      # Environment configuration
//! ├── state.rs       # Shared application state
//! ├── error.rs       # Unified error handling
//! ├── auth/          # JWT authentication, password hashing
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Database layer (SQLite via sqlx)
//! ├── orders/        # Order placement workflow
//! ├── live/          # Admin order-notification channel
//! └── email/         # Order confirmation mail
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod live;
pub mod orders;
pub mod state;
pub mod util;

// Re-export common types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
