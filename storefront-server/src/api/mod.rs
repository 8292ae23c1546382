//! API routes

pub mod admin_ws;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod health;
pub mod order;

use axum::routing::{delete, get, patch, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_admin, require_auth};
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public: health, auth, catalog reads
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/categories", get(catalog::list_categories))
        .route("/api/v1/products", get(catalog::list_products))
        .route("/api/v1/products/{id}", get(catalog::get_product));

    // Authenticated: cart and orders
    let user = Router::new()
        .route("/api/v1/cart", get(cart::get_cart).post(cart::add_to_cart))
        .route("/api/v1/cart/{product_id}", delete(cart::remove_from_cart))
        .route("/api/v1/orders", get(order::list_orders).post(order::create_order))
        .route("/api/v1/orders/{id}", get(order::get_order))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin: catalog writes, order management, live order feed
    let admin = Router::new()
        .route("/api/v1/categories", post(catalog::create_category))
        .route("/api/v1/products", post(catalog::create_product))
        .route("/api/v1/products/{id}", patch(catalog::update_product))
        .route("/api/v1/orders/{id}", patch(order::update_order))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // WebSocket authenticates inside the handler: browsers cannot set an
    // Authorization header on the upgrade request, so the token rides a
    // query parameter.
    let ws = Router::new().route("/api/v1/orders/ws", get(admin_ws::order_feed));

    Router::new()
        .merge(public)
        .merge(user)
        .merge(admin)
        .merge(ws)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
