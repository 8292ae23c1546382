//! Admin live order feed
//!
//! GET /api/v1/orders/ws — upgrades to a WebSocket that pushes one text
//! message per placed order. Admin-only; the token is accepted either as
//! a bearer header or as a `token` query parameter, since browsers cannot
//! set headers on the upgrade request.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::{bearer_token, verify_token};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    pub token: Option<String>,
}

pub async fn order_feed(
    State(state): State<AppState>,
    Query(query): Query<WsAuthQuery>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string)
        .or(query.token)
        .ok_or(AppError::Unauthorized)?;

    let identity = verify_token(&token, &state.jwt_secret)?;
    if !identity.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    info!(user_id = identity.user_id, "Admin order feed connected");
    Ok(ws.on_upgrade(move |socket| forward_order_events(socket, state)))
}

async fn forward_order_events(mut socket: WebSocket, state: AppState) {
    let (peer_id, mut rx) = state.admin_channel.register();

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Some(text) => {
                        if socket.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    // Channel dropped us (registry cleanup)
                    None => break,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    // Inbound messages are ignored; the feed is push-only
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.admin_channel.unregister(peer_id);
    debug!(peer_id, "Admin order feed disconnected");
}
