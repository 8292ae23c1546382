//! Transactional email
//!
//! Thin client for an HTTP mail API. Sending is best-effort: a delivery
//! failure is logged and never fails the request that triggered it.

use serde_json::json;
use tracing::{debug, error, info};

use crate::db::models::Order;

#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    from_email: String,
}

impl Mailer {
    pub fn new(api_url: String, api_token: String, from_email: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_token,
            from_email,
        }
    }

    fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_token.is_empty()
    }

    /// Send the order confirmation with the delivery details and order date.
    /// Skipped with a debug log when the mail API is not configured (local
    /// development).
    pub async fn send_order_confirmation(&self, to_email: &str, first_name: &str, order: &Order) {
        let order_id = order.id;
        if !self.is_configured() {
            debug!(order_id, "Mail API not configured, skipping confirmation email");
            return;
        }

        let placed_at = chrono::DateTime::from_timestamp_millis(order.created_at)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_default();

        let body = json!({
            "from": { "email": self.from_email, "name": "Storefront" },
            "to": [{ "email": to_email }],
            "subject": format!("Order #{order_id} confirmed"),
            "text": format!(
                "Hi {first_name},\n\nYour order #{order_id} placed on {placed_at} \
                 has been received.\nTotal: {}.\nDelivery to: {}, {}, {} (phone {}).\n\n\
                 Thank you for shopping with us!",
                order.total_amount, order.country, order.city, order.address, order.phone_number
            ),
            "category": "order_confirmation",
        });

        let result = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                info!(order_id, "Order confirmation email sent");
            }
            Ok(resp) => {
                error!(order_id, status = %resp.status(), "Mail API rejected confirmation email");
            }
            Err(e) => {
                error!(order_id, error = %e, "Failed to reach mail API");
            }
        }
    }
}
