//! Stripe payment-intent client
//!
//! The only contract consumed is intent creation: given an amount in minor
//! units and a currency, Stripe returns a client secret the frontend uses
//! to complete the card charge.

use crate::config::StripeConfig;
use crate::error::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;

/// A created payment intent. Only the client secret crosses our API
/// boundary; the id is kept for logging.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Stripe API client
#[derive(Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http_client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(config: StripeConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Create a card payment intent for the given amount in minor units
    pub async fn create_intent(&self, amount_cents: i64, currency: &str) -> Result<PaymentIntent> {
        let url = format!("{}/v1/payment_intents", self.config.api_base);

        let amount = amount_cents.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to create payment intent: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Gateway(format!(
                "Failed to create payment intent: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to parse payment intent: {}", e)))
    }
}

/// Convert a decimal price to integer minor units, truncating like the
/// checkout frontend expects
pub fn amount_in_cents(price: f64) -> i64 {
    (price * 100.0) as i64
}
