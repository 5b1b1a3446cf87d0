//! Order-notification email
//!
//! Confirmation mail is strictly best-effort: callers spawn
//! [`EmailService::send_order_confirmation`] as a detached task and never
//! await it; the outcome is observed only through logging.

pub mod provider;
pub mod smtp;

pub use provider::{EmailMessage, EmailProvider, EmailProviderError};
pub use smtp::SmtpEmailProvider;

use std::sync::Arc;
use tracing::{debug, warn};

/// Sends transactional mail through the configured provider
pub struct EmailService {
    provider: Arc<dyn EmailProvider>,
}

impl EmailService {
    pub fn new(provider: Arc<dyn EmailProvider>) -> Self {
        Self { provider }
    }

    /// Send the order-confirmation mail. Failures are logged and swallowed.
    pub async fn send_order_confirmation(&self, to: &str, transaction_id: Option<&str>) {
        let message = order_confirmation(to, transaction_id);
        match self.provider.send(&message).await {
            Ok(()) => debug!("order confirmation sent to {}", to),
            Err(err) => warn!("order confirmation to {} failed: {}", to, err),
        }
    }
}

/// Build the order-confirmation message
pub fn order_confirmation(to: &str, transaction_id: Option<&str>) -> EmailMessage {
    let transaction_id = transaction_id.unwrap_or("n/a");
    let html_body = format!(
        "<div>\
         <h1>Thank You for your Order!</h1>\
         <h4>Your Transaction Id: <strong>{}</strong></h4>\
         <p>We would like to get your feedback about the food!</p>\
         </div>",
        transaction_id
    );

    EmailMessage::new(to, "Bistro Order Confirmation", html_body)
}
