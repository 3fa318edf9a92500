//! Transactional email delivery.
//!
//! Bodies are rendered with Askama templates and handed to an HTTP delivery
//! provider (Resend, `SendGrid`, or a generic relay). The console provider
//! logs instead of sending and is the local-development default.
//!
//! Delivery failures never bubble into user-facing workflows; callers treat
//! sends as best-effort and log the error.

mod providers;

use askama::Template;
use thiserror::Error;

use crate::config::{EmailConfig, EmailProvider};

/// HTML template for the order confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml<'a> {
    customer_name: &'a str,
    order_id: &'a str,
    order_date: &'a str,
    quantity: u32,
    total: &'a str,
    shipping_address: &'a str,
}

/// Plain text template for the order confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.txt")]
struct OrderConfirmationText<'a> {
    customer_name: &'a str,
    order_id: &'a str,
    order_date: &'a str,
    quantity: u32,
    total: &'a str,
    shipping_address: &'a str,
}

/// HTML template for the password reset email.
#[derive(Template)]
#[template(path = "email/password_reset.html")]
struct PasswordResetHtml<'a> {
    reset_url: &'a str,
}

/// Plain text template for the password reset email.
#[derive(Template)]
#[template(path = "email/password_reset.txt")]
struct PasswordResetText<'a> {
    reset_url: &'a str,
}

/// Details interpolated into the order confirmation email.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub customer_name: String,
    pub order_id: String,
    pub order_date: String,
    pub quantity: u32,
    /// Already-formatted total, e.g. "₹9,998".
    pub total: String,
    pub shipping_address: String,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// HTTP transport error.
    #[error("email transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider returned a non-success status.
    #[error("email provider rejected the message: {status}")]
    ProviderRejected { status: reqwest::StatusCode },

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailService {
    /// Create a new email service from configuration.
    #[must_use]
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send an order confirmation email after a successful purchase.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_order_confirmation(
        &self,
        to: &str,
        order: &OrderConfirmation,
    ) -> Result<(), EmailError> {
        let html = OrderConfirmationHtml {
            customer_name: &order.customer_name,
            order_id: &order.order_id,
            order_date: &order.order_date,
            quantity: order.quantity,
            total: &order.total,
            shipping_address: &order.shipping_address,
        }
        .render()?;
        let text = OrderConfirmationText {
            customer_name: &order.customer_name,
            order_id: &order.order_id,
            order_date: &order.order_date,
            quantity: order.quantity,
            total: &order.total,
            shipping_address: &order.shipping_address,
        }
        .render()?;

        self.send(to, "Your Nivara Order Confirmation", &html, &text)
            .await
    }

    /// Send a password reset email with a one-time link.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_password_reset(&self, to: &str, reset_url: &str) -> Result<(), EmailError> {
        let html = PasswordResetHtml { reset_url }.render()?;
        let text = PasswordResetText { reset_url }.render()?;

        self.send(to, "Reset your Nivara password", &html, &text)
            .await
    }

    /// Deliver a message through the configured provider.
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        text: &str,
    ) -> Result<(), EmailError> {
        match self.config.provider {
            EmailProvider::Resend => {
                providers::send_resend(&self.client, &self.config, to, subject, html, text).await?;
            }
            EmailProvider::Sendgrid => {
                providers::send_sendgrid(&self.client, &self.config, to, subject, html, text)
                    .await?;
            }
            EmailProvider::Relay => {
                providers::send_relay(&self.client, &self.config, to, subject, html, text).await?;
            }
            EmailProvider::Console => {
                tracing::info!(to = %to, subject = %subject, "Email (console provider, not sent)");
                return Ok(());
            }
        }

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::orders::{format_rupees, order_total};

    /// The total goes through the same formatting path checkout uses, so a
    /// formatting change there shows up here too.
    fn sample_order() -> OrderConfirmation {
        OrderConfirmation {
            customer_name: "Asha Rao".to_string(),
            order_id: "f6a7b1c2-0000-0000-0000-000000000000".to_string(),
            order_date: "29 August 2026".to_string(),
            quantity: 2,
            total: format_rupees(order_total(2)),
            shipping_address: "12 MG Road, Bengaluru, Karnataka - 560001".to_string(),
        }
    }

    #[test]
    fn test_order_confirmation_html_renders_details() {
        let order = sample_order();
        let html = OrderConfirmationHtml {
            customer_name: &order.customer_name,
            order_id: &order.order_id,
            order_date: &order.order_date,
            quantity: order.quantity,
            total: &order.total,
            shipping_address: &order.shipping_address,
        }
        .render()
        .unwrap();

        assert!(html.contains("Asha Rao"));
        assert!(html.contains("f6a7b1c2"));
        assert!(html.contains("₹9,998"));
        assert!(html.contains("12 MG Road"));
    }

    #[test]
    fn test_order_confirmation_text_renders_quantity() {
        let order = sample_order();
        let text = OrderConfirmationText {
            customer_name: &order.customer_name,
            order_id: &order.order_id,
            order_date: &order.order_date,
            quantity: order.quantity,
            total: &order.total,
            shipping_address: &order.shipping_address,
        }
        .render()
        .unwrap();

        assert!(text.contains('2'));
        assert!(text.contains("Asha Rao"));
    }

    #[test]
    fn test_password_reset_renders_link() {
        let html = PasswordResetHtml {
            reset_url: "https://nivara.com/reset-password?token=abc123",
        }
        .render()
        .unwrap();

        assert!(html.contains("https://nivara.com/reset-password?token=abc123"));
    }
}
