//! HTTP delivery backends for transactional email.
//!
//! Each backend takes the rendered message and posts it to the provider's
//! REST API. Missing credentials are caught at config load; the guards here
//! only cover config structs built by hand in tests.

use secrecy::ExposeSecret;
use serde_json::json;

use super::EmailError;
use crate::config::EmailConfig;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// Deliver via the Resend REST API.
pub(super) async fn send_resend(
    client: &reqwest::Client,
    config: &EmailConfig,
    to: &str,
    subject: &str,
    html: &str,
    text: &str,
) -> Result<(), EmailError> {
    let Some(api_key) = config.resend_api_key.as_ref() else {
        tracing::warn!("Resend provider selected but RESEND_API_KEY is unset; dropping email");
        return Ok(());
    };

    let response = client
        .post(RESEND_ENDPOINT)
        .bearer_auth(api_key.expose_secret())
        .json(&json!({
            "from": config.from_address,
            "to": [to],
            "subject": subject,
            "html": html,
            "text": text,
        }))
        .send()
        .await?;

    check_status(response)
}

/// Deliver via the `SendGrid` v3 mail send API.
pub(super) async fn send_sendgrid(
    client: &reqwest::Client,
    config: &EmailConfig,
    to: &str,
    subject: &str,
    html: &str,
    text: &str,
) -> Result<(), EmailError> {
    let Some(api_key) = config.sendgrid_api_key.as_ref() else {
        tracing::warn!("SendGrid provider selected but SENDGRID_API_KEY is unset; dropping email");
        return Ok(());
    };

    let response = client
        .post(SENDGRID_ENDPOINT)
        .bearer_auth(api_key.expose_secret())
        .json(&json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": config.from_address },
            "subject": subject,
            "content": [
                { "type": "text/plain", "value": text },
                { "type": "text/html", "value": html },
            ],
        }))
        .send()
        .await?;

    check_status(response)
}

/// Deliver via a generic HTTP relay accepting `{to, subject, html, text}`.
pub(super) async fn send_relay(
    client: &reqwest::Client,
    config: &EmailConfig,
    to: &str,
    subject: &str,
    html: &str,
    text: &str,
) -> Result<(), EmailError> {
    let Some(relay_url) = config.relay_url.as_deref() else {
        tracing::warn!("Relay provider selected but NIVARA_EMAIL_RELAY_URL is unset; dropping email");
        return Ok(());
    };

    let response = client
        .post(relay_url)
        .json(&json!({
            "from": config.from_address,
            "to": to,
            "subject": subject,
            "html": html,
            "text": text,
        }))
        .send()
        .await?;

    check_status(response)
}

fn check_status(response: reqwest::Response) -> Result<(), EmailError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(EmailError::ProviderRejected { status })
    }
}
