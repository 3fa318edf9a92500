//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NIVARA_DATABASE_URL` - `PostgreSQL` connection string
//! - `NIVARA_BASE_URL` - Public URL for the storefront
//! - `NIVARA_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `NIVARA_HOST` - Bind address (default: 127.0.0.1)
//! - `NIVARA_PORT` - Listen port (default: 3000)
//! - `NIVARA_EMAIL_PROVIDER` - `resend`, `sendgrid`, `relay`, or `console` (default: console)
//! - `NIVARA_EMAIL_FROM` - From address for transactional email
//! - `RESEND_API_KEY` - API key when the provider is `resend`
//! - `SENDGRID_API_KEY` - API key when the provider is `sendgrid`
//! - `NIVARA_EMAIL_RELAY_URL` - Endpoint when the provider is `relay`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: development)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct NivaraConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Transactional email delivery configuration
    pub email: EmailConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: String,
}

/// Which HTTP email provider to deliver through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailProvider {
    Resend,
    Sendgrid,
    /// Generic HTTP relay accepting `{to, subject, html}` JSON.
    Relay,
    /// Log instead of sending. The default for local development.
    #[default]
    Console,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "resend" => Ok(Self::Resend),
            "sendgrid" => Ok(Self::Sendgrid),
            "relay" => Ok(Self::Relay),
            "console" => Ok(Self::Console),
            other => Err(format!(
                "unknown email provider '{other}' (expected resend, sendgrid, relay, or console)"
            )),
        }
    }
}

/// Transactional email configuration.
///
/// Implements `Debug` manually to redact API keys.
#[derive(Clone)]
pub struct EmailConfig {
    /// Selected delivery provider
    pub provider: EmailProvider,
    /// From address, e.g. `Nivara <noreply@nivara.com>`
    pub from_address: String,
    /// Resend API key (required when provider is `resend`)
    pub resend_api_key: Option<SecretString>,
    /// `SendGrid` API key (required when provider is `sendgrid`)
    pub sendgrid_api_key: Option<SecretString>,
    /// Relay endpoint URL (required when provider is `relay`)
    pub relay_url: Option<String>,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("provider", &self.provider)
            .field("from_address", &self.from_address)
            .field("resend_api_key", &self.resend_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("sendgrid_api_key", &self.sendgrid_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("relay_url", &self.relay_url)
            .finish()
    }
}

impl NivaraConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("NIVARA_DATABASE_URL")?;
        let host = get_env_or_default("NIVARA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("NIVARA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("NIVARA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("NIVARA_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("NIVARA_BASE_URL")?;
        let session_secret = get_validated_secret("NIVARA_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "NIVARA_SESSION_SECRET")?;

        let email = EmailConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_env_or_default("SENTRY_ENVIRONMENT", "development");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            email,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let provider = get_env_or_default("NIVARA_EMAIL_PROVIDER", "console")
            .parse::<EmailProvider>()
            .map_err(|e| ConfigError::InvalidEnvVar("NIVARA_EMAIL_PROVIDER".to_string(), e))?;

        let from_address =
            get_env_or_default("NIVARA_EMAIL_FROM", "Nivara <noreply@nivara.com>");

        let resend_api_key = get_optional_env("RESEND_API_KEY").map(SecretString::from);
        let sendgrid_api_key = get_optional_env("SENDGRID_API_KEY").map(SecretString::from);
        let relay_url = get_optional_env("NIVARA_EMAIL_RELAY_URL");

        // Fail at startup, not at first send.
        match provider {
            EmailProvider::Resend if resend_api_key.is_none() => {
                return Err(ConfigError::MissingEnvVar("RESEND_API_KEY".to_string()));
            }
            EmailProvider::Sendgrid if sendgrid_api_key.is_none() => {
                return Err(ConfigError::MissingEnvVar("SENDGRID_API_KEY".to_string()));
            }
            EmailProvider::Relay if relay_url.is_none() => {
                return Err(ConfigError::MissingEnvVar(
                    "NIVARA_EMAIL_RELAY_URL".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            provider,
            from_address,
            resend_api_key,
            sendgrid_api_key,
            relay_url,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., NIVARA_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL (set by Fly.io postgres attach)
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-session-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        let result = validate_session_secret(&secret, "TEST_SESSION");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_session_secret_valid_length() {
        let secret = SecretString::from("a".repeat(32));
        let result = validate_session_secret(&secret, "TEST_SESSION");
        assert!(result.is_ok());
    }

    #[test]
    fn test_email_provider_parsing() {
        assert_eq!("resend".parse::<EmailProvider>().unwrap(), EmailProvider::Resend);
        assert_eq!("SendGrid".parse::<EmailProvider>().unwrap(), EmailProvider::Sendgrid);
        assert_eq!("console".parse::<EmailProvider>().unwrap(), EmailProvider::Console);
        assert!("smtp".parse::<EmailProvider>().is_err());
    }

    #[test]
    fn test_email_config_debug_redacts_keys() {
        let config = EmailConfig {
            provider: EmailProvider::Resend,
            from_address: "Nivara <noreply@nivara.com>".to_string(),
            resend_api_key: Some(SecretString::from("re_super_private_key")),
            sendgrid_api_key: None,
            relay_url: None,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("re_super_private_key"));
    }

    #[test]
    fn test_socket_addr() {
        let config = NivaraConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            email: EmailConfig {
                provider: EmailProvider::Console,
                from_address: "Nivara <noreply@nivara.com>".to_string(),
                resend_api_key: None,
                sendgrid_api_key: None,
                relay_url: None,
            },
            sentry_dsn: None,
            sentry_environment: "development".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
