//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::NivaraConfig;
use crate::services::email::EmailService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: NivaraConfig,
    pool: PgPool,
    mailer: EmailService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: NivaraConfig, pool: PgPool) -> Self {
        let mailer = EmailService::new(config.email.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                mailer,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &NivaraConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the transactional email service.
    #[must_use]
    pub fn mailer(&self) -> &EmailService {
        &self.inner.mailer
    }
}
