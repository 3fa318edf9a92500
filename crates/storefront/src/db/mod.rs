//! Database operations for the storefront `PostgreSQL`.
//!
//! # Database: `nivara_storefront`
//!
//! ## Tables (schema `storefront`)
//!
//! - `users`, `user_password`, `password_reset_token` - Site authentication
//! - `tower_sessions` - Tower-sessions storage
//! - `profiles` - Contact and shipping details, one row per user
//! - `devices` - Device pool and ownership
//! - `orders` - Purchase records
//! - `scans` - Scan history uploaded by devices (read-only here)
//! - `doctors`, `service_centers` - Directory data
//! - `appointments` - Bookings, unique per (center, date, slot)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p nivara-cli -- migrate
//! ```

pub mod appointments;
pub mod devices;
pub mod doctors;
pub mod orders;
pub mod profiles;
pub mod scans;
pub mod service_centers;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use appointments::AppointmentRepository;
pub use devices::DeviceRepository;
pub use doctors::DoctorRepository;
pub use orders::OrderRepository;
pub use profiles::ProfileRepository;
pub use scans::ScanRepository;
pub use service_centers::ServiceCenterRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email or double-booked slot).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error to `Conflict` when it is a unique violation,
    /// keeping everything else as a plain database error.
    pub(crate) fn from_unique_violation(e: sqlx::Error, conflict_msg: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_msg.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
