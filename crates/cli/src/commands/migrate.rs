//! Database migration command.
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded into
//! this binary at compile time, so the deployed CLI needs no source tree.

use super::{CommandError, connect};

/// Run pending database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
