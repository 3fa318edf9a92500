//! Scan repository (read-only).

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use nivara_core::{DeviceId, ScanId, UserId};

use super::RepositoryError;
use crate::models::Scan;

#[derive(Debug, sqlx::FromRow)]
struct ScanRow {
    scan_id: ScanId,
    device_id: DeviceId,
    timestamp: DateTime<Utc>,
    condition_detected: Option<String>,
    confidence_score: Option<f64>,
    image_path: Option<String>,
}

impl From<ScanRow> for Scan {
    fn from(row: ScanRow) -> Self {
        Self {
            scan_id: row.scan_id,
            device_id: row.device_id,
            timestamp: row.timestamp,
            condition_detected: row.condition_detected,
            confidence_score: row.confidence_score,
            image_path: row.image_path,
        }
    }
}

/// Repository for scan history.
pub struct ScanRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScanRepository<'a> {
    /// Create a new scan repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recent scans across all of a user's devices.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Scan>, RepositoryError> {
        let rows = sqlx::query_as::<_, ScanRow>(
            r"
            SELECT s.scan_id, s.device_id, s.timestamp, s.condition_detected,
                   s.confidence_score, s.image_path
            FROM storefront.scans s
            JOIN storefront.devices d ON d.device_id = s.device_id
            WHERE d.user_id = $1
            ORDER BY s.timestamp DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Scan::from).collect())
    }
}
