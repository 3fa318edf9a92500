//! Device repository.
//!
//! Devices are pre-provisioned rows keyed by the identifier printed on the
//! hardware. Claiming one sets the owner, status, and registration date.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use nivara_core::{DeviceId, DeviceStatus, UserId};

use super::RepositoryError;
use crate::models::Device;

#[derive(Debug, sqlx::FromRow)]
struct DeviceRow {
    device_id: DeviceId,
    user_id: Option<UserId>,
    status: String,
    registration_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<DeviceRow> for Device {
    type Error = RepositoryError;

    fn try_from(row: DeviceRow) -> Result<Self, Self::Error> {
        let status: DeviceStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            device_id: row.device_id,
            user_id: row.user_id,
            status,
            registration_date: row.registration_date,
            created_at: row.created_at,
        })
    }
}

/// Repository for device database operations.
pub struct DeviceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DeviceRepository<'a> {
    /// Create a new device repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a device by its printed identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, device_id: &DeviceId) -> Result<Option<Device>, RepositoryError> {
        let row = sqlx::query_as::<_, DeviceRow>(
            r"
            SELECT device_id, user_id, status, registration_date, created_at
            FROM storefront.devices
            WHERE device_id = $1
            ",
        )
        .bind(device_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Device::try_from).transpose()
    }

    /// List a user's devices, oldest registration first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Device>, RepositoryError> {
        let rows = sqlx::query_as::<_, DeviceRow>(
            r"
            SELECT device_id, user_id, status, registration_date, created_at
            FROM storefront.devices
            WHERE user_id = $1
            ORDER BY registration_date ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Device::try_from).collect()
    }

    /// Find up to `limit` unowned device IDs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_unassigned(&self, limit: i64) -> Result<Vec<DeviceId>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct IdRow {
            device_id: DeviceId,
        }

        let rows = sqlx::query_as::<_, IdRow>(
            r"
            SELECT device_id
            FROM storefront.devices
            WHERE user_id IS NULL
            ORDER BY created_at ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.device_id).collect())
    }

    /// Assign a batch of devices to a user, activating them and stamping
    /// the registration date.
    ///
    /// The `user_id IS NULL` guard means devices claimed between the lookup
    /// and this update are simply skipped; the returned count is what was
    /// actually assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn assign_many(
        &self,
        device_ids: &[DeviceId],
        user_id: UserId,
    ) -> Result<u64, RepositoryError> {
        if device_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = device_ids.iter().map(|d| d.as_str().to_owned()).collect();

        let result = sqlx::query(
            r"
            UPDATE storefront.devices
            SET user_id = $1, status = 'active', registration_date = now()
            WHERE device_id = ANY($2) AND user_id IS NULL
            ",
        )
        .bind(user_id)
        .bind(&ids)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Claim a single device for a user (manual registration path).
    ///
    /// Guarded with `user_id IS NULL`, so a device claimed concurrently
    /// since the caller's ownership check comes back as `NotFound` rather
    /// than silently overwriting the other owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the device does not exist or
    /// is no longer unowned.
    pub async fn claim(
        &self,
        device_id: &DeviceId,
        user_id: UserId,
    ) -> Result<Device, RepositoryError> {
        let row = sqlx::query_as::<_, DeviceRow>(
            r"
            UPDATE storefront.devices
            SET user_id = $1, status = 'active', registration_date = now()
            WHERE device_id = $2 AND user_id IS NULL
            RETURNING device_id, user_id, status, registration_date, created_at
            ",
        )
        .bind(user_id)
        .bind(device_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Device::try_from(row)
    }
}
