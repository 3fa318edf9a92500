//! Device registration and dashboard data.

use sqlx::PgPool;
use thiserror::Error;

use nivara_core::{DeviceId, DeviceIdError, UserId};

use crate::db::RepositoryError;
use crate::db::devices::DeviceRepository;
use crate::db::scans::ScanRepository;
use crate::models::{Device, Scan};

/// How many recent scans the dashboard shows.
const RECENT_SCAN_LIMIT: i64 = 5;

/// Errors that can occur during device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The submitted device ID is not a valid identifier.
    #[error("invalid device ID: {0}")]
    InvalidId(#[from] DeviceIdError),

    /// No device with this ID exists in the pool.
    #[error("device not found, check the ID printed on your device")]
    NotFound,

    /// The device is already registered to this account.
    #[error("this device is already registered to your account")]
    AlreadyYours,

    /// The device belongs to a different account.
    #[error("this device is already registered to another account")]
    AlreadyRegistered,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Data backing the account dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub devices: Vec<Device>,
    /// Most recent scans across all the user's devices.
    pub recent_scans: Vec<Scan>,
}

/// Device registration service.
pub struct DeviceService<'a> {
    devices: DeviceRepository<'a>,
    scans: ScanRepository<'a>,
}

impl<'a> DeviceService<'a> {
    /// Create a new device service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            devices: DeviceRepository::new(pool),
            scans: ScanRepository::new(pool),
        }
    }

    /// Register a device to an account by its printed identifier.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::InvalidId` if the identifier fails validation.
    /// Returns `DeviceError::NotFound` if no such device exists.
    /// Returns `DeviceError::AlreadyYours` or `DeviceError::AlreadyRegistered`
    /// if the device is already owned.
    pub async fn register(&self, raw_id: &str, user_id: UserId) -> Result<Device, DeviceError> {
        let device_id = DeviceId::parse(raw_id)?;

        let device = self
            .devices
            .get_by_id(&device_id)
            .await?
            .ok_or(DeviceError::NotFound)?;

        match device.user_id {
            Some(owner) if owner == user_id => return Err(DeviceError::AlreadyYours),
            Some(_) => return Err(DeviceError::AlreadyRegistered),
            None => {}
        }

        // The claim re-checks ownership; a concurrent claim since the lookup
        // surfaces as NotFound and is reported as already registered.
        let device = self
            .devices
            .claim(&device_id, user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => DeviceError::AlreadyRegistered,
                other => DeviceError::Repository(other),
            })?;

        tracing::info!(device_id = %device.device_id, user_id = %user_id, "Device registered");
        Ok(device)
    }

    /// List the devices registered to an account.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Repository` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Device>, DeviceError> {
        Ok(self.devices.list_for_user(user_id).await?)
    }

    /// Assemble the dashboard: registered devices plus recent scan history.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Repository` if a query fails.
    pub async fn dashboard(&self, user_id: UserId) -> Result<Dashboard, DeviceError> {
        let devices = self.devices.list_for_user(user_id).await?;
        let recent_scans = self
            .scans
            .recent_for_user(user_id, RECENT_SCAN_LIMIT)
            .await?;

        Ok(Dashboard {
            devices,
            recent_scans,
        })
    }
}
