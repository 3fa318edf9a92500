//! Device domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nivara_core::{DeviceId, DeviceStatus, UserId};

/// A physical Nivara unit.
///
/// Devices enter the pool unowned (`user_id` null, `Inactive`); claiming one
/// sets the owner, flips the status to `Active`, and stamps the
/// registration date.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub device_id: DeviceId,
    pub user_id: Option<UserId>,
    pub status: DeviceStatus,
    pub registration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Device {
    /// Whether this device has already been claimed by an account.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.user_id.is_some()
    }
}
