//! Profile domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nivara_core::{ProfileId, UserId};

/// Contact and shipping details for an account, one row per user.
///
/// Every field except the owning user is optional; the profile fills in
/// over time (sign-up contributes the name, checkout contributes the rest).
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update applied via upsert.
///
/// `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
}
