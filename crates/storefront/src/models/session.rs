//! Session state types.

use serde::{Deserialize, Serialize};

use nivara_core::UserId;

/// The authenticated user stored in the session cookie.
///
/// Kept deliberately small; everything else is re-fetched per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID.
    pub id: UserId,
    /// Email, for display and confirmation emails.
    pub email: String,
}

/// Session key constants.
pub mod session_keys {
    /// Key under which the [`super::CurrentUser`] is stored.
    pub const CURRENT_USER: &str = "current_user";
}
