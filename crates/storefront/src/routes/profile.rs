//! Profile handlers.

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::db::profiles::ProfileRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// The signed-in user's profile. Null until something (sign-up, checkout)
/// has written one.
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let profiles = ProfileRepository::new(state.pool());
    let profile = profiles.get_by_user(user.id).await?;

    Ok(Json(json!({ "profile": profile })))
}
