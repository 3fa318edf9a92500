//! Device registration and dashboard handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::devices::DeviceService;
use crate::state::AppState;

/// Device registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterDevicePayload {
    pub device_id: String,
}

/// Claim a device by the identifier printed on it.
pub async fn register_device(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<RegisterDevicePayload>,
) -> Result<impl IntoResponse> {
    let devices = DeviceService::new(state.pool());
    let device = devices.register(&payload.device_id, user.id).await?;

    Ok((StatusCode::CREATED, Json(json!({ "device": device }))))
}

/// The signed-in user's registered devices.
pub async fn list_devices(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let devices = DeviceService::new(state.pool());
    let list = devices.list_for_user(user.id).await?;

    Ok(Json(json!({ "devices": list })))
}

/// Recent scans across the user's devices, for the dashboard.
pub async fn recent_scans(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let devices = DeviceService::new(state.pool());
    let dashboard = devices.dashboard(user.id).await?;

    Ok(Json(json!({ "scans": dashboard.recent_scans })))
}
