//! Doctor and service center directory handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use nivara_core::ServiceCenterId;

use crate::db::doctors::DoctorRepository;
use crate::db::service_centers::ServiceCenterRepository;
use crate::error::{AppError, Result};
use crate::services::directory;
use crate::state::AppState;

/// Directory filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub location: String,
}

/// List doctors, optionally filtered by search text and location.
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Result<impl IntoResponse> {
    let doctors = DoctorRepository::new(state.pool()).list().await?;
    let doctors = directory::filter_doctors(doctors, &query.search, &query.location);

    Ok(Json(json!({ "doctors": doctors })))
}

/// List service centers, optionally filtered by search text and location.
pub async fn list_service_centers(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Result<impl IntoResponse> {
    let centers = ServiceCenterRepository::new(state.pool()).list().await?;
    let centers = directory::filter_centers(centers, &query.search, &query.location);

    Ok(Json(json!({ "service_centers": centers })))
}

/// A single service center with its full slot template.
pub async fn get_service_center(
    State(state): State<AppState>,
    Path(id): Path<ServiceCenterId>,
) -> Result<impl IntoResponse> {
    let center = ServiceCenterRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("service center".to_string()))?;

    Ok(Json(json!({ "service_center": center })))
}
