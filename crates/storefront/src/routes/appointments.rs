//! Appointment booking handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use nivara_core::ServiceCenterId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::appointments::AppointmentService;
use crate::state::AppState;

/// Appointment booking request body.
#[derive(Debug, Deserialize)]
pub struct BookAppointmentPayload {
    pub service_center_id: ServiceCenterId,
    pub appointment_date: NaiveDate,
    /// Slot label from the center's template, e.g. "10:00 AM".
    pub appointment_time: String,
    pub notes: Option<String>,
}

/// Slot listing query parameters.
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// Requested date. The template is date-independent today; the
    /// parameter is accepted for forward compatibility and validation.
    pub date: Option<NaiveDate>,
}

/// Book a slot at a service center. Double bookings return 409.
pub async fn book_appointment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<BookAppointmentPayload>,
) -> Result<impl IntoResponse> {
    let appointments = AppointmentService::new(state.pool());
    let appointment = appointments
        .book(
            user.id,
            payload.service_center_id,
            payload.appointment_date,
            &payload.appointment_time,
            payload.notes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "appointment": appointment }))))
}

/// The signed-in user's appointments, soonest first.
pub async fn list_appointments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let appointments = AppointmentService::new(state.pool());
    let list = appointments.list_for_user(user.id).await?;

    Ok(Json(json!({ "appointments": list })))
}

/// The slot template for a center, grouped by period plus a flat union.
pub async fn center_slots(
    State(state): State<AppState>,
    Path(center_id): Path<ServiceCenterId>,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse> {
    let appointments = AppointmentService::new(state.pool());
    let slots = appointments.slots_for_center(center_id).await?;
    let all = slots.all();

    Ok(Json(json!({
        "date": query.date,
        "slots": slots,
        "all": all,
    })))
}
