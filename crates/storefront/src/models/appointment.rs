//! Appointment domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use nivara_core::{AppointmentId, AppointmentStatus, ServiceCenterId, UserId};

/// A booked appointment at a service center.
///
/// At most one appointment exists per (center, date, time slot); the
/// database enforces this with a unique constraint.
#[derive(Debug, Clone, Serialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub user_id: UserId,
    pub service_center_id: ServiceCenterId,
    pub appointment_date: NaiveDate,
    /// Slot label as shown in the center's template, e.g. "10:00 AM".
    pub appointment_time: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for booking an appointment.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub user_id: UserId,
    pub service_center_id: ServiceCenterId,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub notes: Option<String>,
}
