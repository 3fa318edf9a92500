//! Doctor directory domain types.

use serde::Serialize;

use nivara_core::DoctorId;

/// A dermatologist directory entry. Read-only in this system.
#[derive(Debug, Clone, Serialize)]
pub struct Doctor {
    pub doctor_id: DoctorId,
    pub name: String,
    pub specialization: Option<String>,
    pub hospital: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub location_lat: Option<f64>,
    pub location_long: Option<f64>,
    pub website: Option<String>,
}
