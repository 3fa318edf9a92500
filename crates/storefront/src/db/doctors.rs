//! Doctor directory repository (read-only).

use sqlx::PgPool;

use nivara_core::DoctorId;

use super::RepositoryError;
use crate::models::Doctor;

#[derive(Debug, sqlx::FromRow)]
struct DoctorRow {
    doctor_id: DoctorId,
    name: String,
    specialization: Option<String>,
    hospital: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    location_lat: Option<f64>,
    location_long: Option<f64>,
    website: Option<String>,
}

impl From<DoctorRow> for Doctor {
    fn from(row: DoctorRow) -> Self {
        Self {
            doctor_id: row.doctor_id,
            name: row.name,
            specialization: row.specialization,
            hospital: row.hospital,
            address: row.address,
            phone: row.phone,
            location_lat: row.location_lat,
            location_long: row.location_long,
            website: row.website,
        }
    }
}

/// Repository for the doctor directory.
pub struct DoctorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DoctorRepository<'a> {
    /// Create a new doctor repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all doctors, ordered by name. Search filtering happens in the
    /// application layer, matching the original behavior.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Doctor>, RepositoryError> {
        let rows = sqlx::query_as::<_, DoctorRow>(
            r"
            SELECT doctor_id, name, specialization, hospital, address, phone,
                   location_lat, location_long, website
            FROM storefront.doctors
            ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Doctor::from).collect())
    }
}
