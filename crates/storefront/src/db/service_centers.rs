//! Service center repository (read-only).

use sqlx::PgPool;
use sqlx::types::Json;

use nivara_core::ServiceCenterId;

use super::RepositoryError;
use crate::models::{AppointmentSlots, ServiceCenter};

#[derive(Debug, sqlx::FromRow)]
struct ServiceCenterRow {
    id: ServiceCenterId,
    name: String,
    address: Option<String>,
    city: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    location_lat: Option<f64>,
    location_long: Option<f64>,
    services: Vec<String>,
    operating_hours: Option<Json<serde_json::Value>>,
    appointment_slots: Option<Json<AppointmentSlots>>,
}

impl From<ServiceCenterRow> for ServiceCenter {
    fn from(row: ServiceCenterRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            phone: row.phone,
            email: row.email,
            location_lat: row.location_lat,
            location_long: row.location_long,
            services: row.services,
            operating_hours: row.operating_hours.map(|j| j.0),
            // A center without a slot template simply offers no slots.
            appointment_slots: row.appointment_slots.map(|j| j.0).unwrap_or_default(),
        }
    }
}

/// Repository for service centers.
pub struct ServiceCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ServiceCenterRepository<'a> {
    /// Create a new service center repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all service centers, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ServiceCenter>, RepositoryError> {
        let rows = sqlx::query_as::<_, ServiceCenterRow>(
            r"
            SELECT id, name, address, city, phone, email, location_lat, location_long,
                   services, operating_hours, appointment_slots
            FROM storefront.service_centers
            ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ServiceCenter::from).collect())
    }

    /// Get a single service center by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: ServiceCenterId,
    ) -> Result<Option<ServiceCenter>, RepositoryError> {
        let row = sqlx::query_as::<_, ServiceCenterRow>(
            r"
            SELECT id, name, address, city, phone, email, location_lat, location_long,
                   services, operating_hours, appointment_slots
            FROM storefront.service_centers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ServiceCenter::from))
    }
}
