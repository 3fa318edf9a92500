//! Appointment repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use nivara_core::{AppointmentId, AppointmentStatus, ServiceCenterId, UserId};

use super::RepositoryError;
use crate::models::{Appointment, NewAppointment};

#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: AppointmentId,
    user_id: UserId,
    service_center_id: ServiceCenterId,
    appointment_date: NaiveDate,
    appointment_time: String,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = RepositoryError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let status: AppointmentStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            service_center_id: row.service_center_id,
            appointment_date: row.appointment_date,
            appointment_time: row.appointment_time,
            notes: row.notes,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for appointment bookings.
pub struct AppointmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AppointmentRepository<'a> {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an appointment.
    ///
    /// A second booking for the same (center, date, slot) trips the unique
    /// constraint and comes back as `RepositoryError::Conflict`; the caller
    /// maps that to a "time slot unavailable" message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slot is already booked.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, RepositoryError> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            r"
            INSERT INTO storefront.appointments
                (user_id, service_center_id, appointment_date, appointment_time, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, service_center_id, appointment_date, appointment_time,
                      notes, status, created_at, updated_at
            ",
        )
        .bind(appointment.user_id)
        .bind(appointment.service_center_id)
        .bind(appointment.appointment_date)
        .bind(&appointment.appointment_time)
        .bind(appointment.notes.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "time slot already booked"))?;

        Appointment::try_from(row)
    }

    /// List a user's appointments, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            r"
            SELECT id, user_id, service_center_id, appointment_date, appointment_time,
                   notes, status, created_at, updated_at
            FROM storefront.appointments
            WHERE user_id = $1
            ORDER BY appointment_date ASC, appointment_time ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Appointment::try_from).collect()
    }
}
