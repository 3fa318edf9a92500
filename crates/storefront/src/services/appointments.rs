//! Appointment booking at service centers.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use thiserror::Error;

use nivara_core::{ServiceCenterId, UserId};

use crate::db::RepositoryError;
use crate::db::appointments::AppointmentRepository;
use crate::db::service_centers::ServiceCenterRepository;
use crate::models::{Appointment, AppointmentSlots, NewAppointment};

/// Errors that can occur when booking an appointment.
#[derive(Debug, Error)]
pub enum AppointmentError {
    /// No such service center.
    #[error("service center not found")]
    CenterNotFound,

    /// The requested date is in the past.
    #[error("appointment date cannot be in the past")]
    DateInPast,

    /// The slot label is not offered by this center.
    #[error("this center does not offer the selected time slot")]
    UnknownSlot,

    /// Someone already holds this slot.
    #[error("time slot unavailable, please choose another")]
    SlotTaken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Appointment booking service.
pub struct AppointmentService<'a> {
    appointments: AppointmentRepository<'a>,
    centers: ServiceCenterRepository<'a>,
}

impl<'a> AppointmentService<'a> {
    /// Create a new appointment service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            appointments: AppointmentRepository::new(pool),
            centers: ServiceCenterRepository::new(pool),
        }
    }

    /// Book a slot at a service center.
    ///
    /// The slot label must come from the center's template. Double bookings
    /// are caught by the database's unique constraint rather than a
    /// read-then-write check, so two simultaneous requests for the last
    /// slot resolve cleanly: one wins, one gets `SlotTaken`.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::CenterNotFound` for an unknown center.
    /// Returns `AppointmentError::DateInPast` for dates before today.
    /// Returns `AppointmentError::UnknownSlot` for labels outside the template.
    /// Returns `AppointmentError::SlotTaken` if the slot is already booked.
    pub async fn book(
        &self,
        user_id: UserId,
        center_id: ServiceCenterId,
        date: NaiveDate,
        slot: &str,
        notes: Option<String>,
    ) -> Result<Appointment, AppointmentError> {
        if date < Utc::now().date_naive() {
            return Err(AppointmentError::DateInPast);
        }

        let center = self
            .centers
            .get_by_id(center_id)
            .await?
            .ok_or(AppointmentError::CenterNotFound)?;

        if !center.appointment_slots.all().iter().any(|s| s == slot) {
            return Err(AppointmentError::UnknownSlot);
        }

        let appointment = self
            .appointments
            .create(&NewAppointment {
                user_id,
                service_center_id: center_id,
                appointment_date: date,
                appointment_time: slot.to_owned(),
                notes,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AppointmentError::SlotTaken,
                other => AppointmentError::Repository(other),
            })?;

        tracing::info!(
            appointment_id = %appointment.id,
            center_id = %center_id,
            date = %date,
            "Appointment booked"
        );
        Ok(appointment)
    }

    /// The slot template for a center, for rendering the booking form.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::CenterNotFound` for an unknown center.
    pub async fn slots_for_center(
        &self,
        center_id: ServiceCenterId,
    ) -> Result<AppointmentSlots, AppointmentError> {
        let center = self
            .centers
            .get_by_id(center_id)
            .await?
            .ok_or(AppointmentError::CenterNotFound)?;

        Ok(center.appointment_slots)
    }

    /// List a user's appointments, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `AppointmentError::Repository` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.appointments.list_for_user(user_id).await?)
    }
}
