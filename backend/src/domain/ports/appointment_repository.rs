//! Driven port for appointment persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Appointment, AppointmentFilter, AppointmentId, NewAppointment};

use super::define_port_error;

define_port_error! {
    /// Errors raised by appointment repository adapters.
    pub enum AppointmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "appointment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "appointment repository query failed: {message}",
    }
}

/// Storage for booked appointments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Persist a new, unapproved appointment.
    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError>;

    /// Appointments matching `filter`, ordered by appointment date.
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// Move an appointment. Returns `false` when it does not exist.
    async fn reschedule(
        &self,
        id: AppointmentId,
        appointment_date: DateTime<Utc>,
    ) -> Result<bool, AppointmentRepositoryError>;

    /// Approve or reject an appointment. Returns `false` when it does not exist.
    async fn set_status(
        &self,
        id: AppointmentId,
        status: bool,
    ) -> Result<bool, AppointmentRepositoryError>;
}
