//! Driving port for booking and managing appointments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AppointmentData, AppointmentId, Error, NewAppointment};

/// Use-cases that write appointments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentCommand: Send + Sync {
    /// Book an appointment at an existing centre.
    async fn book(&self, appointment: NewAppointment) -> Result<AppointmentData, Error>;

    /// Move an existing appointment to a new date.
    async fn reschedule(
        &self,
        id: AppointmentId,
        appointment_date: DateTime<Utc>,
    ) -> Result<(), Error>;

    /// Approve or reject an existing appointment.
    async fn set_status(&self, id: AppointmentId, status: bool) -> Result<(), Error>;
}
