//! Driving port for listing appointments with their centre names.

use async_trait::async_trait;

use crate::domain::{AppointmentData, AppointmentFilter, Error};

/// Read model for appointments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentQuery: Send + Sync {
    /// Appointments matching `filter`, each carrying its centre name.
    async fn list_appointments(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<AppointmentData>, Error>;
}
