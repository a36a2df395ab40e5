//! Appointment booking and listing.
//!
//! Appointments reference centres by id only, so every read joins them back
//! to centre names in memory via [`attach_center_names`]. A dangling centre
//! reference is an error here, unlike in the statistics read model.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::ports::{
    AppointmentCommand, AppointmentQuery, AppointmentRepository, AppointmentRepositoryError,
    DonationCenterRepository, DonationCenterRepositoryError,
};
use crate::domain::{
    AppointmentData, AppointmentFilter, AppointmentId, CenterFilter, Error,
    MISSING_CENTER_MESSAGE, NewAppointment, attach_center_names,
};

/// Service implementing [`AppointmentCommand`] and [`AppointmentQuery`].
#[derive(Clone)]
pub struct AppointmentService<C, A> {
    centers: Arc<C>,
    appointments: Arc<A>,
}

impl<C, A> AppointmentService<C, A> {
    /// Create a new service with the given repositories.
    pub fn new(centers: Arc<C>, appointments: Arc<A>) -> Self {
        Self {
            centers,
            appointments,
        }
    }
}

impl<C, A> AppointmentService<C, A>
where
    C: DonationCenterRepository,
    A: AppointmentRepository,
{
    fn map_center_error(error: DonationCenterRepositoryError) -> Error {
        match error {
            DonationCenterRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("centre repository unavailable: {message}"))
            }
            DonationCenterRepositoryError::Query { message } => {
                Error::internal(format!("centre repository error: {message}"))
            }
        }
    }

    fn map_appointment_error(error: AppointmentRepositoryError) -> Error {
        match error {
            AppointmentRepositoryError::Connection { message } => Error::service_unavailable(
                format!("appointment repository unavailable: {message}"),
            ),
            AppointmentRepositoryError::Query { message } => {
                Error::internal(format!("appointment repository error: {message}"))
            }
        }
    }

    fn not_found(id: AppointmentId) -> Error {
        Error::not_found("appointment not found")
            .with_details(json!({ "appointmentId": id.to_string() }))
    }
}

#[async_trait]
impl<C, A> AppointmentCommand for AppointmentService<C, A>
where
    C: DonationCenterRepository,
    A: AppointmentRepository,
{
    async fn book(&self, appointment: NewAppointment) -> Result<AppointmentData, Error> {
        let Some(center) = self
            .centers
            .find_center(appointment.center_id)
            .await
            .map_err(Self::map_center_error)?
        else {
            return Err(Error::unprocessable_entity(MISSING_CENTER_MESSAGE)
                .with_details(json!({ "centerId": appointment.center_id.to_string() })));
        };

        let created = self
            .appointments
            .create_appointment(&appointment)
            .await
            .map_err(Self::map_appointment_error)?;

        let mut enriched = attach_center_names(&[center], &[created])?;
        enriched
            .pop()
            .ok_or_else(|| Error::internal("booked appointment was not enriched"))
    }

    async fn reschedule(
        &self,
        id: AppointmentId,
        appointment_date: DateTime<Utc>,
    ) -> Result<(), Error> {
        let updated = self
            .appointments
            .reschedule(id, appointment_date)
            .await
            .map_err(Self::map_appointment_error)?;
        if updated { Ok(()) } else { Err(Self::not_found(id)) }
    }

    async fn set_status(&self, id: AppointmentId, status: bool) -> Result<(), Error> {
        let updated = self
            .appointments
            .set_status(id, status)
            .await
            .map_err(Self::map_appointment_error)?;
        if updated { Ok(()) } else { Err(Self::not_found(id)) }
    }
}

#[async_trait]
impl<C, A> AppointmentQuery for AppointmentService<C, A>
where
    C: DonationCenterRepository,
    A: AppointmentRepository,
{
    async fn list_appointments(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<AppointmentData>, Error> {
        if filter.is_empty() {
            return Err(Error::invalid_request(
                "at least one of appointmentId, centerId, userId or status is required",
            ));
        }

        let appointments = self
            .appointments
            .list_appointments(&filter)
            .await
            .map_err(Self::map_appointment_error)?;
        if appointments.is_empty() {
            return Ok(Vec::new());
        }

        let centers = self
            .centers
            .list_centers(&CenterFilter::default())
            .await
            .map_err(Self::map_center_error)?;

        attach_center_names(&centers, &appointments)
    }
}
