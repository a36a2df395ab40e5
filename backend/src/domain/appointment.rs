//! Appointments and their centre-name denormalisation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use super::{AppointmentId, CenterId, DonationCenter, Error, UserId};

/// Message raised when an appointment names a centre that does not exist.
pub const MISSING_CENTER_MESSAGE: &str = "Could not find matching center";

/// A booked donation slot at a centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub center_id: CenterId,
    pub user_id: UserId,
    pub appointment_date: DateTime<Utc>,
    /// `true` once the centre has approved the booking.
    pub status: bool,
}

/// Input for booking an appointment. New bookings start unapproved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub center_id: CenterId,
    pub user_id: UserId,
    pub appointment_date: DateTime<Utc>,
}

/// Appointment enriched with the name of its centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentData {
    #[schema(value_type = String, format = Uuid)]
    pub id: AppointmentId,
    pub center_name: String,
    #[schema(value_type = String, format = Uuid)]
    pub center_id: CenterId,
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
    pub appointment_date: DateTime<Utc>,
    pub status: bool,
}

impl AppointmentData {
    fn from_parts(appointment: &Appointment, center_name: &str) -> Self {
        Self {
            id: appointment.id,
            center_name: center_name.to_owned(),
            center_id: appointment.center_id,
            user_id: appointment.user_id,
            appointment_date: appointment.appointment_date,
            status: appointment.status,
        }
    }
}

/// Criteria for listing appointments. At least one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub appointment_id: Option<AppointmentId>,
    pub center_id: Option<CenterId>,
    pub user_id: Option<UserId>,
    pub status: Option<bool>,
}

impl AppointmentFilter {
    /// Whether no criterion is populated.
    pub fn is_empty(&self) -> bool {
        self.appointment_id.is_none()
            && self.center_id.is_none()
            && self.user_id.is_none()
            && self.status.is_none()
    }

    /// Whether `appointment` satisfies every populated criterion.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.appointment_id.is_none_or(|id| id == appointment.id)
            && self.center_id.is_none_or(|id| id == appointment.center_id)
            && self.user_id.is_none_or(|id| id == appointment.user_id)
            && self.status.is_none_or(|status| status == appointment.status)
    }
}

/// Attach the centre name to every appointment, preserving order.
///
/// Fails with [`ErrorCode::UnprocessableEntity`](super::ErrorCode) as soon as
/// an appointment references a centre absent from `centers`; no partial
/// output is returned.
///
/// # Examples
/// ```
/// use bloodbank::domain::{attach_center_names, CenterId, DonationCenter};
///
/// let centre = DonationCenter {
///     id: CenterId::random(),
///     center_name: "Central".into(),
///     location: "Gaborone".into(),
/// };
/// let enriched = attach_center_names(&[centre], &[]).expect("no appointments");
/// assert!(enriched.is_empty());
/// ```
pub fn attach_center_names(
    centers: &[DonationCenter],
    appointments: &[Appointment],
) -> Result<Vec<AppointmentData>, Error> {
    appointments
        .iter()
        .map(|appointment| {
            centers
                .iter()
                .find(|center| center.id == appointment.center_id)
                .map(|center| AppointmentData::from_parts(appointment, &center.center_name))
                .ok_or_else(|| missing_center_error(appointment))
        })
        .collect()
}

fn missing_center_error(appointment: &Appointment) -> Error {
    Error::unprocessable_entity(MISSING_CENTER_MESSAGE).with_details(json!({
        "appointmentId": appointment.id.to_string(),
        "centerId": appointment.center_id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn central() -> DonationCenter {
        DonationCenter {
            id: CenterId::random(),
            center_name: "Central".to_owned(),
            location: "Gaborone".to_owned(),
        }
    }

    fn appointment(center_id: CenterId, day: u32) -> Appointment {
        Appointment {
            id: AppointmentId::random(),
            center_id,
            user_id: UserId::random(),
            appointment_date: Utc
                .with_ymd_and_hms(2026, 3, day, 9, 30, 0)
                .single()
                .expect("valid date"),
            status: false,
        }
    }

    #[rstest]
    fn attaches_names_and_keeps_fields(central: DonationCenter) {
        let first = appointment(central.id, 1);
        let second = appointment(central.id, 2);

        let enriched = attach_center_names(
            std::slice::from_ref(&central),
            &[first.clone(), second.clone()],
        )
        .expect("all centres resolve");

        assert_eq!(enriched.len(), 2);
        for (data, original) in enriched.iter().zip([&first, &second]) {
            assert_eq!(data.center_name, "Central");
            assert_eq!(data.id, original.id);
            assert_eq!(data.center_id, original.center_id);
            assert_eq!(data.user_id, original.user_id);
            assert_eq!(data.appointment_date, original.appointment_date);
            assert_eq!(data.status, original.status);
        }
    }

    #[rstest]
    fn dangling_centre_fails_the_whole_batch(central: DonationCenter) {
        let resolvable = appointment(central.id, 1);
        let dangling = appointment(CenterId::random(), 2);

        let err = attach_center_names(std::slice::from_ref(&central), &[resolvable, dangling.clone()])
            .expect_err("missing centre must fail");

        assert_eq!(err.code(), ErrorCode::UnprocessableEntity);
        assert_eq!(err.message(), MISSING_CENTER_MESSAGE);
        let details = err.details().expect("details present");
        assert_eq!(details["centerId"], dangling.center_id.to_string());
    }

    #[rstest]
    fn empty_filter_is_detected() {
        assert!(AppointmentFilter::default().is_empty());
        let filter = AppointmentFilter {
            status: Some(false),
            ..AppointmentFilter::default()
        };
        assert!(!filter.is_empty());
    }

    #[rstest]
    fn filter_matches_on_every_populated_field(central: DonationCenter) {
        let booked = appointment(central.id, 3);
        let filter = AppointmentFilter {
            center_id: Some(central.id),
            status: Some(true),
            ..AppointmentFilter::default()
        };
        assert!(!filter.matches(&booked));
    }
}
