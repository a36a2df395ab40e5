//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities of the donation centre and the
//! services that implement the driving ports. Nothing in here knows about
//! HTTP or SQL; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Donor, DonorPoints: the registration aggregate.
//! - DonationCenter, BloodDonation, Appointment: centre activity.
//! - RegistrationService, DonationService, AppointmentService: use-cases.

pub mod appointment;
mod appointment_service;
pub mod blood_donation;
pub mod blood_group;
pub mod center_stats;
mod donation_service;
pub mod donation_center;
pub mod donor;
pub mod error;
pub mod ids;
pub mod ports;
mod registration_service;
pub mod trace_id;
pub mod user;

pub use self::appointment::{
    Appointment, AppointmentData, AppointmentFilter, MISSING_CENTER_MESSAGE, NewAppointment,
    attach_center_names,
};
pub use self::appointment_service::AppointmentService;
pub use self::blood_donation::{
    BloodDonation, DonationFilter, LabResults, NewBloodDonation, TransfusionError,
};
pub use self::blood_group::{BloodGroup, ParseBloodGroupError};
pub use self::center_stats::{BloodGroupTally, DonationCenterStats, compute_center_stats};
pub use self::donation_center::{CenterFilter, DonationCenter, extract_center_ids};
pub use self::donation_service::DonationService;
pub use self::donor::{
    Donor, DonorPoints, DonorValidationError, DonorVerification, Identification, NewDonor,
    RegisteredDonor,
};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{AppointmentId, CenterId, DonationId, DonorId, InvalidIdError, UserId};
pub use self::registration_service::RegistrationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Contact, NewUser, PasswordHash, User, UserLookup, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use bloodbank::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("no such donor"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
