//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters;
//! driving ports (`*Command`, `*Query`) are implemented by domain services
//! and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod appointment_command;
mod appointment_query;
mod appointment_repository;
mod blood_donation_repository;
mod center_stats_query;
mod donation_center_repository;
mod donation_command;
mod donation_query;
mod donor_registration_command;
mod registration_repository;

#[cfg(test)]
pub use appointment_command::MockAppointmentCommand;
pub use appointment_command::AppointmentCommand;
#[cfg(test)]
pub use appointment_query::MockAppointmentQuery;
pub use appointment_query::AppointmentQuery;
#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{AppointmentRepository, AppointmentRepositoryError};
#[cfg(test)]
pub use blood_donation_repository::MockBloodDonationRepository;
pub use blood_donation_repository::{BloodDonationRepository, BloodDonationRepositoryError};
#[cfg(test)]
pub use center_stats_query::MockCenterStatsQuery;
pub use center_stats_query::CenterStatsQuery;
#[cfg(test)]
pub use donation_center_repository::MockDonationCenterRepository;
pub use donation_center_repository::{DonationCenterRepository, DonationCenterRepositoryError};
#[cfg(test)]
pub use donation_command::MockDonationCommand;
pub use donation_command::DonationCommand;
#[cfg(test)]
pub use donation_query::MockDonationQuery;
pub use donation_query::DonationQuery;
#[cfg(test)]
pub use donor_registration_command::MockDonorRegistrationCommand;
pub use donor_registration_command::DonorRegistrationCommand;
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{RegistrationRepository, RegistrationRepositoryError};
