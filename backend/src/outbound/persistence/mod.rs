//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain types;
//! no business rules live here. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module. Connections come
//! from a `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> Result<(), bloodbank::outbound::persistence::PoolError> {
//! use bloodbank::outbound::persistence::{DbPool, DieselRegistrationRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bloodbank")).await?;
//! let repo = DieselRegistrationRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_appointment_repository;
mod diesel_blood_donation_repository;
mod diesel_donation_center_repository;
mod diesel_error_mapping;
mod diesel_registration_repository;
mod models;
mod pool;
mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_blood_donation_repository::DieselBloodDonationRepository;
pub use diesel_donation_center_repository::DieselDonationCenterRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
