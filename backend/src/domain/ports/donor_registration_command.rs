//! Driving port for donor onboarding.
//!
//! Inbound adapters translate requests into these calls and render the
//! resulting domain errors; they never touch the repositories directly.

use async_trait::async_trait;

use crate::domain::{
    DonorId, DonorPoints, DonorVerification, Error, NewDonor, NewUser, RegisteredDonor, User,
    UserLookup,
};

/// Use-cases around registering and verifying donors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonorRegistrationCommand: Send + Sync {
    /// Create a user, its donor profile, and the donor's points ledger.
    async fn register(&self, user: NewUser, donor: NewDonor) -> Result<RegisteredDonor, Error>;

    /// Conditionally mark a donor as verified.
    async fn verify_donor(&self, verification: DonorVerification) -> Result<bool, Error>;

    /// Add incentive points to a donor's ledger.
    async fn credit_points(&self, donor_id: DonorId, points: u32) -> Result<DonorPoints, Error>;

    /// Look a user up by id or contact.
    async fn find_user(&self, lookup: UserLookup) -> Result<User, Error>;
}
