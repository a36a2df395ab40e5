//! Driven port for user, donor, and points-ledger persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Donor, DonorId, DonorPoints, DonorVerification, Identification, NewDonor, NewUser,
    RegisteredDonor, User, UserLookup,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by registration repository adapters.
    pub enum RegistrationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "registration repository connection failed: {message}",
        /// A natural key (contact or identification) is already taken.
        Conflict { message: String } => "registration conflicts with existing record: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "registration repository query failed: {message}",
    }
}

/// Port for the registration aggregate: user, donor, and points ledger.
///
/// Implementations must:
/// - write the user and donor rows in one transaction and roll both back if
///   either insert fails;
/// - seed the points ledger with insert-if-absent semantics so repeated or
///   concurrent calls never reset an existing balance;
/// - release every transaction context they open before returning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Atomically create a user and its donor profile.
    async fn create_user_with_donor(
        &self,
        user: &NewUser,
        donor: &NewDonor,
    ) -> Result<RegisteredDonor, RegistrationRepositoryError>;

    /// Create the donor's ledger row at zero points unless one exists.
    async fn ensure_points_ledger(
        &self,
        donor_id: DonorId,
        now: DateTime<Utc>,
    ) -> Result<(), RegistrationRepositoryError>;

    /// Add `points` to an existing ledger. Returns `false` when the donor has
    /// no ledger row.
    async fn credit_points(
        &self,
        donor_id: DonorId,
        points: u32,
        now: DateTime<Utc>,
    ) -> Result<bool, RegistrationRepositoryError>;

    /// Fetch the ledger row for a donor.
    async fn find_points(
        &self,
        donor_id: DonorId,
    ) -> Result<Option<DonorPoints>, RegistrationRepositoryError>;

    /// Set `validation_status` on the donor matching `identification` whose
    /// status is still `false`. Returns whether a row changed.
    async fn verify_donor(
        &self,
        verification: &DonorVerification,
    ) -> Result<bool, RegistrationRepositoryError>;

    /// Fetch the donor profile holding `identification`.
    async fn find_donor(
        &self,
        identification: &Identification,
    ) -> Result<Option<Donor>, RegistrationRepositoryError>;

    /// Fetch a user without its password hash.
    async fn find_user(
        &self,
        lookup: &UserLookup,
    ) -> Result<Option<User>, RegistrationRepositoryError>;
}
