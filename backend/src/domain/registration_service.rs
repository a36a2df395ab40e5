//! Donor registration domain service.
//!
//! Implements [`DonorRegistrationCommand`] on top of a
//! [`RegistrationRepository`]. Registration itself is atomic inside the
//! adapter; seeding the points ledger runs afterwards as a retryable upsert.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    DonorRegistrationCommand, RegistrationRepository, RegistrationRepositoryError,
};
use crate::domain::{
    DonorId, DonorPoints, DonorVerification, Error, NewDonor, NewUser, RegisteredDonor, User,
    UserLookup,
};

/// Message returned when a contact or identification is already registered.
const CONFLICT_MESSAGE: &str = "conflicting registration details";

/// Registration service implementing the donor onboarding driving port.
#[derive(Clone)]
pub struct RegistrationService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RegistrationService<R> {
    /// Create a new service backed by `repo`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> RegistrationService<R>
where
    R: RegistrationRepository,
{
    fn map_registration_error(error: RegistrationRepositoryError) -> Error {
        match error {
            RegistrationRepositoryError::Conflict { .. } => {
                Error::unprocessable_entity(CONFLICT_MESSAGE)
            }
            RegistrationRepositoryError::Connection { message }
            | RegistrationRepositoryError::Query { message } => {
                Error::unprocessable_entity(format!("registration failed: {message}"))
            }
        }
    }

    fn map_repository_error(error: RegistrationRepositoryError) -> Error {
        match error {
            RegistrationRepositoryError::Connection { message } => Error::service_unavailable(
                format!("registration repository unavailable: {message}"),
            ),
            RegistrationRepositoryError::Query { message }
            | RegistrationRepositoryError::Conflict { message } => {
                Error::internal(format!("registration repository error: {message}"))
            }
        }
    }

    /// Create the ledger for `donor_id` at zero points unless one exists.
    ///
    /// Safe to call repeatedly; an existing balance is never reset.
    pub async fn ensure_points_ledger(&self, donor_id: DonorId) -> Result<(), Error> {
        self.repo
            .ensure_points_ledger(donor_id, self.clock.utc())
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> DonorRegistrationCommand for RegistrationService<R>
where
    R: RegistrationRepository,
{
    async fn register(&self, user: NewUser, donor: NewDonor) -> Result<RegisteredDonor, Error> {
        let registered = self
            .repo
            .create_user_with_donor(&user, &donor)
            .await
            .map_err(Self::map_registration_error)?;

        if let Err(error) = self.ensure_points_ledger(registered.donor_id).await {
            warn!(
                donor_id = %registered.donor_id,
                error = %error,
                "points ledger seeding failed; registration kept"
            );
        }

        info!(
            user_id = %registered.user_id,
            donor_id = %registered.donor_id,
            "registered donor"
        );
        Ok(registered)
    }

    async fn verify_donor(&self, verification: DonorVerification) -> Result<bool, Error> {
        // Only unverified donors match, so a `false` request can never change a row.
        if !verification.verification {
            return Ok(false);
        }
        self.repo
            .verify_donor(&verification)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn credit_points(&self, donor_id: DonorId, points: u32) -> Result<DonorPoints, Error> {
        let credited = self
            .repo
            .credit_points(donor_id, points, self.clock.utc())
            .await
            .map_err(Self::map_repository_error)?;
        if !credited {
            return Err(Error::not_found("donor has no points ledger")
                .with_details(json!({ "donorId": donor_id.to_string() })));
        }

        self.repo
            .find_points(donor_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::internal("points ledger disappeared after credit"))
    }

    async fn find_user(&self, lookup: UserLookup) -> Result<User, Error> {
        self.repo
            .find_user(&lookup)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}
