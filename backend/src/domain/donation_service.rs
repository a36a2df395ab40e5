//! Donation recording, transfusion, listing, and per-centre statistics.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    BloodDonationRepository, BloodDonationRepositoryError, CenterStatsQuery, DonationCenterRepository,
    DonationCenterRepositoryError, DonationCommand, DonationQuery,
};
use crate::domain::{
    BloodDonation, CenterFilter, DonationCenterStats, DonationFilter, DonationId, Error,
    LabResults, MISSING_CENTER_MESSAGE, NewBloodDonation, TransfusionError, compute_center_stats,
    extract_center_ids,
};

/// Service implementing [`DonationCommand`], [`DonationQuery`], and
/// [`CenterStatsQuery`].
#[derive(Clone)]
pub struct DonationService<C, D> {
    centers: Arc<C>,
    donations: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<C, D> DonationService<C, D> {
    /// Create a new service with the given repositories.
    pub fn new(centers: Arc<C>, donations: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            centers,
            donations,
            clock,
        }
    }
}

fn donation_not_found(id: DonationId) -> Error {
    Error::not_found("donation not found").with_details(json!({ "donationId": id.to_string() }))
}

fn not_transfusable(id: DonationId, reason: TransfusionError) -> Error {
    Error::unprocessable_entity(reason.to_string())
        .with_details(json!({ "donationId": id.to_string() }))
}

impl<C, D> DonationService<C, D>
where
    C: DonationCenterRepository,
    D: BloodDonationRepository,
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

    fn map_donation_error(error: BloodDonationRepositoryError) -> Error {
        match error {
            BloodDonationRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("donation repository unavailable: {message}"))
            }
            BloodDonationRepositoryError::Query { message } => {
                Error::internal(format!("donation repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<C, D> CenterStatsQuery for DonationService<C, D>
where
    C: DonationCenterRepository,
    D: BloodDonationRepository,
{
    async fn center_stats(&self, filter: CenterFilter) -> Result<Vec<DonationCenterStats>, Error> {
        let centers = self
            .centers
            .list_centers(&filter)
            .await
            .map_err(Self::map_center_error)?;
        if centers.is_empty() {
            return Ok(Vec::new());
        }

        let donations = self
            .donations
            .list_donations(&DonationFilter::for_centers(extract_center_ids(&centers)))
            .await
            .map_err(Self::map_donation_error)?;

        Ok(compute_center_stats(&donations, &centers))
    }
}

#[async_trait]
impl<C, D> DonationCommand for DonationService<C, D>
where
    C: DonationCenterRepository,
    D: BloodDonationRepository,
{
    async fn record_donation(&self, donation: NewBloodDonation) -> Result<BloodDonation, Error> {
        let center = self
            .centers
            .find_center(donation.center_id)
            .await
            .map_err(Self::map_center_error)?;
        if center.is_none() {
            return Err(Error::unprocessable_entity(MISSING_CENTER_MESSAGE)
                .with_details(json!({ "centerId": donation.center_id.to_string() })));
        }

        self.donations
            .record_donation(&donation)
            .await
            .map_err(Self::map_donation_error)
    }

    async fn update_results(&self, id: DonationId, results: LabResults) -> Result<(), Error> {
        let updated = self
            .donations
            .update_results(id, results)
            .await
            .map_err(Self::map_donation_error)?;
        if updated {
            Ok(())
        } else {
            Err(donation_not_found(id))
        }
    }

    async fn transfuse(&self, id: DonationId) -> Result<BloodDonation, Error> {
        let donation = self
            .donations
            .find_donation(id)
            .await
            .map_err(Self::map_donation_error)?
            .ok_or_else(|| donation_not_found(id))?;
        donation
            .check_transfusable()
            .map_err(|reason| not_transfusable(id, reason))?;

        let at = self.clock.utc();
        let marked = self
            .donations
            .mark_transfused(id, at)
            .await
            .map_err(Self::map_donation_error)?;
        if !marked {
            // Another request used the unit between the read and the update.
            return Err(not_transfusable(id, TransfusionError::AlreadyTransfused));
        }

        info!(donation_id = %id, "donation transfused");
        Ok(BloodDonation {
            transfused_at: Some(at),
            ..donation
        })
    }
}

#[async_trait]
impl<C, D> DonationQuery for DonationService<C, D>
where
    C: DonationCenterRepository,
    D: BloodDonationRepository,
{
    async fn list_donations(&self, filter: DonationFilter) -> Result<Vec<BloodDonation>, Error> {
        self.donations
            .list_donations(&filter)
            .await
            .map_err(Self::map_donation_error)
    }
}
