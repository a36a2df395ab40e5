//! Driven port for blood donation records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BloodDonation, DonationFilter, DonationId, LabResults, NewBloodDonation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by blood donation repository adapters.
    pub enum BloodDonationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "donation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "donation repository query failed: {message}",
    }
}

/// Storage for donation events and their lab results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BloodDonationRepository: Send + Sync {
    /// Persist a donation without lab results.
    async fn record_donation(
        &self,
        donation: &NewBloodDonation,
    ) -> Result<BloodDonation, BloodDonationRepositoryError>;

    /// Store lab results. Returns `false` when the donation does not exist.
    async fn update_results(
        &self,
        id: DonationId,
        results: LabResults,
    ) -> Result<bool, BloodDonationRepositoryError>;

    /// Donations matching `filter`, oldest first.
    async fn list_donations(
        &self,
        filter: &DonationFilter,
    ) -> Result<Vec<BloodDonation>, BloodDonationRepositoryError>;

    /// Fetch one donation by id.
    async fn find_donation(
        &self,
        id: DonationId,
    ) -> Result<Option<BloodDonation>, BloodDonationRepositoryError>;

    /// Stamp `transfused_at` on a donation that has not been transfused.
    ///
    /// Returns `false` when the donation is missing or already stamped.
    async fn mark_transfused(
        &self,
        id: DonationId,
        at: DateTime<Utc>,
    ) -> Result<bool, BloodDonationRepositoryError>;
}
