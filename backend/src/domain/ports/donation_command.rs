//! Driving port for recording donations and their results.

use async_trait::async_trait;

use crate::domain::{BloodDonation, DonationId, Error, LabResults, NewBloodDonation};

/// Use-cases that write donation records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationCommand: Send + Sync {
    /// Record a donation at an existing centre.
    async fn record_donation(&self, donation: NewBloodDonation) -> Result<BloodDonation, Error>;

    /// Store lab results for an existing donation.
    async fn update_results(&self, id: DonationId, results: LabResults) -> Result<(), Error>;

    /// Use a screened donation for a transfusion.
    async fn transfuse(&self, id: DonationId) -> Result<BloodDonation, Error>;
}
