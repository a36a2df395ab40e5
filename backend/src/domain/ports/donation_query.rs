//! Driving port for reading donation records.

use async_trait::async_trait;

use crate::domain::{BloodDonation, DonationFilter, Error};

/// Read model over recorded donations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationQuery: Send + Sync {
    /// Donations matching `filter`. An empty filter lists every donation.
    async fn list_donations(&self, filter: DonationFilter) -> Result<Vec<BloodDonation>, Error>;
}
