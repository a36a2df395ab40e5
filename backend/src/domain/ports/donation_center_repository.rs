//! Driven port for reading donation centres.

use async_trait::async_trait;

use crate::domain::{CenterFilter, CenterId, DonationCenter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by donation centre repository adapters.
    pub enum DonationCenterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "centre repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "centre repository query failed: {message}",
    }
}

/// Read-only access to centre reference data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationCenterRepository: Send + Sync {
    /// Centres matching `filter`, in a stable storage order.
    async fn list_centers(
        &self,
        filter: &CenterFilter,
    ) -> Result<Vec<DonationCenter>, DonationCenterRepositoryError>;

    /// A single centre by id.
    async fn find_center(
        &self,
        id: CenterId,
    ) -> Result<Option<DonationCenter>, DonationCenterRepositoryError>;
}
