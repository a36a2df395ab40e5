//! Driving port for per-centre donation statistics.

use async_trait::async_trait;

use crate::domain::{CenterFilter, DonationCenterStats, Error};

/// Read model returning blood-group tallies per centre.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CenterStatsQuery: Send + Sync {
    /// Stats for every centre matching `filter`.
    async fn center_stats(&self, filter: CenterFilter) -> Result<Vec<DonationCenterStats>, Error>;
}
