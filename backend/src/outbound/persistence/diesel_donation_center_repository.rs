//! PostgreSQL-backed `DonationCenterRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DonationCenterRepository, DonationCenterRepositoryError};
use crate::domain::{CenterFilter, CenterId, DonationCenter};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::DonationCenterRow;
use super::pool::{DbPool, PoolError};
use super::schema::donation_centers;

/// Diesel-backed implementation of the donation centre repository port.
#[derive(Clone)]
pub struct DieselDonationCenterRepository {
    pool: DbPool,
}

impl DieselDonationCenterRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_center_pool_error(error: PoolError) -> DonationCenterRepositoryError {
    map_pool_error(error, DonationCenterRepositoryError::connection)
}

fn map_center_diesel_error(error: diesel::result::Error) -> DonationCenterRepositoryError {
    map_diesel_error(
        error,
        DonationCenterRepositoryError::query,
        DonationCenterRepositoryError::connection,
    )
}

fn row_to_center(row: DonationCenterRow) -> DonationCenter {
    DonationCenter {
        id: CenterId::from_uuid(row.id),
        center_name: row.center_name,
        location: row.location,
    }
}

#[async_trait]
impl DonationCenterRepository for DieselDonationCenterRepository {
    async fn list_centers(
        &self,
        filter: &CenterFilter,
    ) -> Result<Vec<DonationCenter>, DonationCenterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_center_pool_error)?;

        let mut query = donation_centers::table
            .select(DonationCenterRow::as_select())
            .order_by((donation_centers::center_name, donation_centers::id))
            .into_boxed();
        if let Some(id) = filter.center_id {
            query = query.filter(donation_centers::id.eq(*id.as_uuid()));
        }
        if let Some(name) = filter.center_name.as_deref() {
            query = query.filter(donation_centers::center_name.eq(name));
        }
        if let Some(location) = filter.location.as_deref() {
            query = query.filter(donation_centers::location.eq(location));
        }

        let rows: Vec<DonationCenterRow> = query
            .load(&mut conn)
            .await
            .map_err(map_center_diesel_error)?;
        Ok(rows.into_iter().map(row_to_center).collect())
    }

    async fn find_center(
        &self,
        id: CenterId,
    ) -> Result<Option<DonationCenter>, DonationCenterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_center_pool_error)?;

        let row: Option<DonationCenterRow> = donation_centers::table
            .find(*id.as_uuid())
            .select(DonationCenterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_center_diesel_error)?;
        Ok(row.map(row_to_center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let mapped = map_center_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(mapped, DonationCenterRepositoryError::Connection { .. }));
        assert!(mapped.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let mapped = map_center_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, DonationCenterRepositoryError::Query { .. }));
    }
}
