//! PostgreSQL-backed `BloodDonationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{BloodDonationRepository, BloodDonationRepositoryError};
use crate::domain::{
    BloodDonation, BloodGroup, CenterId, DonationFilter, DonationId, Identification, LabResults,
    NewBloodDonation,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BloodDonationRow, LabResultsUpdate, NewBloodDonationRow};
use super::pool::{DbPool, PoolError};
use super::schema::blood_donations;

/// Diesel-backed implementation of the blood donation repository port.
#[derive(Clone)]
pub struct DieselBloodDonationRepository {
    pool: DbPool,
}

impl DieselBloodDonationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_donation_pool_error(error: PoolError) -> BloodDonationRepositoryError {
    map_pool_error(error, BloodDonationRepositoryError::connection)
}

fn map_donation_diesel_error(error: diesel::result::Error) -> BloodDonationRepositoryError {
    map_diesel_error(
        error,
        BloodDonationRepositoryError::query,
        BloodDonationRepositoryError::connection,
    )
}

/// Parse a stored blood group, treating unknown labels as absent.
fn parse_blood_group(id: Uuid, raw: Option<String>) -> Option<BloodGroup> {
    let raw = raw?;
    match raw.parse() {
        Ok(group) => Some(group),
        Err(_) => {
            warn!(
                donation_id = %id,
                value = raw.as_str(),
                "unrecognised blood_group value, treating as absent"
            );
            None
        }
    }
}

fn row_to_donation(row: BloodDonationRow) -> Result<BloodDonation, BloodDonationRepositoryError> {
    let donor_identification = Identification::new(row.donor_identification).map_err(|err| {
        BloodDonationRepositoryError::query(format!("stored identification: {err}"))
    })?;
    Ok(BloodDonation {
        id: DonationId::from_uuid(row.id),
        donor_identification,
        center_id: CenterId::from_uuid(row.center_id),
        blood_group: parse_blood_group(row.id, row.blood_group),
        syphilis: row.syphilis,
        hiv: row.hiv,
        donated_at: row.donated_at,
        transfused_at: row.transfused_at,
    })
}

#[async_trait]
impl BloodDonationRepository for DieselBloodDonationRepository {
    async fn record_donation(
        &self,
        donation: &NewBloodDonation,
    ) -> Result<BloodDonation, BloodDonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_donation_pool_error)?;

        let new_row = NewBloodDonationRow {
            id: Uuid::new_v4(),
            donor_identification: donation.donor_identification.as_str(),
            center_id: *donation.center_id.as_uuid(),
        };
        let row: BloodDonationRow = diesel::insert_into(blood_donations::table)
            .values(&new_row)
            .returning(BloodDonationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_donation_diesel_error)?;
        row_to_donation(row)
    }

    async fn update_results(
        &self,
        id: DonationId,
        results: LabResults,
    ) -> Result<bool, BloodDonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_donation_pool_error)?;

        let changes = LabResultsUpdate {
            blood_group: results.blood_group.as_str(),
            syphilis: results.syphilis,
            hiv: results.hiv,
        };
        let updated = diesel::update(blood_donations::table.find(*id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_donation_diesel_error)?;
        Ok(updated == 1)
    }

    async fn list_donations(
        &self,
        filter: &DonationFilter,
    ) -> Result<Vec<BloodDonation>, BloodDonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_donation_pool_error)?;

        let mut query = blood_donations::table
            .select(BloodDonationRow::as_select())
            .order_by((blood_donations::donated_at, blood_donations::id))
            .into_boxed();
        if let Some(identification) = filter.donor_identification.as_ref() {
            query = query
                .filter(blood_donations::donor_identification.eq(identification.as_str()));
        }
        if let Some(center_ids) = filter.center_ids.as_ref() {
            let ids: Vec<Uuid> = center_ids.iter().map(|id| *id.as_uuid()).collect();
            query = query.filter(blood_donations::center_id.eq_any(ids));
        }
        if let Some(group) = filter.blood_group {
            query = query.filter(blood_donations::blood_group.eq(group.as_str()));
        }

        let rows: Vec<BloodDonationRow> = query
            .load(&mut conn)
            .await
            .map_err(map_donation_diesel_error)?;
        rows.into_iter().map(row_to_donation).collect()
    }

    async fn find_donation(
        &self,
        id: DonationId,
    ) -> Result<Option<BloodDonation>, BloodDonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_donation_pool_error)?;

        blood_donations::table
            .find(*id.as_uuid())
            .select(BloodDonationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_donation_diesel_error)?
            .map(row_to_donation)
            .transpose()
    }

    async fn mark_transfused(
        &self,
        id: DonationId,
        at: DateTime<Utc>,
    ) -> Result<bool, BloodDonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_donation_pool_error)?;

        let updated = diesel::update(
            blood_donations::table
                .find(*id.as_uuid())
                .filter(blood_donations::transfused_at.is_null()),
        )
        .set(blood_donations::transfused_at.eq(Some(at)))
        .execute(&mut conn)
        .await
        .map_err(map_donation_diesel_error)?;
        Ok(updated == 1)
    }
}
