//! PostgreSQL-backed `RegistrationRepository` implementation using Diesel ORM.
//!
//! User and donor rows are written inside one `AsyncConnection::transaction`.
//! The helpers below take the transaction's connection explicitly, so every
//! statement of a registration runs on the same transaction and a failure in
//! any of them rolls the others back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{
    Contact, Donor, DonorId, DonorPoints, DonorVerification, Identification, NewDonor, NewUser,
    RegisteredDonor, User, UserId, UserLookup,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{DonorPointsRow, DonorRow, NewDonorRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{donor_points, donors, users};

/// Diesel-backed implementation of the registration repository port.
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_registration_pool_error(error: PoolError) -> RegistrationRepositoryError {
    map_pool_error(error, RegistrationRepositoryError::connection)
}

/// Map Diesel errors, surfacing unique violations as conflicts.
fn map_registration_diesel_error(error: DieselError) -> RegistrationRepositoryError {
    if let Some(constraint) = unique_violation(&error) {
        return RegistrationRepositoryError::conflict(constraint);
    }
    map_diesel_error(
        error,
        RegistrationRepositoryError::query,
        RegistrationRepositoryError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, RegistrationRepositoryError> {
    let contact = Contact::new(row.contact)
        .map_err(|err| RegistrationRepositoryError::query(format!("stored contact: {err}")))?;
    Ok(User {
        id: UserId::from_uuid(row.id),
        contact,
        full_name: row.full_name,
        created_at: row.created_at,
    })
}

fn row_to_donor(row: DonorRow) -> Result<Donor, RegistrationRepositoryError> {
    let identification = Identification::new(row.identification).map_err(|err| {
        RegistrationRepositoryError::query(format!("stored identification: {err}"))
    })?;
    Ok(Donor {
        id: DonorId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        identification,
        validation_status: row.validation_status,
    })
}

fn row_to_points(row: DonorPointsRow) -> Result<DonorPoints, RegistrationRepositoryError> {
    let total_points = u32::try_from(row.total_points).map_err(|_| {
        RegistrationRepositoryError::query(format!(
            "negative points balance {} for donor {}",
            row.total_points, row.donor_id
        ))
    })?;
    Ok(DonorPoints {
        donor_id: DonorId::from_uuid(row.donor_id),
        total_points,
        last_updated: row.last_updated,
    })
}

async fn insert_user(conn: &mut AsyncPgConnection, user: &NewUser) -> Result<UserId, DieselError> {
    let row = NewUserRow {
        id: Uuid::new_v4(),
        contact: user.contact.as_str(),
        full_name: &user.full_name,
        password_hash: user.password_hash.expose(),
    };
    diesel::insert_into(users::table)
        .values(&row)
        .execute(conn)
        .await?;
    Ok(UserId::from_uuid(row.id))
}

async fn insert_donor(
    conn: &mut AsyncPgConnection,
    user_id: UserId,
    donor: &NewDonor,
) -> Result<DonorId, DieselError> {
    let row = NewDonorRow {
        id: Uuid::new_v4(),
        user_id: *user_id.as_uuid(),
        identification: donor.identification.as_str(),
    };
    diesel::insert_into(donors::table)
        .values(&row)
        .execute(conn)
        .await?;
    Ok(DonorId::from_uuid(row.id))
}

/// Seed a donor's ledger on an already open connection or transaction.
///
/// `ON CONFLICT DO NOTHING` keeps an existing balance untouched, including
/// when two callers race to seed the same donor.
pub(crate) async fn ensure_points_ledger_in(
    conn: &mut AsyncPgConnection,
    donor_id: DonorId,
    now: DateTime<Utc>,
) -> Result<(), DieselError> {
    let row = DonorPointsRow {
        donor_id: *donor_id.as_uuid(),
        total_points: 0,
        last_updated: now,
    };
    diesel::insert_into(donor_points::table)
        .values(&row)
        .on_conflict(donor_points::donor_id)
        .do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn create_user_with_donor(
        &self,
        user: &NewUser,
        donor: &NewDonor,
    ) -> Result<RegisteredDonor, RegistrationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_registration_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let user_id = insert_user(conn, user).await?;
                let donor_id = insert_donor(conn, user_id, donor).await?;
                Ok::<_, DieselError>(RegisteredDonor { user_id, donor_id })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_registration_diesel_error)
    }

    async fn ensure_points_ledger(
        &self,
        donor_id: DonorId,
        now: DateTime<Utc>,
    ) -> Result<(), RegistrationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_registration_pool_error)?;
        ensure_points_ledger_in(&mut conn, donor_id, now)
            .await
            .map_err(map_registration_diesel_error)
    }

    async fn credit_points(
        &self,
        donor_id: DonorId,
        points: u32,
        now: DateTime<Utc>,
    ) -> Result<bool, RegistrationRepositoryError> {
        let points = i32::try_from(points).map_err(|_| {
            RegistrationRepositoryError::query(format!("points credit {points} out of range"))
        })?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_registration_pool_error)?;

        let updated = diesel::update(donor_points::table.find(*donor_id.as_uuid()))
            .set((
                donor_points::total_points.eq(donor_points::total_points + points),
                donor_points::last_updated.eq(now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_registration_diesel_error)?;
        Ok(updated == 1)
    }

    async fn find_points(
        &self,
        donor_id: DonorId,
    ) -> Result<Option<DonorPoints>, RegistrationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_registration_pool_error)?;

        donor_points::table
            .find(*donor_id.as_uuid())
            .select(DonorPointsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_registration_diesel_error)?
            .map(row_to_points)
            .transpose()
    }

    async fn verify_donor(
        &self,
        verification: &DonorVerification,
    ) -> Result<bool, RegistrationRepositoryError> {
        if !verification.verification {
            return Ok(false);
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_registration_pool_error)?;

        let updated = diesel::update(
            donors::table
                .filter(donors::identification.eq(verification.identification.as_str()))
                .filter(donors::validation_status.eq(false)),
        )
        .set(donors::validation_status.eq(verification.verification))
        .execute(&mut conn)
        .await
        .map_err(map_registration_diesel_error)?;
        Ok(updated == 1)
    }

    async fn find_donor(
        &self,
        identification: &Identification,
    ) -> Result<Option<Donor>, RegistrationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_registration_pool_error)?;

        donors::table
            .filter(donors::identification.eq(identification.as_str()))
            .select(DonorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_registration_diesel_error)?
            .map(row_to_donor)
            .transpose()
    }

    async fn find_user(
        &self,
        lookup: &UserLookup,
    ) -> Result<Option<User>, RegistrationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(map_registration_pool_error)?;

        let query = users::table.select(UserRow::as_select()).into_boxed();
        let query = match lookup {
            UserLookup::Id(id) => query.filter(users::id.eq(*id.as_uuid())),
            UserLookup::Contact(contact) => query.filter(users::contact.eq(contact.as_str())),
        };

        query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_registration_diesel_error)?
            .map(row_to_user)
            .transpose()
    }
}
