//! PostgreSQL-backed `AppointmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};
use crate::domain::{
    Appointment, AppointmentFilter, AppointmentId, CenterId, NewAppointment, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::AppointmentRow;
use super::pool::{DbPool, PoolError};
use super::schema::appointments;

/// Diesel-backed implementation of the appointment repository port.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_appointment_pool_error(error: PoolError) -> AppointmentRepositoryError {
    map_pool_error(error, AppointmentRepositoryError::connection)
}

fn map_appointment_diesel_error(error: diesel::result::Error) -> AppointmentRepositoryError {
    map_diesel_error(
        error,
        AppointmentRepositoryError::query,
        AppointmentRepositoryError::connection,
    )
}

fn row_to_appointment(row: AppointmentRow) -> Appointment {
    Appointment {
        id: AppointmentId::from_uuid(row.id),
        center_id: CenterId::from_uuid(row.center_id),
        user_id: UserId::from_uuid(row.user_id),
        appointment_date: row.appointment_date,
        status: row.status,
    }
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_appointment_pool_error)?;

        let row = AppointmentRow {
            id: Uuid::new_v4(),
            center_id: *appointment.center_id.as_uuid(),
            user_id: *appointment.user_id.as_uuid(),
            appointment_date: appointment.appointment_date,
            status: false,
        };
        diesel::insert_into(appointments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_appointment_diesel_error)?;
        Ok(row_to_appointment(row))
    }

    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_appointment_pool_error)?;

        let mut query = appointments::table
            .select(AppointmentRow::as_select())
            .order_by((appointments::appointment_date, appointments::id))
            .into_boxed();
        if let Some(id) = filter.appointment_id {
            query = query.filter(appointments::id.eq(*id.as_uuid()));
        }
        if let Some(center_id) = filter.center_id {
            query = query.filter(appointments::center_id.eq(*center_id.as_uuid()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(appointments::user_id.eq(*user_id.as_uuid()));
        }
        if let Some(status) = filter.status {
            query = query.filter(appointments::status.eq(status));
        }

        let rows: Vec<AppointmentRow> = query
            .load(&mut conn)
            .await
            .map_err(map_appointment_diesel_error)?;
        Ok(rows.into_iter().map(row_to_appointment).collect())
    }

    async fn reschedule(
        &self,
        id: AppointmentId,
        appointment_date: DateTime<Utc>,
    ) -> Result<bool, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_appointment_pool_error)?;

        let updated = diesel::update(appointments::table.find(*id.as_uuid()))
            .set(appointments::appointment_date.eq(appointment_date))
            .execute(&mut conn)
            .await
            .map_err(map_appointment_diesel_error)?;
        Ok(updated == 1)
    }

    async fn set_status(
        &self,
        id: AppointmentId,
        status: bool,
    ) -> Result<bool, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_appointment_pool_error)?;

        let updated = diesel::update(appointments::table.find(*id.as_uuid()))
            .set(appointments::status.eq(status))
            .execute(&mut conn)
            .await
            .map_err(map_appointment_diesel_error)?;
        Ok(updated == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert!(matches!(
            map_appointment_diesel_error(error),
            AppointmentRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn new_rows_start_unapproved() {
        let row = AppointmentRow {
            id: Uuid::new_v4(),
            center_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            appointment_date: Utc::now(),
            status: false,
        };
        let appointment = row_to_appointment(row.clone());
        assert_eq!(*appointment.id.as_uuid(), row.id);
        assert!(!appointment.status);
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let mapped = map_appointment_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, AppointmentRepositoryError::connection("timed out"));
    }
}
