//! Shared Diesel error mapping for the repository adapters.
//!
//! Each adapter passes its port error constructors in, so the classification
//! of Diesel failures lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel errors into query/connection constructors.
///
/// Unique violations are reported as query errors here; repositories that
/// expose a conflict variant check [`unique_violation`] first.
pub(crate) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Constraint name of a unique violation, or `None` for any other error.
///
/// Postgres does not always report the constraint, so the fallback is the
/// table name and then a generic label.
pub(crate) fn unique_violation(error: &DieselError) -> Option<String> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => Some(
            info.constraint_name()
                .or(info.table_name())
                .unwrap_or("unique constraint")
                .to_owned(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_diesel_error(
            error,
            |message| Mapped::Query(message.to_owned()),
            |message| Mapped::Connection(message.to_owned()),
        )
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("simulated".to_owned()))
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        assert_eq!(
            map(database_error(DatabaseErrorKind::ClosedConnection)),
            Mapped::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), "unique constraint violated")]
    #[case(database_error(DatabaseErrorKind::CheckViolation), "database error")]
    fn other_failures_map_to_query(#[case] error: DieselError, #[case] message: &str) {
        assert_eq!(map(error), Mapped::Query(message.to_owned()));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn unique_violation_is_detected() {
        let error = database_error(DatabaseErrorKind::UniqueViolation);
        assert_eq!(unique_violation(&error).as_deref(), Some("unique constraint"));
        assert_eq!(unique_violation(&DieselError::NotFound), None);
    }
}
