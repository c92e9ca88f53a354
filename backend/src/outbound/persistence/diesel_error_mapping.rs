//! Mapping from connection and Diesel failures to user store errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::UserId;
use crate::domain::ports::UserStoreError;

use super::connection::ConnectionError;

/// Map connection acquisition failures to the store's connection error.
pub(super) fn map_connection_error(error: ConnectionError) -> UserStoreError {
    match error {
        ConnectionError::Establish { message } | ConnectionError::Configure { message } => {
            UserStoreError::connection(message)
        }
    }
}

fn log_diesel_error(error: &DieselError, operation: &str) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(error_message = %error, %operation, "diesel operation failed"),
    }
}

/// Map Diesel errors from reads and deletes.
pub(super) fn map_diesel_error(error: DieselError, operation: &str) -> UserStoreError {
    log_diesel_error(&error, operation);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => UserStoreError::query(info.message()),
        other => UserStoreError::query(other.to_string()),
    }
}

/// Map Diesel errors raised while inserting `id`.
///
/// Constraint violations become [`UserStoreError::Conflict`]; everything else
/// follows [`map_diesel_error`].
pub(super) fn map_insert_error(error: DieselError, id: UserId) -> UserStoreError {
    match error {
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation),
            info,
        ) => {
            debug!(?kind, message = info.message(), %id, "insert violated a constraint");
            UserStoreError::conflict(id, info.message())
        }
        other => map_diesel_error(other, "create user"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_failures_map_to_connection_variant() {
        let err = map_connection_error(ConnectionError::establish("unable to open database"));
        assert_eq!(err, UserStoreError::connection("unable to open database"));
    }

    #[rstest]
    fn not_found_outside_lookup_maps_to_query() {
        let err = map_diesel_error(DieselError::NotFound, "delete user");
        assert!(matches!(err, UserStoreError::Query { .. }));
    }

    #[rstest]
    fn insert_errors_without_constraint_fall_back_to_query() {
        let err = map_insert_error(DieselError::RollbackTransaction, UserId::new(1));
        assert!(matches!(err, UserStoreError::Query { .. }));
    }
}
