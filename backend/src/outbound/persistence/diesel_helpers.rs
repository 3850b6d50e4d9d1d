//! Shared helpers for Diesel repository implementations.

use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Map a Diesel error through a repository's `query`/`connection`
/// constructors, emitting debug context for the failed `operation`.
///
/// Only a closed connection counts as a connection failure; every other
/// variant is a query failure.
pub fn map_diesel_error<E>(
    error: diesel::result::Error,
    operation: &str,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection(format!("{operation}: database connection closed"))
        }
        other => query(format!("{operation}: {other}")),
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

/// Convert domain minutes to the `Int4` column type.
pub fn minutes_to_db(minutes: u32) -> Result<i32, String> {
    i32::try_from(minutes).map_err(|_| format!("{minutes} minutes exceeds the stored range"))
}

/// Convert an `Int4` minutes column to domain minutes.
pub fn minutes_from_db(minutes: i32) -> Result<u32, String> {
    u32::try_from(minutes).map_err(|_| format!("stored minutes {minutes} are negative"))
}
