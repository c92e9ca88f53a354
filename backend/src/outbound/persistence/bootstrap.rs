//! One-time schema bootstrap run before the server accepts requests.
//!
//! The service starts from an empty store on every launch: the database
//! file is removed and the `users` table recreated. Nothing here is called
//! from request handlers.

use std::io;
use std::path::Path;

use diesel_async::SimpleAsyncConnection;
use tracing::info;

use super::connection::{ConnectionError, ConnectionProvider, SqliteConnector};

/// DDL for the users table; kept in step with `schema.rs`.
const CREATE_USERS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS users (id INTEGER NOT NULL PRIMARY KEY, name TEXT);";

/// Failures raised while preparing the store.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The previous database file could not be removed.
    #[error("failed to remove database file {path}: {source}")]
    RemoveFile { path: String, source: io::Error },
    /// No connection could be opened.
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    /// The schema DDL failed.
    #[error("failed to create schema: {message}")]
    Schema { message: String },
}

/// Create the users table when it does not exist yet.
///
/// # Errors
///
/// Returns [`BootstrapError::Connection`] when no connection can be opened
/// and [`BootstrapError::Schema`] when the DDL fails.
pub async fn ensure_schema(connections: &dyn ConnectionProvider) -> Result<(), BootstrapError> {
    let mut conn = connections.connect().await?;
    conn.batch_execute(CREATE_USERS_TABLE)
        .await
        .map_err(|err| BootstrapError::Schema {
            message: err.to_string(),
        })
}

/// Remove the database file at `path` and recreate an empty schema.
///
/// A missing file is not an error.
///
/// # Errors
///
/// Returns [`BootstrapError::RemoveFile`] if an existing file cannot be
/// deleted, otherwise propagates [`ensure_schema`] failures.
pub async fn reset_database(connector: &SqliteConnector, path: &Path) -> Result<(), BootstrapError> {
    match std::fs::remove_file(path) {
        Ok(()) => info!(path = %path.display(), "removed previous database file"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(BootstrapError::RemoveFile {
                path: path.display().to_string(),
                source,
            });
        }
    }

    ensure_schema(connector).await?;
    info!(path = %path.display(), "database schema created");
    Ok(())
}
