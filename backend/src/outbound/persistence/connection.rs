//! Per-call SQLite connections for the persistence layer.
//!
//! Every store operation asks a [`ConnectionProvider`] for a fresh
//! connection and drops it when the operation ends, so no handle outlives a
//! single call. Diesel's synchronous SQLite connection is wrapped in
//! [`SyncConnectionWrapper`], which runs blocking work on Tokio's blocking
//! pool.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};

/// Async SQLite connection used by the adapters.
pub type SqliteConn = SyncConnectionWrapper<SqliteConnection>;

/// Errors that can occur while acquiring a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The database could not be opened.
    #[error("failed to open database: {message}")]
    Establish { message: String },

    /// The connection opened but session pragmas could not be applied.
    #[error("failed to configure connection: {message}")]
    Configure { message: String },
}

impl ConnectionError {
    /// Create an establish error with the given message.
    pub fn establish(message: impl Into<String>) -> Self {
        Self::Establish {
            message: message.into(),
        }
    }

    /// Create a configure error with the given message.
    pub fn configure(message: impl Into<String>) -> Self {
        Self::Configure {
            message: message.into(),
        }
    }
}

/// Source of store connections injected into adapters.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Open a connection scoped to one store operation.
    async fn connect(&self) -> Result<SqliteConn, ConnectionError>;
}

/// Default busy timeout applied to each connection.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a new SQLite connection for every call.
///
/// # Example
///
/// ```ignore
/// let connector = SqliteConnector::for_path("./backend.db")
///     .with_busy_timeout(Duration::from_secs(1));
/// let mut conn = connector.connect().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    database_url: String,
    busy_timeout: Duration,
}

impl SqliteConnector {
    /// Create a connector for the given database URL or file path.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Create a connector for a database file.
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        Self::new(path.as_ref().to_string_lossy().into_owned())
    }

    /// Set how long SQLite waits on a locked database before failing.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Get the configured busy timeout.
    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }
}

#[async_trait]
impl ConnectionProvider for SqliteConnector {
    async fn connect(&self) -> Result<SqliteConn, ConnectionError> {
        let mut conn = SqliteConn::establish(&self.database_url)
            .await
            .map_err(|err| ConnectionError::establish(err.to_string()))?;
        let pragma = format!("PRAGMA busy_timeout = {};", self.busy_timeout.as_millis());
        conn.batch_execute(&pragma)
            .await
            .map_err(|err| ConnectionError::configure(err.to_string()))?;
        Ok(conn)
    }
}
