//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `USERS_API_*` environment variables over an
//! optional config file. The log file location additionally honours the bare
//! `LOG_FILE_LOCATION` variable that older deployments set.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::state::DEFAULT_MAX_BODY_BYTES;

const DEFAULT_DATABASE_PATH: &str = "./backend.db";
const DEFAULT_PORT: u16 = 8080;
/// Unprefixed variable consulted when no log location is configured.
pub const LEGACY_LOG_FILE_VAR: &str = "LOG_FILE_LOCATION";

/// Runtime settings for the users service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServiceSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// SQLite database file, recreated at startup.
    pub database_path: Option<PathBuf>,
    /// How long a connection waits on a locked database, in milliseconds.
    #[ortho_config(default = 5000)]
    pub busy_timeout_ms: u64,
    /// Largest request body accepted, in bytes.
    pub max_body_bytes: Option<usize>,
    /// File receiving rotated JSON logs. Logs go to stdout when unset.
    pub log_file_location: Option<PathBuf>,
}

impl ServiceSettings {
    /// Return the bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            DEFAULT_PORT,
        )))
    }

    /// Return the database path, defaulting to `./backend.db`.
    pub fn database_path(&self) -> &Path {
        self.database_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATABASE_PATH))
    }

    /// Return the SQLite busy timeout.
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Return the request body limit, defaulting to 16 MiB.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    /// Return the log file location, if any.
    ///
    /// Falls back to [`LEGACY_LOG_FILE_VAR`]; empty values count as unset.
    pub fn log_file_location(&self) -> Option<PathBuf> {
        self.log_file_location
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| {
                std::env::var_os(LEGACY_LOG_FILE_VAR)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
    }
}
