//! Structured logging setup.
//!
//! Events are emitted as JSON through `tracing-subscriber`, filtered by
//! `RUST_LOG` (default `info`). When a log file location is configured the
//! output goes to a size-rotated file instead of stdout. The live file keeps
//! the configured name; at 500 MiB it is renamed with a timestamp infix and a
//! fresh file is started. Three plain plus three compressed backups are kept.

use std::path::Path;

use flexi_logger::writers::{ArcFileLogWriter, FileLogWriter, FileLogWriterHandle};
use flexi_logger::{Cleanup, Criterion, FileSpec, FlexiLoggerError, Naming};
use tracing_subscriber::{EnvFilter, fmt};

const ROTATE_AT_BYTES: u64 = 500 * 1024 * 1024;
const KEPT_BACKUPS: usize = 3;
const BACKUP_TIMESTAMP: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const DEFAULT_FILTER: &str = "info";

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The rotating log file could not be opened.
    #[error("failed to open log file: {0}")]
    FileWriter(#[from] FlexiLoggerError),
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {message}")]
    Subscriber { message: String },
}

/// Keeps the rotating file writer alive; dropping it flushes and closes the
/// log file.
#[derive(Default)]
pub struct LoggingGuard {
    file_handle: Option<FileLogWriterHandle>,
}

impl LoggingGuard {
    /// Whether logs are going to a file rather than stdout.
    pub fn writes_to_file(&self) -> bool {
        self.file_handle.is_some()
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open a size-rotated, append-mode writer for `path`.
///
/// # Errors
///
/// Returns [`FlexiLoggerError`] when the path is unusable or the file cannot
/// be created.
pub fn rotating_file_writer(
    path: &Path,
) -> Result<(ArcFileLogWriter, FileLogWriterHandle), FlexiLoggerError> {
    FileLogWriter::builder(FileSpec::try_from(path)?)
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::TimestampsCustomFormat {
                current_infix: None,
                format: BACKUP_TIMESTAMP,
            },
            Cleanup::KeepLogAndCompressedFiles(KEPT_BACKUPS, KEPT_BACKUPS),
        )
        .append()
        .try_build_with_handle()
}

/// Install the global JSON subscriber.
///
/// # Errors
///
/// Returns [`LoggingError`] when the log file cannot be opened or a
/// subscriber is already installed.
pub fn init_logging(log_file: Option<&Path>) -> Result<LoggingGuard, LoggingError> {
    let builder = fmt().with_env_filter(env_filter()).json();
    match log_file {
        Some(path) => {
            let (writer, handle) = rotating_file_writer(path)?;
            builder
                .with_writer(move || writer.clone())
                .try_init()
                .map_err(|err| LoggingError::Subscriber {
                    message: err.to_string(),
                })?;
            Ok(LoggingGuard {
                file_handle: Some(handle),
            })
        }
        None => {
            builder.try_init().map_err(|err| LoggingError::Subscriber {
                message: err.to_string(),
            })?;
            Ok(LoggingGuard::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use rstest::rstest;

    #[rstest]
    fn rotating_writer_appends_to_the_named_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("service.log");

        {
            let (mut writer, _handle) = rotating_file_writer(&path).expect("writer");
            writer.write_all(b"{\"msg\":\"first\"}\n").expect("write");
            writer.flush().expect("flush");
        }
        {
            let (mut writer, _handle) = rotating_file_writer(&path).expect("writer");
            writer.write_all(b"{\"msg\":\"second\"}\n").expect("write");
            writer.flush().expect("flush");
        }

        let contents = std::fs::read_to_string(&path).expect("log file");
        assert!(contents.contains("first"));
        assert!(contents.contains("second"));

        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .expect("log dir")
            .map(|entry| entry.expect("dir entry").file_name())
            .collect();
        names.sort();
        assert_eq!(names, vec![std::ffi::OsString::from("service.log")]);
    }

    #[rstest]
    fn default_guard_targets_stdout() {
        assert!(!LoggingGuard::default().writes_to_file());
    }
}
