//! Diagnostic log.
//!
//! The terminal belongs to the viewer, so logs go to a file. Follow them
//! with `tail -f` from another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Reasons the diagnostic log could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file's directory could not be created.
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that was attempted.
        path: PathBuf,
        /// Error from the filesystem.
        #[source]
        source: std::io::Error,
    },

    /// The path has no usable file name.
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log file could not be opened
    #[error("Failed to open log file {path:?}: {source}")]
    FileOpen {
        /// The log file path
        path: PathBuf,
        /// The appender error
        #[source]
        source: InitError,
    },

    /// Another global subscriber was installed first.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Open a never-rotating appender for `log_path`, creating its directory.
///
/// A bare file name is placed in the current directory.
///
/// # Errors
///
/// Returns `InvalidPath` when the path has no UTF-8 file name,
/// `DirectoryCreation` when the parent directory cannot be created and
/// `FileOpen` when the file itself cannot be opened.
pub fn file_writer(log_path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|source| LoggingError::FileOpen {
            path: log_path.to_path_buf(),
            source,
        })
}

/// Install the global subscriber, writing plain-text events to `log_path`.
///
/// `RUST_LOG` selects the filter; [`DEFAULT_FILTER`] applies otherwise.
///
/// # Errors
///
/// Fails if the log file cannot be set up or a subscriber is already
/// installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let writer = file_writer(log_path)?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
