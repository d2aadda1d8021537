//! Error types for happygrep.
//!
//! Errors are split by how far they propagate:
//!
//! - [`AppError`] - startup and shell failures. `TerminalInit` and a
//!   `SourceError::SpawnFailed` raised before the loop starts are fatal.
//! - [`SourceError`] - producer failures. After startup these are recovered
//!   locally: the producer is closed, loaded records are kept and a one-line
//!   status message is shown.
//! - [`crate::parser::ParseSkip`] - malformed or sentinel lines. Silently
//!   dropped, never surfaced.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// The terminal could not be put into raw/alternate-screen mode.
    ///
    /// Fatal; the process exits before entering the event loop.
    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal I/O failed while the loop was running.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Producer failure.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Diagnostic log could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

/// Failures of the external line producer or of record storage.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The producer process could not be started.
    ///
    /// At startup this aborts the session with no partial view.
    #[error("Failed to run {command}: {source}")]
    SpawnFailed {
        /// Shell command that was attempted.
        command: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading the producer's output.
    ///
    /// Already appended records are retained.
    #[error("Failed to read results: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// The record store could not grow.
    ///
    /// The current update is aborted, prior content preserved.
    #[error("Allocation failure")]
    AllocationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failed_message_names_command() {
        let err = SourceError::SpawnFailed {
            command: "find . -exec grep -in foo {} +".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("find . -exec grep"), "got: {msg}");
        assert!(msg.contains("no such file"), "got: {msg}");
    }

    #[test]
    fn allocation_failed_message_is_short() {
        assert_eq!(SourceError::AllocationFailed.to_string(), "Allocation failure");
    }

    #[test]
    fn source_error_converts_into_app_error() {
        fn fails() -> Result<(), AppError> {
            Err(SourceError::AllocationFailed)?;
            Ok(())
        }
        assert!(matches!(
            fails(),
            Err(AppError::Source(SourceError::AllocationFailed))
        ));
    }

    #[test]
    fn io_error_converts_into_terminal_variant() {
        let err: AppError = std::io::Error::other("broken pipe").into();
        assert!(matches!(err, AppError::Terminal(_)));
        assert!(err.to_string().contains("broken pipe"));
    }

    #[test]
    fn terminal_init_is_distinct_from_runtime_terminal_errors() {
        let err = AppError::TerminalInit(std::io::Error::other("not a tty"));
        assert!(err.to_string().starts_with("Failed to initialize terminal"));
    }
}
