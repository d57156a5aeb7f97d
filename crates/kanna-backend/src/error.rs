//! Error types for backend operations

use std::io;
use thiserror::Error;

/// Errors surfaced by backend construction, validation, and transport
#[derive(Debug, Error)]
pub enum BackendError {
    /// The local source of a transfer is missing or of the wrong kind.
    /// Raised only by pre-transfer validation, never by transports.
    #[error("{0}")]
    SourceNotExist(String),

    /// A command finished with a non-zero exit status
    #[error("Command failed with exit code {code}: {message}")]
    CommandFailed {
        /// Exit code of the failed command
        code: i32,
        /// Captured standard error
        message: String,
    },

    /// Connection-level failure from the underlying transport
    #[error("Connection error: {0}")]
    Connection(String),

    /// Backend configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
