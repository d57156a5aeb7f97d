//! # Kanna Backend Contract
//!
//! Backend abstraction for the kanna transport layer: the capability set
//! every concrete backend provides, shared pre-transfer validation, and the
//! local-machine backend.

#![warn(missing_docs)]

/// Backend trait and command execution types
pub mod backend;

/// Invocation options supplied at backend construction
pub mod options;

/// Pre-transfer source validation
pub mod validate;

/// Local machine backend
pub mod local;

/// Error types for backend operations
pub mod error;

pub use backend::{Backend, CommandResult, RunOptions};
pub use error::BackendError;
pub use local::Local;
pub use options::Options;

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;
