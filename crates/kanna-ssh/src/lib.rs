//! # Kanna SSH Backend
//!
//! SSH backend for the kanna transport layer: connection-option resolution
//! against an OpenSSH-style client configuration, privilege-escalation
//! policy, and a subprocess ssh/scp transport.

#![warn(missing_docs)]

/// Host-alias configuration database
pub mod config;

/// Connection-option resolution
pub mod resolver;

/// SSH backend implementation
pub mod ssh;

pub use config::{ClientConfig, HostAliasSource};
pub use resolver::{Identity, OsIdentity, ResolvedOptions};
pub use ssh::Ssh;
