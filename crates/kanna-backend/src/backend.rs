//! Backend trait and command execution types

use crate::{validate, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use tracing::debug;

/// Capability set every concrete backend provides.
///
/// A backend is bound to exactly one target node and is constructed once per
/// node before any configuration step runs against it. The three transfer and
/// execution primitives are backend-specific; `send_file` and `send_directory`
/// wrap the transfer primitives with uniform source validation, so a concrete
/// backend never sees a missing or wrong-kind source.
///
/// Methods take `&mut self`: one target, one in-flight operation at a time.
#[async_trait]
pub trait Backend: Send {
    /// Transfer a single file to the target.
    ///
    /// The source has already been validated as an existing regular file on
    /// the local filesystem.
    async fn transfer_file(&mut self, source: &Path, destination: &Path) -> Result<()>;

    /// Transfer a directory tree to the target.
    ///
    /// The source has already been validated as an existing directory.
    async fn transfer_directory(&mut self, source: &Path, destination: &Path) -> Result<()>;

    /// Execute a command on the target.
    async fn run_command(&mut self, command: &str, options: RunOptions) -> Result<CommandResult>;

    /// Release the backend's connection handle. Idempotent.
    async fn close(&mut self) -> Result<()>;

    /// Validate `source` as a regular file, then transfer it.
    ///
    /// Fails with [`BackendError::SourceNotExist`](crate::BackendError::SourceNotExist)
    /// before any transfer is attempted when `source` is absent or not a
    /// regular file; otherwise the transfer primitive's result is passed
    /// through unchanged.
    async fn send_file(&mut self, source: &Path, destination: &Path) -> Result<()> {
        validate::source_file(source)?;
        debug!("Sending file: {:?} -> {:?}", source, destination);
        self.transfer_file(source, destination).await
    }

    /// Validate `source` as a directory, then transfer it.
    async fn send_directory(&mut self, source: &Path, destination: &Path) -> Result<()> {
        validate::source_directory(source)?;
        debug!("Sending directory: {:?} -> {:?}", source, destination);
        self.transfer_directory(source, destination).await
    }
}

/// Per-invocation options for [`Backend::run_command`]
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Treat a non-zero exit status as an error
    pub check: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { check: true }
    }
}

/// Captured result of a command executed on the target
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code of the command
    pub exit_code: i32,
    /// Standard output
    pub stdout: Bytes,
    /// Standard error
    pub stderr: Bytes,
}

impl CommandResult {
    /// Check if the command succeeded (exit code 0)
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get stdout as a UTF-8 string, lossily
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as a UTF-8 string, lossily
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }
}
