//! Local machine backend

use crate::{Backend, BackendError, CommandResult, Options, Result, RunOptions};
use async_trait::async_trait;
use bytes::Bytes;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::process::Command;
use tracing::debug;

/// Backend targeting the machine kanna itself runs on.
///
/// Transfers are plain filesystem copies and commands run through the local
/// shell. There is no connection to manage, so `close` is a no-op.
pub struct Local {
    #[allow(dead_code)]
    options: Options,
}

impl Local {
    /// Create a local backend
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Backend for Local {
    async fn transfer_file(&mut self, source: &Path, destination: &Path) -> Result<()> {
        debug!("Copying file: {:?} -> {:?}", source, destination);
        tokio::fs::copy(source, destination).await?;
        Ok(())
    }

    async fn transfer_directory(&mut self, source: &Path, destination: &Path) -> Result<()> {
        debug!("Copying directory: {:?} -> {:?}", source, destination);
        copy_tree(source.to_path_buf(), destination.to_path_buf()).await
    }

    async fn run_command(&mut self, command: &str, options: RunOptions) -> Result<CommandResult> {
        debug!("Executing local command: {}", command);

        let output = Command::new("/bin/sh")
            .arg("-c")
            .arg(command)
            .output()
            .await?;

        let result = CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: Bytes::from(output.stdout),
            stderr: Bytes::from(output.stderr),
        };

        if options.check && !result.success() {
            return Err(BackendError::CommandFailed {
                code: result.exit_code,
                message: result.stderr_string(),
            });
        }

        Ok(result)
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Copy a directory tree, creating destination directories as needed.
///
/// Boxed future because the copy recurses into subdirectories.
fn copy_tree(
    source: PathBuf,
    destination: PathBuf,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
    Box::pin(async move {
        tokio::fs::create_dir_all(&destination).await?;

        let mut entries = tokio::fs::read_dir(&source).await?;
        while let Some(entry) = entries.next_entry().await? {
            let target = destination.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                copy_tree(entry.path(), target).await?;
            } else {
                tokio::fs::copy(entry.path(), &target).await?;
            }
        }

        Ok(())
    })
}
