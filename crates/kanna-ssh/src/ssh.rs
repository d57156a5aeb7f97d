//! SSH backend implementation

use crate::config::{ClientConfig, HostAliasSource};
use crate::resolver::{self, Identity, OsIdentity, ResolvedOptions};
use async_trait::async_trait;
use bytes::Bytes;
use kanna_backend::{Backend, BackendError, CommandResult, Options, Result, RunOptions};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tokio::process::Command;
use tracing::{debug, info};

/// Backend reaching a target node over an OpenSSH subprocess.
///
/// Owns two pieces of policy no other backend needs: connection-option
/// resolution (invocation options merged over the host-alias database, with
/// a login-identity fallback) and the sudo-disable determination consulted
/// before every remote command.
pub struct Ssh {
    options: Options,
    aliases: Arc<dyn HostAliasSource>,
    identity: Arc<dyn Identity>,
    resolved: OnceLock<ResolvedOptions>,
    connected: bool,
}

impl Ssh {
    /// Create an SSH backend using the default collaborators: the OpenSSH
    /// client configuration from its standard locations and the OS login
    /// identity.
    pub fn new(options: Options) -> Self {
        Self::with_sources(options, Arc::new(ClientConfig::load_default()), Arc::new(OsIdentity))
    }

    /// Create an SSH backend with explicit collaborators
    pub fn with_sources(
        options: Options,
        aliases: Arc<dyn HostAliasSource>,
        identity: Arc<dyn Identity>,
    ) -> Self {
        Self {
            options,
            aliases,
            identity,
            resolved: OnceLock::new(),
            connected: false,
        }
    }

    /// The resolved connection options.
    ///
    /// Computed from the immutable invocation options on first use and cached
    /// for the lifetime of the instance; safe to call before any connection
    /// is opened.
    pub fn connection_options(&self) -> &ResolvedOptions {
        self.resolved
            .get_or_init(|| resolver::resolve(&self.options, &*self.aliases, &*self.identity))
    }

    /// Whether sudo wrapping is disabled for remote commands.
    ///
    /// The exact negation of the `sudo` invocation option; when the option is
    /// unset, escalation stays enabled.
    pub fn disable_sudo(&self) -> bool {
        !self.options.sudo().unwrap_or(true)
    }

    /// The `user@host` target, or a connection error when no host resolved.
    ///
    /// Resolution itself is total; a missing host only surfaces when the
    /// transport is first used.
    fn target(&self) -> Result<String> {
        let resolved = self.connection_options();
        let host_name = resolved.host_name().ok_or_else(|| {
            BackendError::Connection("no host name resolved for this backend".to_string())
        })?;

        Ok(match resolved.user() {
            Some(user) => format!("{}@{}", user, host_name),
            None => host_name.to_string(),
        })
    }

    /// Shared ssh/scp option arguments from the resolved options
    fn connection_args(&self) -> Vec<String> {
        let resolved = self.connection_options();
        let mut args = vec!["-o".to_string(), "BatchMode=yes".to_string()];

        for key in resolved.keys() {
            args.push("-i".to_string());
            args.push(key);
        }

        if let Some(proxy_command) = resolved.proxy_command() {
            args.push("-o".to_string());
            args.push(format!("ProxyCommand={}", proxy_command));
        }

        args
    }

    fn build_ssh_args(&self) -> Result<Vec<String>> {
        let mut args = self.connection_args();
        if let Some(port) = self.connection_options().port() {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        args.push(self.target()?);
        Ok(args)
    }

    fn build_scp_args(&self, recursive: bool, source: &Path, destination: &Path) -> Result<Vec<String>> {
        let mut args = self.connection_args();
        if recursive {
            args.push("-r".to_string());
        }
        if let Some(port) = self.connection_options().port() {
            args.push("-P".to_string());
            args.push(port.to_string());
        }
        args.push(source.display().to_string());
        args.push(format!("{}:{}", self.target()?, destination.display()));
        Ok(args)
    }

    /// Wrap a command for remote dispatch, prefixing the privilege-escalation
    /// invocation unless sudo is disabled
    fn wrap_command(&self, command: &str) -> String {
        let shell = format!("/bin/sh -c {}", shell_quote(command));
        if self.disable_sudo() {
            shell
        } else {
            format!("sudo -H -- {}", shell)
        }
    }

    /// Mark the lazily-opened connection as in use
    fn ensure_connected(&mut self) -> Result<()> {
        if !self.connected {
            info!("Connecting to {}", self.target()?);
            self.connected = true;
        }
        Ok(())
    }

    async fn run(program: &str, args: &[String]) -> Result<std::process::Output> {
        debug!("Executing: {} {}", program, args.join(" "));
        Ok(Command::new(program).args(args).output().await?)
    }
}

#[async_trait]
impl Backend for Ssh {
    async fn transfer_file(&mut self, source: &Path, destination: &Path) -> Result<()> {
        self.ensure_connected()?;
        let args = self.build_scp_args(false, source, destination)?;
        let output = Self::run("scp", &args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::Connection(format!(
                "scp failed: {}",
                stderr.trim()
            )));
        }

        Ok(())
    }

    async fn transfer_directory(&mut self, source: &Path, destination: &Path) -> Result<()> {
        self.ensure_connected()?;
        let args = self.build_scp_args(true, source, destination)?;
        let output = Self::run("scp", &args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::Connection(format!(
                "scp failed: {}",
                stderr.trim()
            )));
        }

        Ok(())
    }

    async fn run_command(&mut self, command: &str, options: RunOptions) -> Result<CommandResult> {
        self.ensure_connected()?;
        let mut args = self.build_ssh_args()?;
        args.push(self.wrap_command(command));

        let output = Self::run("ssh", &args).await?;
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
        if self.connected {
            debug!("Closing connection to target");
            self.connected = false;
        }
        Ok(())
    }
}

/// Quote a string for a POSIX shell
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
