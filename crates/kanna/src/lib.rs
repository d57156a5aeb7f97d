//! # Kanna
//!
//! Transport layer for a host-configuration tool: moves files and directories
//! onto a target node and executes commands there, whether the target is the
//! local machine or a remote host reached over SSH.
//!
//! A caller constructs one backend per target node, then drives it through
//! the [`Backend`] capability set. Transfer sources are validated against the
//! local filesystem before any backend-specific primitive runs.
//!
//! ```no_run
//! use kanna::{create, BackendKind, Options, RunOptions};
//!
//! # async fn run() -> kanna::Result<()> {
//! let options = Options::new().set("host", "web1").set("sudo", true);
//! let mut backend = create(BackendKind::Ssh, options);
//!
//! backend
//!     .send_file("files/nginx.conf".as_ref(), "/etc/nginx/nginx.conf".as_ref())
//!     .await?;
//! backend
//!     .run_command("systemctl reload nginx", RunOptions::default())
//!     .await?;
//! backend.close().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use kanna_backend as backend;
pub use kanna_ssh as ssh;

pub use kanna_backend::{Backend, BackendError, CommandResult, Local, Options, RunOptions};
pub use kanna_ssh::Ssh;

/// Result type alias for kanna operations
pub type Result<T> = kanna_backend::Result<T>;

/// The closed set of concrete backend kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The machine kanna itself runs on
    Local,
    /// A remote host reached over SSH
    Ssh,
}

/// Construct the backend for a target node.
///
/// The local kind ignores connection-related options; the SSH kind resolves
/// them lazily against the OpenSSH client configuration and the OS login
/// identity.
pub fn create(kind: BackendKind, options: Options) -> Box<dyn Backend> {
    match kind {
        BackendKind::Local => Box::new(Local::new(options)),
        BackendKind::Ssh => Box::new(Ssh::new(options)),
    }
}
