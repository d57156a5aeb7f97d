//! Basic usage example for kanna
//!
//! Demonstrates constructing a backend for a target node, sending a file,
//! and running commands with and without privilege escalation.

use kanna::{create, BackendKind, Options, RunOptions};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    // Replace with your actual host alias; connection settings such as the
    // user, port, and identity file are resolved from ~/.ssh/config.
    let options = Options::new()
        .set("host", "remote-host")
        .set("sudo", false);

    let mut backend = create(BackendKind::Ssh, options);

    println!("Resolved options and sudo policy are available before connecting.");

    let output = backend.run_command("uname -a", RunOptions::default()).await?;
    println!("uname: {}", output.stdout_string().trim());

    backend
        .send_file("README.md".as_ref(), "/tmp/kanna_example.txt".as_ref())
        .await?;
    println!("File sent to /tmp/kanna_example.txt");

    // Non-zero exit codes can be inspected instead of raised
    let status = backend
        .run_command("test -f /etc/nginx/nginx.conf", RunOptions { check: false })
        .await?;
    println!("nginx.conf present: {}", status.success());

    backend.close().await?;
    Ok(())
}
