//! Connection-option resolution
//!
//! Merges an ordered list of option sources into one immutable resolved
//! value: the host-alias configuration database first, then the caller's
//! explicit invocation options, with a final fallback to the local login
//! identity when neither source supplies a user.

use crate::config::HostAliasSource;
use kanna_backend::Options;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Supplies the local operating system's current login identity.
///
/// Injected rather than read from the environment directly so tests can
/// substitute a fixed name.
pub trait Identity: Send + Sync {
    /// The current login name
    fn login_name(&self) -> String;
}

/// Login identity of the user running kanna
#[derive(Debug, Clone, Default)]
pub struct OsIdentity;

impl Identity for OsIdentity {
    fn login_name(&self) -> String {
        whoami::username()
    }
}

/// The final merged configuration used to drive a remote connection.
///
/// Read-only; `host_name` is always present, null when neither the
/// invocation options nor the alias database supplied a host.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions(BTreeMap<String, Value>);

impl ResolvedOptions {
    /// Look up a resolved value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The resolved host name, if any
    pub fn host_name(&self) -> Option<&str> {
        self.0.get("host_name").and_then(Value::as_str)
    }

    /// The resolved user, if any
    pub fn user(&self) -> Option<&str> {
        self.0.get("user").and_then(Value::as_str)
    }

    /// The resolved port, if any
    pub fn port(&self) -> Option<u16> {
        self.0
            .get("port")
            .and_then(Value::as_u64)
            .and_then(|n| u16::try_from(n).ok())
    }

    /// The resolved identity files, if any
    pub fn keys(&self) -> Vec<String> {
        match self.0.get("keys") {
            Some(Value::Array(keys)) => keys
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The resolved proxy command, if any
    pub fn proxy_command(&self) -> Option<&str> {
        self.0.get("proxy_command").and_then(Value::as_str)
    }
}

impl FromIterator<(String, Value)> for ResolvedOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolve connection options from the invocation options.
///
/// Merge order, last writer wins unless noted:
/// 1. `host_name` seeded to null.
/// 2. Every entry the alias database supplies for the `host` option.
/// 3. The login identity as `user`, when neither the database nor the
///    invocation options carry one.
/// 4. The invocation options themselves. `host` and `sudo` are control
///    inputs, not connection options, and are skipped; `key` becomes the
///    single-element `keys` list.
/// 5. `host_name` forced to the literal `host` option when supplied.
///
/// Total: any invocation options, including an empty mapping, produce a
/// result. No connectivity is validated here.
pub fn resolve(
    options: &Options,
    aliases: &dyn HostAliasSource,
    identity: &dyn Identity,
) -> ResolvedOptions {
    let mut resolved = BTreeMap::new();
    resolved.insert("host_name".to_string(), Value::Null);

    if let Some(host) = options.host() {
        for (key, value) in aliases.lookup(host) {
            resolved.insert(key, value);
        }
    }

    let db_user = resolved.get("user").and_then(Value::as_str).is_some();
    if !db_user && options.str_value("user").is_none() {
        let login = identity.login_name();
        debug!("No user resolved, falling back to login identity: {}", login);
        resolved.insert("user".to_string(), Value::from(login));
    }

    for (key, value) in options.iter() {
        match key.as_str() {
            "host" | "sudo" => {}
            "key" => {
                resolved.insert("keys".to_string(), Value::Array(vec![value.clone()]));
            }
            _ => {
                resolved.insert(key.clone(), value.clone());
            }
        }
    }

    if let Some(host) = options.host() {
        resolved.insert("host_name".to_string(), Value::from(host));
    }

    ResolvedOptions(resolved)
}
