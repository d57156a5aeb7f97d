//! Host-alias configuration database
//!
//! Per-host connection settings keyed by host alias, in the shape of an
//! OpenSSH client configuration file: `Host` blocks with glob patterns,
//! followed by directives. Lookups follow OpenSSH semantics where the first
//! obtained value for an option wins across matching blocks.

use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Queryable source of per-host-alias connection options.
///
/// Returns a partial mapping (`host_name`, `user`, `port`, `keys`,
/// `proxy_command`, ...) for a host alias; any key may be absent. Injected
/// into the SSH backend so tests can substitute a canned database.
pub trait HostAliasSource: Send + Sync {
    /// Look up all options the database supplies for `alias`
    fn lookup(&self, alias: &str) -> HashMap<String, Value>;
}

/// OpenSSH-style client configuration
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    blocks: Vec<HostBlock>,
}

/// One `Host` block: patterns plus the directives beneath it
#[derive(Debug, Clone)]
struct HostBlock {
    patterns: Vec<String>,
    entries: Vec<(String, Value)>,
}

impl ClientConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the configuration from the default locations.
    ///
    /// Tries `~/.ssh/config` first, then `/etc/ssh/ssh_config`. A missing or
    /// unreadable file yields an empty configuration, never an error.
    pub fn load_default() -> Self {
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".ssh").join("config");
            if user_config.exists() {
                return Self::load_from_file(&user_config);
            }
        }

        let system_config = Path::new("/etc/ssh/ssh_config");
        if system_config.exists() {
            return Self::load_from_file(system_config);
        }

        Self::new()
    }

    /// Load the configuration from a specific file, tolerating read failures
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loaded ssh client config from {}", path.display());
                Self::parse(&content)
            }
            Err(e) => {
                warn!("Failed to read ssh client config {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Parse configuration content.
    ///
    /// Directives outside any `Host` block are ignored, as are directives
    /// this backend has no use for.
    pub fn parse(content: &str) -> Self {
        let mut blocks = Vec::new();
        let mut current: Option<HostBlock> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (keyword, argument) = match split_directive(line) {
                Some(parts) => parts,
                None => continue,
            };

            if keyword == "host" {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                current = Some(HostBlock {
                    patterns: argument.split_whitespace().map(str::to_string).collect(),
                    entries: Vec::new(),
                });
                continue;
            }

            let block = match current.as_mut() {
                Some(block) => block,
                None => continue,
            };

            match keyword.as_str() {
                "hostname" => block
                    .entries
                    .push(("host_name".to_string(), Value::from(argument))),
                "user" => block.entries.push(("user".to_string(), Value::from(argument))),
                "port" => {
                    if let Ok(port) = argument.parse::<u64>() {
                        block.entries.push(("port".to_string(), Value::from(port)));
                    }
                }
                "identityfile" => block
                    .entries
                    .push(("keys".to_string(), Value::from(vec![argument]))),
                "proxycommand" => block
                    .entries
                    .push(("proxy_command".to_string(), Value::from(argument))),
                _ => {}
            }
        }

        if let Some(block) = current.take() {
            blocks.push(block);
        }

        Self { blocks }
    }
}

impl HostAliasSource for ClientConfig {
    fn lookup(&self, alias: &str) -> HashMap<String, Value> {
        let mut options = HashMap::new();

        for block in self.blocks.iter().filter(|b| block_matches(b, alias)) {
            for (key, value) in &block.entries {
                match options.entry(key.clone()) {
                    Entry::Vacant(entry) => {
                        entry.insert(value.clone());
                    }
                    Entry::Occupied(mut entry) => {
                        // Identity files accumulate across matching blocks;
                        // for every other option the first obtained value wins
                        if key == "keys" {
                            if let (Value::Array(existing), Value::Array(more)) =
                                (entry.get_mut(), value)
                            {
                                existing.extend(more.iter().cloned());
                            }
                        }
                    }
                }
            }
        }

        options
    }
}

/// Split a config line into a lowercased keyword and its argument.
///
/// Accepts both `Keyword argument` and `Keyword=argument` forms.
fn split_directive(line: &str) -> Option<(String, String)> {
    let (keyword, argument) = line.split_once(|c: char| c.is_whitespace() || c == '=')?;
    let argument = argument.trim_start_matches(|c: char| c.is_whitespace() || c == '=');
    if argument.is_empty() {
        return None;
    }
    Some((keyword.to_lowercase(), argument.trim().to_string()))
}

/// A block applies when some positive pattern matches and no negated one does
fn block_matches(block: &HostBlock, alias: &str) -> bool {
    let mut matched = false;
    for pattern in &block.patterns {
        if let Some(negated) = pattern.strip_prefix('!') {
            if glob_match(negated, alias) {
                return false;
            }
        } else if glob_match(pattern, alias) {
            matched = true;
        }
    }
    matched
}

/// Glob match supporting `*` (any run) and `?` (any single character)
fn glob_match(pattern: &str, candidate: &str) -> bool {
    fn matches(pattern: &[char], candidate: &[char]) -> bool {
        match (pattern.first(), candidate.first()) {
            (None, None) => true,
            (Some('*'), _) => {
                matches(&pattern[1..], candidate)
                    || (!candidate.is_empty() && matches(pattern, &candidate[1..]))
            }
            (Some('?'), Some(_)) => matches(&pattern[1..], &candidate[1..]),
            (Some(p), Some(c)) if p == c => matches(&pattern[1..], &candidate[1..]),
            _ => false,
        }
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();
    matches(&pattern, &candidate)
}
