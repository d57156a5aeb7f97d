//! Invocation options supplied at backend construction

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Caller-supplied configuration for a backend instance.
///
/// An arbitrary key/value mapping (host identity, user, port, sudo flag and
/// so on), immutable once the backend is constructed. Any key may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options(HashMap<String, Value>);

impl Options {
    /// Create an empty options mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, consuming and returning the mapping (builder style)
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a raw option value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up an option as a string
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Look up an option as a boolean
    pub fn bool_value(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Look up an option as a port number
    pub fn u16_value(&self, key: &str) -> Option<u16> {
        self.0
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u16::try_from(n).ok())
    }

    /// The target host alias, if supplied
    pub fn host(&self) -> Option<&str> {
        self.str_value("host")
    }

    /// The sudo flag, if supplied
    pub fn sudo(&self) -> Option<bool> {
        self.bool_value("sudo")
    }

    /// Iterate over all supplied options
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for Options {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Options {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_accessors() {
        let options = Options::new()
            .set("host", "example.com")
            .set("port", 2222)
            .set("sudo", false);

        assert_eq!(options.host(), Some("example.com"));
        assert_eq!(options.u16_value("port"), Some(2222));
        assert_eq!(options.sudo(), Some(false));
        assert_eq!(options.str_value("user"), None);
    }

    #[test]
    fn test_missing_and_mistyped_keys() {
        let options = Options::new().set("port", "not-a-number");

        assert_eq!(options.u16_value("port"), None);
        assert_eq!(options.bool_value("sudo"), None);
        assert!(options.get("host").is_none());
    }

    #[test]
    fn test_from_map() {
        let mut map = HashMap::new();
        map.insert("user".to_string(), json!("deploy"));
        let options = Options::from(map);

        assert_eq!(options.str_value("user"), Some("deploy"));
    }
}
