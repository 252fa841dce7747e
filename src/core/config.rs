//! Read-only key/value lookup used for model identifiers, deployment versions
//! and base URLs.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::error::ChatInputError;

const BUNDLED_DEFAULTS: &str = include_str!("../../config/defaults.json");

/// Source of configuration properties. A missing key is `None`, never an error.
pub trait PropertyLookup: Send + Sync {
    fn get_property(&self, key: &str) -> Option<String>;
}

impl PropertyLookup for HashMap<String, String> {
    fn get_property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: PropertyLookup + ?Sized> PropertyLookup for Arc<T> {
    fn get_property(&self, key: &str) -> Option<String> {
        (**self).get_property(key)
    }
}

/// A JSON document addressed by dot-separated paths, e.g.
/// `models.replicate.llama.13b`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonConfig {
    root: Value,
}

impl JsonConfig {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(source: &str) -> Result<Self, ChatInputError> {
        let root = serde_json::from_str(source).map_err(|e| {
            ChatInputError::Configuration(format!("Failed to parse configuration: {e}"))
        })?;
        Ok(Self::new(root))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatInputError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            ChatInputError::Configuration(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&source)
    }

    /// Defaults compiled into the crate.
    pub fn bundled() -> Self {
        Self::parse_or_empty(BUNDLED_DEFAULTS)
    }

    /// Parse `source`, or log the failure and return a document with no keys.
    fn parse_or_empty(source: &str) -> Self {
        Self::from_json_str(source).unwrap_or_else(|e| {
            warn!(error = %e, "bundled configuration is invalid, every lookup will miss");
            Self::new(Value::Null)
        })
    }

    /// Shared handle to the bundled defaults, as builders expect it.
    pub fn shared() -> Arc<dyn PropertyLookup> {
        Arc::new(Self::bundled())
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.root, |node, segment| node.as_object()?.get(segment))
    }
}

impl PropertyLookup for JsonConfig {
    fn get_property(&self, key: &str) -> Option<String> {
        let value = match self.lookup(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        };
        if value.is_none() {
            debug!(key, "configuration key does not hold a scalar value");
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dot_path_lookup() {
        let config = JsonConfig::new(json!({
            "models": {"replicate": {"llama": {"13b": "13b-chat", "13b-chat-version": "abc"}}},
            "limits": {"max": 3, "enabled": true}
        }));

        assert_eq!(
            config.get_property("models.replicate.llama.13b").as_deref(),
            Some("13b-chat")
        );
        assert_eq!(
            config.get_property("models.replicate.llama.13b-chat-version").as_deref(),
            Some("abc")
        );
        assert_eq!(config.get_property("limits.max").as_deref(), Some("3"));
        assert_eq!(config.get_property("limits.enabled").as_deref(), Some("true"));
    }

    #[test]
    fn test_missing_and_non_scalar_keys_are_none() {
        let config = JsonConfig::new(json!({"models": {"replicate": {}}}));
        assert_eq!(config.get_property("models.replicate"), None);
        assert_eq!(config.get_property("models.replicate.llama.13b"), None);
        assert_eq!(config.get_property("models.replicate.llama"), None);
        assert_eq!(config.get_property(""), None);
    }

    #[test]
    fn test_bundled_defaults_parse() {
        assert!(JsonConfig::from_json_str(BUNDLED_DEFAULTS).is_ok());
        let config = JsonConfig::bundled();
        assert_eq!(
            config.get_property("models.replicate.llama.13b").as_deref(),
            Some("13b-chat")
        );
        assert!(config
            .get_property("models.replicate.llama.13b-chat-version")
            .is_some());
    }

    #[test]
    fn test_unparsable_defaults_degrade_to_empty_document() {
        let config = JsonConfig::parse_or_empty("{\"models\": ");
        assert_eq!(config, JsonConfig::new(Value::Null));
        assert_eq!(config.get_property("models.replicate.llama.13b"), None);
    }

    #[test]
    fn test_invalid_json_is_configuration_error() {
        assert!(matches!(
            JsonConfig::from_json_str("{not json"),
            Err(ChatInputError::Configuration(_))
        ));
        assert!(matches!(
            JsonConfig::from_path("/definitely/not/here.json"),
            Err(ChatInputError::Configuration(_))
        ));
    }

    #[test]
    fn test_hash_map_lookup() {
        let mut map = HashMap::new();
        map.insert("a.b".to_string(), "c".to_string());
        assert_eq!(map.get_property("a.b").as_deref(), Some("c"));
        assert_eq!(map.get_property("a"), None);
    }
}
