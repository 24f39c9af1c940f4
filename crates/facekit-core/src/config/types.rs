//! Sub-configuration structs and the per-provider settings view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Settings for a single face provider.
///
/// `api_key` and `api_secret` support `${ENV_VAR}` syntax. Keys the struct
/// doesn't name are kept in `extra` so vendor-specific settings survive a
/// load/save round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_key: String,

    /// API secret (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_secret: String,

    /// Override for the provider's API root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout handed to the HTTP transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Any other provider-specific keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// Default Face++ entry, reading credentials from the environment.
    pub fn face_plus_plus() -> Self {
        Self {
            api_key: "${FACEPLUS_API_KEY}".to_string(),
            api_secret: "${FACEPLUS_API_SECRET}".to_string(),
            ..Self::default()
        }
    }

    /// Plain key/secret pair, mostly for tests and embedders.
    pub fn with_credentials(api_key: &str, api_secret: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            ..Self::default()
        }
    }

    /// Single configuration value by key, as a string.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_key" => Some(self.api_key.clone()),
            "api_secret" => Some(self.api_secret.clone()),
            "base_url" => self.base_url.clone(),
            "timeout_ms" => self.timeout_ms.map(|t| t.to_string()),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Restrict the configuration to the given keys. Absent keys are skipped.
    pub fn only(&self, keys: &[&str]) -> BTreeMap<String, String> {
        keys.iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }

    /// Full configuration as a flat key/value mapping.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.extra.clone();
        map.extend(self.only(&["api_key", "api_secret", "base_url", "timeout_ms"]));
        map
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProviderConfig {
        let mut config = ProviderConfig::with_credentials("1234", "secret");
        config.base_url = Some("http://facepp.test".to_string());
        config.extra.insert("region".to_string(), "us".to_string());
        config
    }

    #[test]
    fn test_get_single_value() {
        let config = sample();
        assert_eq!(config.get("api_key").as_deref(), Some("1234"));
        assert_eq!(config.get("region").as_deref(), Some("us"));
        assert_eq!(config.get("timeout_ms"), None);
    }

    #[test]
    fn test_only_restricts_keys() {
        let config = sample();
        let subset = config.only(&["api_key", "api_secret", "missing"]);
        assert_eq!(subset.len(), 2);
        assert_eq!(subset["api_secret"], "secret");
    }

    #[test]
    fn test_to_map_includes_everything_present() {
        let map = sample().to_map();
        assert_eq!(map.len(), 4);
        assert_eq!(map["base_url"], "http://facepp.test");
    }

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }
}
