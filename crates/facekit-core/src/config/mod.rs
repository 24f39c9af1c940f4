//! Configuration management for facekit.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Providers are registered by name under `[providers.<name>]` and
//! one of them is designated as the default.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the provider used when none is requested explicitly.
pub const DEFAULT_PROVIDER: &str = "face_plus_plus";

/// Root configuration structure for facekit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider resolved when callers don't name one
    pub default_provider: String,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Provider registry, keyed by driver name
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(
            DEFAULT_PROVIDER.to_string(),
            ProviderConfig::face_plus_plus(),
        );
        Self {
            default_provider: DEFAULT_PROVIDER.to_string(),
            logging: LoggingConfig::default(),
            providers,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        let config = config.normalized()?;
        config.validate()?;
        Ok(config)
    }

    /// Lowercase driver names so `[providers.Face_Plus_Plus]` and
    /// `default_provider = "FACE_PLUS_PLUS"` refer to the same section.
    fn normalized(mut self) -> Result<Self, ConfigError> {
        let mut providers = BTreeMap::new();
        for (name, provider) in std::mem::take(&mut self.providers) {
            let key = name.to_lowercase();
            if providers.insert(key.clone(), provider).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "provider '{key}' is configured more than once"
                )));
            }
        }
        self.providers = providers;
        self.default_provider = self.default_provider.trim().to_lowercase();
        Ok(self)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.facekit.facekit/config.toml
    /// - Linux: ~/.config/facekit/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\facekit\config\config.toml
    ///
    /// Falls back to ~/.facekit/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "facekit", "facekit")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".facekit").join("config.toml")
            })
    }

    /// Look up a provider's configuration by driver name (case-insensitive).
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, provider)| provider)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_provider, "face_plus_plus");
        let fpp = config.provider("face_plus_plus").unwrap();
        assert_eq!(fpp.api_key, "${FACEPLUS_API_KEY}");
        assert_eq!(fpp.api_secret, "${FACEPLUS_API_SECRET}");
        assert!(fpp.base_url.is_none());
    }

    #[test]
    fn test_provider_lookup_is_case_insensitive() {
        let config = Config::default();
        assert!(config.provider("Face_Plus_Plus").is_some());
        assert!(config.provider("kairos").is_none());
    }

    #[test]
    fn test_from_toml_normalizes_provider_names() {
        let config = Config::from_toml(
            r#"
            default_provider = "Face_Plus_Plus"

            [providers.Face_Plus_Plus]
            api_key = "k"
            api_secret = "s"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_provider, "face_plus_plus");
        assert!(config.providers.contains_key("face_plus_plus"));
        assert_eq!(config.provider("FACE_PLUS_PLUS").unwrap().api_key, "k");
    }

    #[test]
    fn test_from_toml_rejects_names_differing_only_in_case() {
        let err = Config::from_toml(
            r#"
            [providers.face_plus_plus]
            api_key = "k"
            api_secret = "s"

            [providers.FACE_PLUS_PLUS]
            api_key = "k2"
            api_secret = "s2"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_provider_lookup_ignores_case_of_stored_keys() {
        let mut config = Config::default();
        config.providers.insert(
            "Kairos".to_string(),
            ProviderConfig::with_credentials("k", "s"),
        );
        assert!(config.provider("kairos").is_some());
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("default_provider"));
        assert!(toml.contains("[providers.face_plus_plus]"));
    }

    #[test]
    fn test_from_toml_with_extra_keys() {
        let config = Config::from_toml(
            r#"
            default_provider = "face_plus_plus"

            [providers.face_plus_plus]
            api_key = "1234"
            api_secret = "secret"
            base_url = "https://api-cn.faceplusplus.com/facepp/v3"
            timeout_ms = 5000
            region = "cn"
            "#,
        )
        .unwrap();

        let fpp = config.provider("face_plus_plus").unwrap();
        assert_eq!(fpp.api_key, "1234");
        assert_eq!(fpp.timeout_ms, Some(5000));
        assert_eq!(fpp.extra.get("region").map(String::as_str), Some("cn"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[providers.face_plus_plus]\napi_key = \"k\"\napi_secret = \"s\""
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.default_provider, DEFAULT_PROVIDER);
        assert_eq!(config.provider(DEFAULT_PROVIDER).unwrap().api_secret, "s");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let err = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
