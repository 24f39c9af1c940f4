//! Configuration validation.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate that the default provider is registered and values are sane.
    ///
    /// Credentials are not checked here: they may reference environment
    /// variables that are only set where a provider is actually built.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.default_provider.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_provider must not be empty".into(),
            ));
        }
        if self.provider(&self.default_provider).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "default_provider '{}' has no [providers.{}] section",
                self.default_provider, self.default_provider
            )));
        }
        for (name, provider) in &self.providers {
            if provider.timeout_ms == Some(0) {
                return Err(ConfigError::ValidationError(format!(
                    "providers.{name}.timeout_ms must be > 0"
                )));
            }
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unregistered_default() {
        let mut config = Config::default();
        config.default_provider = "kairos".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("kairos"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        if let Some(provider) = config.providers.get_mut("face_plus_plus") {
            provider.timeout_ms = Some(0);
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }
}
