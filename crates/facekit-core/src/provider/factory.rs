//! Provider construction by driver name.

use super::faceplusplus::{self, FacePlusPlusProvider};
use super::transport::Transport;
use super::FaceProvider;
use crate::config::{Config, ProviderConfig};
use crate::error::ConfigError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Factory that creates the provider registered under a driver name.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Driver names this build knows how to construct.
    pub const DRIVERS: &'static [&'static str] = &[faceplusplus::DRIVER];

    /// Create a provider for `driver` (case-insensitive) from its configuration.
    pub fn create(
        driver: &str,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn FaceProvider>, ConfigError> {
        Self::build(driver, config, None)
    }

    /// Like [`ProviderFactory::create`], but every request goes through `transport`.
    pub fn create_with_transport(
        driver: &str,
        config: &ProviderConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Arc<dyn FaceProvider>, ConfigError> {
        Self::build(driver, config, Some(transport))
    }

    fn build(
        driver: &str,
        config: &ProviderConfig,
        transport: Option<Arc<dyn Transport>>,
    ) -> Result<Arc<dyn FaceProvider>, ConfigError> {
        match driver.to_lowercase().as_str() {
            faceplusplus::DRIVER => {
                let provider = match transport {
                    Some(transport) => FacePlusPlusProvider::with_transport(config, transport)?,
                    None => FacePlusPlusProvider::new(config)?,
                };
                Ok(Arc::new(provider))
            }
            other => Err(ConfigError::UnsupportedDriver {
                driver: other.to_string(),
                supported: Self::DRIVERS.join(", "),
            }),
        }
    }
}

/// Resolves providers by name and keeps one instance per name.
pub struct FaceManager {
    config: Config,
    transport: Option<Arc<dyn Transport>>,
    providers: Mutex<HashMap<String, Arc<dyn FaceProvider>>>,
}

impl FaceManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            transport: None,
            providers: Mutex::new(HashMap::new()),
        }
    }

    /// Manager whose providers all share `transport`.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn default_provider_name(&self) -> &str {
        &self.config.default_provider
    }

    /// The provider registered as `name`, or the default one.
    ///
    /// The first successful call for a name builds the provider; later calls
    /// return the same instance.
    pub fn provider(&self, name: Option<&str>) -> Result<Arc<dyn FaceProvider>, ConfigError> {
        let name = name
            .unwrap_or(self.config.default_provider.as_str())
            .to_lowercase();

        let mut providers = self
            .providers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(provider) = providers.get(&name) {
            return Ok(Arc::clone(provider));
        }

        let config = self
            .config
            .provider(&name)
            .ok_or_else(|| ConfigError::UnknownProvider(name.clone()))?;
        let provider = match &self.transport {
            Some(transport) => {
                ProviderFactory::create_with_transport(&name, config, Arc::clone(transport))?
            }
            None => ProviderFactory::create(&name, config)?,
        };
        tracing::debug!(provider = %name, "Face provider created");

        providers.insert(name, Arc::clone(&provider));
        Ok(provider)
    }
}
