//! Error types for the face recognition client.
//!
//! Errors are split by where they arise: configuration resolution fails at
//! construction time, provider errors come out of individual API calls.

use thiserror::Error;

/// Top-level error type for facekit operations.
#[derive(Error, Debug)]
pub enum FaceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider call errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// No provider registered under the requested name
    #[error("Unknown face provider: {0}")]
    UnknownProvider(String),

    /// A provider section exists but no driver of that name is built in
    #[error("Unsupported face provider driver '{driver}' (supported: {supported})")]
    UnsupportedDriver { driver: String, supported: String },

    /// A provider is configured but a credential is empty or unresolved
    #[error("Provider '{provider}' is missing '{key}'")]
    MissingCredential { provider: String, key: String },
}

/// Errors raised while talking to a face provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A required argument was missing or malformed; no request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (DNS, connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Payload could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ProviderError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the provider rejected the request with a 4xx status.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(code) if (400..=499).contains(&code))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Network(e.to_string())
    }
}

/// Convenience type alias for facekit results.
pub type Result<T> = std::result::Result<T, FaceError>;

/// Convenience type alias for provider call results.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
