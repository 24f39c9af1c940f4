//! facekit core - client library for remote face recognition APIs.
//!
//! Wraps a face recognition provider's HTTP API (detection, attributes,
//! similarity search and album management) behind a provider-agnostic
//! contract, and normalizes the vendor's JSON into typed models.
//!
//! # Architecture
//!
//! ```text
//! Config → FaceManager → FaceProvider (Face++) → BaseProvider → Transport → JSON → Models
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use facekit_core::{Config, FaceManager};
//!
//! #[tokio::main]
//! async fn main() -> facekit_core::Result<()> {
//!     let manager = FaceManager::new(Config::load()?);
//!     let provider = manager.provider(None)?;
//!
//!     let faces = provider.detect("https://example.com/me.jpg").await?;
//!     println!("Found {} faces", faces.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;

// Re-exports for convenient access
pub use collection::{AlbumCollection, Collection, FaceCollection};
pub use config::{Config, ProviderConfig};
pub use error::{ConfigError, FaceError, ProviderError, ProviderResult, Result};
pub use models::{Comparison, Face, FaceAlbum, SearchItem, SearchResult};
pub use provider::{
    AlbumPage, FaceManager, FaceProvider, FaceTokens, InputType, Outcome, Params,
    ProviderFactory, Rejection,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
