//! Face provider abstraction.
//!
//! [`FaceProvider`] is the vendor-neutral contract callers program against.
//! [`BaseProvider`] holds the request/response plumbing every vendor shares,
//! and each vendor module wires the contract to its own endpoints.

pub(crate) mod base;
pub(crate) mod factory;
pub(crate) mod faceplusplus;
pub(crate) mod input;
pub(crate) mod transport;

pub use base::{BaseProvider, ProviderCore};
pub use factory::{FaceManager, ProviderFactory};
pub use faceplusplus::FacePlusPlusProvider;
pub use input::InputType;
pub use transport::{Headers, HttpRequest, HttpTransport, Params, RequestBody, Transport};

use crate::collection::{AlbumCollection, FaceCollection};
use crate::error::{ProviderError, ProviderResult};
use crate::models::{Comparison, Face, FaceAlbum, SearchResult};
use async_trait::async_trait;

/// Operations every face provider exposes.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn FaceProvider>` for dynamic dispatch).
#[async_trait]
pub trait FaceProvider: Send + Sync {
    /// Provider name for logging (e.g., "face_plus_plus").
    fn name(&self) -> &str;

    /// Detect faces in a URL, base64 or file image.
    async fn detect(&self, input: &str) -> ProviderResult<FaceCollection>;

    /// Fetch a single face by its token.
    async fn get_face(&self, face_id: &str) -> ProviderResult<Face>;

    /// Detect faces along with their attributes (age, gender, smile, ...).
    async fn attributes(&self, input: &str) -> ProviderResult<FaceCollection>;

    /// Search an album for faces similar to the one in `input`.
    ///
    /// `album_id` is required; `None` fails before any request is sent.
    async fn search(
        &self,
        input: &str,
        album_id: Option<&str>,
        extras: &Params,
    ) -> ProviderResult<SearchResult>;

    /// Create an album, optionally seeded with face tokens.
    ///
    /// Returns `None` when the provider doesn't hand back an album id.
    async fn create_album(
        &self,
        name: &str,
        faces: &[String],
        extras: &Params,
    ) -> ProviderResult<Option<FaceAlbum>>;

    /// Rename/update an album and return its current state.
    async fn update_album(
        &self,
        album_id: &str,
        name: &str,
        extras: &Params,
    ) -> ProviderResult<FaceAlbum>;

    async fn remove_album(&self, album_id: &str) -> ProviderResult<Outcome>;

    async fn albums(&self) -> ProviderResult<AlbumCollection>;

    /// One page of albums, optionally restricted to those carrying `page.tags`.
    async fn albums_page(&self, page: &AlbumPage) -> ProviderResult<AlbumCollection>;

    async fn album(&self, album_id: &str) -> ProviderResult<FaceAlbum>;

    async fn add_into_album(&self, album_id: &str, faces: FaceTokens) -> ProviderResult<Outcome>;

    async fn remove_face_from_album(
        &self,
        album_id: &str,
        faces: FaceTokens,
    ) -> ProviderResult<Outcome>;

    /// Score how likely the faces in two images belong to the same person.
    async fn compare(&self, first: &str, second: &str) -> ProviderResult<Comparison>;
}

/// Position and filter for a paged album listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumPage {
    /// 1-based offset of the first album
    pub start: u32,
    /// Comma-separated tags an album must carry
    pub tags: Option<String>,
}

impl Default for AlbumPage {
    fn default() -> Self {
        Self {
            start: 1,
            tags: None,
        }
    }
}

impl AlbumPage {
    pub fn starting_at(start: u32) -> Self {
        Self {
            start: start.max(1),
            ..Self::default()
        }
    }

    pub fn tagged(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into()).filter(|t| !t.trim().is_empty());
        self
    }
}

/// Why a provider declined a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// HTTP status when the provider answered with a client error
    pub status: Option<u16>,
    pub message: String,
}

/// Result of an album write that the provider may decline.
///
/// A declined write (missing album, unknown face token) is a normal outcome;
/// only network failures and server errors surface as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Outcome::Rejected(Rejection {
            status: None,
            message: message.into(),
        })
    }

    /// Turn a 4xx error into a rejection; anything else stays an error.
    pub fn from_client_error(err: ProviderError) -> ProviderResult<Self> {
        match err {
            ProviderError::Http { status, body } if (400..=499).contains(&status) => {
                Ok(Outcome::Rejected(Rejection {
                    status: Some(status),
                    message: body,
                }))
            }
            other => Err(other),
        }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> bool {
        outcome.is_applied()
    }
}

/// One or more face tokens, sent comma-joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceTokens(Vec<String>);

impl FaceTokens {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined wire form.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl From<&str> for FaceTokens {
    fn from(token: &str) -> Self {
        FaceTokens(vec![token.to_string()])
    }
}

impl From<String> for FaceTokens {
    fn from(token: String) -> Self {
        FaceTokens(vec![token])
    }
}

impl From<Vec<String>> for FaceTokens {
    fn from(tokens: Vec<String>) -> Self {
        FaceTokens(tokens)
    }
}

impl From<Vec<&str>> for FaceTokens {
    fn from(tokens: Vec<&str>) -> Self {
        FaceTokens(tokens.into_iter().map(String::from).collect())
    }
}

impl From<&[String]> for FaceTokens {
    fn from(tokens: &[String]) -> Self {
        FaceTokens(tokens.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for FaceTokens {
    fn from(tokens: [&str; N]) -> Self {
        FaceTokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_tokens_join() {
        assert_eq!(FaceTokens::from("a").joined(), "a");
        assert_eq!(FaceTokens::from(["a", "b"]).joined(), "a,b");
        assert_eq!(FaceTokens::from(vec!["x".to_string()]).as_slice().len(), 1);
    }

    #[test]
    fn test_album_page_defaults() {
        assert_eq!(AlbumPage::default().start, 1);
        assert_eq!(AlbumPage::starting_at(0).start, 1);
        assert_eq!(AlbumPage::starting_at(3).tagged(" ").tags, None);
        assert_eq!(
            AlbumPage::starting_at(3).tagged("team").tags.as_deref(),
            Some("team")
        );
    }

    #[test]
    fn test_outcome_bool_view() {
        assert!(bool::from(Outcome::Applied));
        assert!(!bool::from(Outcome::rejected("INVALID_FACESET_TOKEN")));
    }

    #[test]
    fn test_client_error_becomes_rejection() {
        let outcome = Outcome::from_client_error(ProviderError::Http {
            status: 400,
            body: "INVALID_FACESET_TOKEN".to_string(),
        })
        .unwrap();
        match outcome {
            Outcome::Rejected(rejection) => {
                assert_eq!(rejection.status, Some(400));
                assert_eq!(rejection.message, "INVALID_FACESET_TOKEN");
            }
            Outcome::Applied => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_server_error_stays_error() {
        let err = Outcome::from_client_error(ProviderError::Http {
            status: 502,
            body: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.status(), Some(502));

        let err = Outcome::from_client_error(ProviderError::Network("reset".into())).unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
