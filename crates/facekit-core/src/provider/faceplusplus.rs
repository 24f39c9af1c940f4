//! Face++ provider.
//!
//! Every call is a form-encoded POST against the Face++ v3 API with
//! `api_key`/`api_secret` appended to the payload. Responses are JSON; an
//! empty or undecodable body is treated as "nothing returned".

use super::base::{BaseProvider, ProviderCore};
use super::transport::{Headers, Params, Transport};
use super::input::InputType;
use super::{AlbumPage, FaceProvider, FaceTokens, Outcome};
use crate::collection::{AlbumCollection, FaceCollection};
use crate::config::{resolve_env_var, ProviderConfig};
use crate::error::{ConfigError, ProviderError, ProviderResult};
use crate::models::{
    scalar_string, AlbumFields, Comparison, Face, FaceAlbum, FaceFields, SearchResult,
};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

/// Driver name used in configuration.
pub const DRIVER: &str = "face_plus_plus";

/// Face++ API root used when `base_url` is not configured.
pub const DEFAULT_BASE_URL: &str = "https://api-us.faceplusplus.com/facepp/v3";

const CREDENTIAL_KEYS: [&str; 2] = ["api_key", "api_secret"];

/// Attributes requested by `attributes()`. Order is part of the wire format.
const RETURN_ATTRIBUTES: [&str; 8] = [
    "gender",
    "age",
    "smiling",
    "headpose",
    "facequality",
    "blur",
    "eyestatus",
    "ethnicity",
];

/// Face++ provider.
pub struct FacePlusPlusProvider {
    core: ProviderCore,
}

impl FacePlusPlusProvider {
    /// Create a provider whose HTTP client is built on first use.
    ///
    /// Fails if either credential is empty or references an unset env var.
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            core: ProviderCore::new(DRIVER, Self::resolve(config)?),
        })
    }

    /// Create a provider that sends requests through `transport`.
    pub fn with_transport(
        config: &ProviderConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            core: ProviderCore::with_transport(DRIVER, Self::resolve(config)?, transport),
        })
    }

    fn resolve(config: &ProviderConfig) -> Result<ProviderConfig, ConfigError> {
        let credential = |key: &str, value: &str| {
            resolve_env_var(value).ok_or_else(|| ConfigError::MissingCredential {
                provider: DRIVER.to_string(),
                key: key.to_string(),
            })
        };
        Ok(ProviderConfig {
            api_key: credential("api_key", &config.api_key)?,
            api_secret: credential("api_secret", &config.api_secret)?,
            ..config.clone()
        })
    }

    /// POST a form and decode the JSON answer.
    async fn post(&self, resource: &str, params: Params) -> ProviderResult<Value> {
        let body = self
            .request(Method::POST, resource, params, Headers::new())
            .await?;
        Ok(decode_response(&body))
    }

    fn input_field(&self, input: &str) -> String {
        self.input_type(input).field_name()
    }

    /// Numbered image field for two-image calls: `image_url1`, `image_file1`,
    /// `image_base64_1`.
    fn numbered_field(&self, input: &str, n: u8) -> String {
        match self.input_type(input) {
            InputType::Base64 => format!("image_base64_{n}"),
            other => format!("{}{n}", other.field_name()),
        }
    }

    fn attribute_list() -> String {
        RETURN_ATTRIBUTES.join(",")
    }

    async fn detect_with(&self, mut params: Params, input: &str) -> ProviderResult<FaceCollection> {
        params.insert(self.input_field(input), input.to_string());
        let response = self.post("detect", params).await?;
        Ok(self.map_faces(records(&response, "faces")))
    }
}

/// Decode a response body; empty or invalid JSON decodes to `Null`.
fn decode_response(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::debug!("Face++ returned a non-JSON body: {e}");
        Value::Null
    })
}

/// The array under `key`, or nothing when the key is absent or not a list.
fn records(response: &Value, key: &str) -> Vec<Value> {
    response
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Face tokens sent either as a list or as a comma-joined string.
fn split_tokens(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Non-null value under `key`.
fn field(record: &Value, key: &str) -> Option<Value> {
    record.get(key).filter(|v| !v.is_null()).cloned()
}

fn text(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(scalar_string)
}

/// `error_message` in a 2xx body means the write didn't happen.
fn outcome_from_body(response: &Value) -> Outcome {
    match text(response, "error_message") {
        Some(message) => Outcome::rejected(message),
        None => Outcome::Applied,
    }
}

/// PHP-style truthiness: Face++ never receives empty parameters.
fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

impl BaseProvider for FacePlusPlusProvider {
    fn core(&self) -> &ProviderCore {
        &self.core
    }

    fn base_api_url(&self) -> String {
        match self.core.config_value("base_url") {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_BASE_URL.to_string(),
        }
    }

    fn reserved_params(&self) -> &'static [&'static str] {
        &CREDENTIAL_KEYS
    }

    /// Credentials are merged last.
    fn build_request_params(&self, mut params: Params) -> Params {
        params.extend(self.core.config_only(&CREDENTIAL_KEYS));
        params
    }

    fn map_face(&self, record: Value) -> Face {
        let fields = FaceFields {
            id: text(&record, "face_token"),
            attributes: field(&record, "attributes"),
            reference: field(&record, "face_rectangle"),
            user_id: text(&record, "user_id"),
        };
        Face::from_raw(record).map(fields)
    }

    fn map_album(&self, record: Value) -> FaceAlbum {
        let fields = AlbumFields {
            id: text(&record, "faceset_token"),
            name: text(&record, "display_name"),
            tags: text(&record, "tags"),
            faces: split_tokens(record.get("face_tokens")),
        };
        FaceAlbum::from_raw(record).map(fields)
    }
}

#[async_trait]
impl FaceProvider for FacePlusPlusProvider {
    fn name(&self) -> &str {
        DRIVER
    }

    async fn detect(&self, input: &str) -> ProviderResult<FaceCollection> {
        self.detect_with(Params::new(), input).await
    }

    async fn get_face(&self, face_id: &str) -> ProviderResult<Face> {
        let mut params = Params::new();
        params.insert("face_token".to_string(), face_id.to_string());
        let response = self.post("face/getdetail", params).await?;
        Ok(self.map_face(response))
    }

    async fn attributes(&self, input: &str) -> ProviderResult<FaceCollection> {
        let mut params = Params::new();
        params.insert("return_attributes".to_string(), Self::attribute_list());
        self.detect_with(params, input).await
    }

    async fn search(
        &self,
        input: &str,
        album_id: Option<&str>,
        extras: &Params,
    ) -> ProviderResult<SearchResult> {
        let album_id = album_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ProviderError::InvalidArgument("Album id is required".to_string()))?;

        let mut params = Params::new();
        params.insert("faceset_token".to_string(), album_id.to_string());
        params.insert(self.input_field(input), input.to_string());
        self.overlay_extras(&mut params, extras)?;

        let response = self.post("search", params).await?;
        let Some(entries) = response.get("results").and_then(Value::as_array) else {
            return Ok(SearchResult::default());
        };
        let entries = entries.clone();

        Ok(SearchResult::from_raw(response).set_results(entries, |item, raw| {
            item.with_confidence(&raw["confidence"])
                .with_id(text(raw, "face_token"))
        }))
    }

    async fn create_album(
        &self,
        name: &str,
        faces: &[String],
        extras: &Params,
    ) -> ProviderResult<Option<FaceAlbum>> {
        let mut params = Params::new();
        params.insert("display_name".to_string(), name.to_string());
        if !faces.is_empty() {
            let tokens: Vec<&str> = faces.iter().map(|f| f.trim()).collect();
            params.insert("face_tokens".to_string(), tokens.join(","));
        }
        // An empty field counts as unset, so a caller-supplied extra can fill it.
        params.retain(|_, value| is_truthy(value));
        self.overlay_extras(&mut params, extras)?;
        params.retain(|_, value| is_truthy(value));

        let response = self.post("faceset/create", params).await?;
        match text(&response, "faceset_token") {
            Some(album_id) => self.album(&album_id).await.map(Some),
            None => {
                tracing::debug!("Face++ created no album for '{name}'");
                Ok(None)
            }
        }
    }

    async fn update_album(
        &self,
        album_id: &str,
        name: &str,
        extras: &Params,
    ) -> ProviderResult<FaceAlbum> {
        let mut params = Params::new();
        params.insert("display_name".to_string(), name.to_string());
        params.insert("faceset_token".to_string(), album_id.to_string());
        self.overlay_extras(&mut params, extras)?;

        self.post("faceset/update", params).await?;
        self.album(album_id).await
    }

    async fn remove_album(&self, album_id: &str) -> ProviderResult<Outcome> {
        let mut params = Params::new();
        params.insert("check_empty".to_string(), "0".to_string());
        params.insert("faceset_token".to_string(), album_id.to_string());

        match self.post("faceset/delete", params).await {
            Ok(response) => Ok(outcome_from_body(&response)),
            Err(err) => Outcome::from_client_error(err),
        }
    }

    async fn albums(&self) -> ProviderResult<AlbumCollection> {
        let response = self.post("faceset/getfacesets", Params::new()).await?;
        Ok(self.map_albums(records(&response, "facesets")))
    }

    async fn albums_page(&self, page: &AlbumPage) -> ProviderResult<AlbumCollection> {
        let mut params = Params::new();
        params.insert("start".to_string(), page.start.max(1).to_string());
        if let Some(tags) = page.tags.as_deref().filter(|t| is_truthy(t)) {
            params.insert("tags".to_string(), tags.to_string());
        }
        let response = self.post("faceset/getfacesets", params).await?;
        Ok(self.map_albums(records(&response, "facesets")))
    }

    async fn album(&self, album_id: &str) -> ProviderResult<FaceAlbum> {
        let mut params = Params::new();
        params.insert("faceset_token".to_string(), album_id.to_string());
        let response = self.post("faceset/getdetail", params).await?;
        Ok(self.map_album(response))
    }

    async fn add_into_album(&self, album_id: &str, faces: FaceTokens) -> ProviderResult<Outcome> {
        let mut params = Params::new();
        params.insert("faceset_token".to_string(), album_id.to_string());
        params.insert("face_tokens".to_string(), faces.joined());

        let response = match self.post("faceset/addface", params).await {
            Ok(response) => response,
            Err(err) => return Outcome::from_client_error(err),
        };
        if let Some(message) = text(&response, "error_message") {
            return Ok(Outcome::rejected(message));
        }
        let failures = records(&response, "failure_detail");
        if failures.is_empty() {
            return Ok(Outcome::Applied);
        }

        let reasons: Vec<String> = failures
            .iter()
            .map(|f| {
                format!(
                    "{}: {}",
                    text(f, "face_token").unwrap_or_default(),
                    text(f, "reason").unwrap_or_default()
                )
            })
            .collect();
        tracing::debug!(album_id, failed = failures.len(), "Face++ refused some faces");
        Ok(Outcome::rejected(reasons.join("; ")))
    }

    async fn remove_face_from_album(
        &self,
        album_id: &str,
        faces: FaceTokens,
    ) -> ProviderResult<Outcome> {
        let mut params = Params::new();
        params.insert("faceset_token".to_string(), album_id.to_string());
        params.insert("face_tokens".to_string(), faces.joined());

        match self.post("faceset/removeface", params).await {
            Ok(response) => Ok(outcome_from_body(&response)),
            Err(err) => Outcome::from_client_error(err),
        }
    }

    async fn compare(&self, first: &str, second: &str) -> ProviderResult<Comparison> {
        let mut params = Params::new();
        params.insert(self.numbered_field(first, 1), first.to_string());
        params.insert(self.numbered_field(second, 2), second.to_string());

        let response = self.post("compare", params).await?;
        let confidence = response.get("confidence").cloned().unwrap_or_default();
        let thresholds = field(&response, "thresholds");
        Ok(Comparison::from_raw(response)
            .with_confidence(&confidence)
            .with_thresholds(thresholds))
    }
}
