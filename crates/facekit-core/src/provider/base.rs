//! Generic request/response layer shared by every provider.
//!
//! [`BaseProvider`] turns a resource path plus parameters into an
//! [`HttpRequest`], dispatches it through the provider's lazily-built
//! transport, and maps raw records into models. Concrete providers supply
//! the base URL and override the hooks that carry vendor knowledge.

use super::input::InputType;
use super::transport::{Headers, HttpRequest, HttpTransport, Params, RequestBody, Transport};
use crate::collection::{AlbumCollection, FaceCollection};
use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::models::{Face, FaceAlbum};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// State every provider carries: its name, its configuration and the transport handle.
pub struct ProviderCore {
    name: &'static str,
    config: ProviderConfig,
    transport: OnceLock<Arc<dyn Transport>>,
}

impl ProviderCore {
    /// Core whose HTTP transport is built on first use.
    pub fn new(name: &'static str, config: ProviderConfig) -> Self {
        Self {
            name,
            config,
            transport: OnceLock::new(),
        }
    }

    /// Core with a transport supplied up front.
    pub fn with_transport(
        name: &'static str,
        config: ProviderConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let core = Self::new(name, config);
        let _ = core.transport.set(transport);
        core
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The full provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// A single configuration value.
    pub fn config_value(&self, key: &str) -> Option<String> {
        self.config.get(key)
    }

    /// The configuration restricted to `keys`.
    pub fn config_only(&self, keys: &[&str]) -> Params {
        self.config.only(keys)
    }

    /// The transport, built on first call and reused afterwards.
    ///
    /// Concurrent first calls may each build a client; only one is kept.
    pub fn transport(&self) -> ProviderResult<Arc<dyn Transport>> {
        if let Some(transport) = self.transport.get() {
            return Ok(Arc::clone(transport));
        }
        let timeout = self.config.timeout_ms.map(Duration::from_millis);
        let built: Arc<dyn Transport> = Arc::new(HttpTransport::new(timeout)?);
        tracing::debug!(provider = self.name, "HTTP transport initialized");
        Ok(Arc::clone(self.transport.get_or_init(|| built)))
    }
}

/// Request building, dispatch and record mapping shared by providers.
#[async_trait]
pub trait BaseProvider: Send + Sync {
    fn core(&self) -> &ProviderCore;

    /// Root URL all resources hang off.
    fn base_api_url(&self) -> String;

    /// Parameter names callers may never pass as extras.
    fn reserved_params(&self) -> &'static [&'static str] {
        &[]
    }

    fn default_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    /// Join the base URL and a resource with exactly one slash.
    fn build_url(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_api_url().trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }

    fn input_type(&self, image: &str) -> InputType {
        InputType::classify(image)
    }

    /// Final shaping of every outgoing payload.
    fn build_request_params(&self, params: Params) -> Params {
        params
    }

    /// Overlay caller extras onto `params` without replacing fields already set.
    ///
    /// Fails before anything is sent if an extra uses a reserved name.
    fn overlay_extras(&self, params: &mut Params, extras: &Params) -> ProviderResult<()> {
        if let Some(key) = extras
            .keys()
            .find(|key| self.reserved_params().contains(&key.as_str()))
        {
            return Err(ProviderError::InvalidArgument(format!(
                "'{key}' is reserved and cannot be passed as an extra attribute"
            )));
        }
        for (key, value) in extras {
            params.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Ok(())
    }

    /// Form-encoded request.
    async fn request(
        &self,
        method: Method,
        resource: &str,
        params: Params,
        headers: Headers,
    ) -> ProviderResult<String> {
        let body = RequestBody::Form(self.build_request_params(params));
        self.dispatch(method, resource, body, headers).await
    }

    /// JSON request.
    async fn json(
        &self,
        method: Method,
        resource: &str,
        params: Params,
        headers: Headers,
    ) -> ProviderResult<String> {
        let body = RequestBody::Json(serde_json::to_value(self.build_request_params(params))?);
        self.dispatch(method, resource, body, headers).await
    }

    /// Merge headers over the defaults, build the URL and execute.
    async fn dispatch(
        &self,
        method: Method,
        resource: &str,
        body: RequestBody,
        headers: Headers,
    ) -> ProviderResult<String> {
        let mut merged = self.default_headers();
        merged.extend(headers);

        let request = HttpRequest {
            method,
            url: self.build_url(resource),
            headers: merged,
            body,
        };
        tracing::debug!(
            provider = self.core().name(),
            method = %request.method,
            resource,
            "Sending provider request"
        );

        self.core().transport()?.execute(request).await
    }

    /// Map one provider record into a face. The default only keeps the raw record.
    fn map_face(&self, record: Value) -> Face {
        Face::from_raw(record)
    }

    /// Map one provider record into an album. The default only keeps the raw record.
    fn map_album(&self, record: Value) -> FaceAlbum {
        FaceAlbum::from_raw(record)
    }

    fn map_faces(&self, records: Vec<Value>) -> FaceCollection {
        records.into_iter().map(|r| self.map_face(r)).collect()
    }

    fn map_albums(&self, records: Vec<Value>) -> AlbumCollection {
        records.into_iter().map(|r| self.map_album(r)).collect()
    }
}
