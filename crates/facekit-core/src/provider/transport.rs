//! HTTP transport used by providers.
//!
//! Providers build an [`HttpRequest`] and hand it to a [`Transport`]; the
//! transport executes it and returns the raw body, or an error for any
//! non-2xx status. Retries and connection pooling belong here, not in the
//! provider layer.

use crate::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Form fields or headers, ordered by key.
pub type Params = BTreeMap<String, String>;

/// Request header map. Later inserts win on key collision.
pub type Headers = BTreeMap<String, String>;

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` fields
    Form(Params),
    /// JSON document
    Json(Value),
}

/// A fully-built request, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Form fields of this request, if it has a form body.
    pub fn form(&self) -> Option<&Params> {
        match &self.body {
            RequestBody::Form(params) => Some(params),
            RequestBody::Json(_) => None,
        }
    }
}

/// Executes provider requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response body.
    ///
    /// Non-2xx statuses must come back as [`ProviderError::Http`] so callers can
    /// tell client errors apart from network failures.
    async fn execute(&self, request: HttpRequest) -> ProviderResult<String>;
}

/// Production transport over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with an optional per-request timeout.
    pub fn new(timeout: Option<Duration>) -> ProviderResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> ProviderResult<String> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            RequestBody::Form(params) => builder.form(params),
            RequestBody::Json(value) => builder.json(value),
        };

        let resp = builder.send().await?;
        let status = resp.status();

        if !status.is_success() {
            // The status alone decides how callers react; the body is best effort.
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory transport that records requests and replays canned bodies.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MockTransport {
        requests: Mutex<Vec<HttpRequest>>,
        responses: Mutex<VecDeque<ProviderResult<String>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Queue a successful body.
        pub(crate) fn respond(self, body: Value) -> Self {
            self.push(Ok(body.to_string()))
        }

        /// Queue a raw body string (e.g. empty).
        pub(crate) fn respond_raw(self, body: &str) -> Self {
            self.push(Ok(body.to_string()))
        }

        /// Queue an HTTP status error.
        pub(crate) fn fail(self, status: u16) -> Self {
            self.push(Err(ProviderError::Http {
                status,
                body: String::new(),
            }))
        }

        /// Queue a network failure.
        pub(crate) fn disconnect(self) -> Self {
            self.push(Err(ProviderError::Network("connection refused".to_string())))
        }

        fn push(self, response: ProviderResult<String>) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, request: HttpRequest) -> ProviderResult<String> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }
}
