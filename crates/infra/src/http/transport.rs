//! One HTTP exchange against the Zotero API
//!
//! Every exchange except the storage upload waits on the shared rate limiter
//! first. Statuses of 400 and above become [`ZoteroError::Api`] carrying the
//! raw body; callers never see a partially decoded success.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use zotero_common::privacy::redact_optional;
use zotero_common::RequestLimiter;
use zotero_core::attachment::Precondition;
use zotero_domain::constants::{
    API_VERSION, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, HEADER_API_KEY, HEADER_API_VERSION,
    HEADER_IF_UNMODIFIED_SINCE_VERSION,
};
use zotero_domain::{Result, ZoteroError};

use super::client::HttpClient;

/// Status, headers and full body of a completed exchange
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Exchange {
    /// Header value as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Header value parsed as an unsigned integer.
    pub fn numeric_header(&self, name: &'static str) -> Result<u64> {
        let value = self.header(name).ok_or(ZoteroError::MissingHeader(name))?;
        value
            .trim()
            .parse()
            .map_err(|_| ZoteroError::InvalidHeader { name, value: value.to_string() })
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(ZoteroError::from)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fail with [`ZoteroError::UnexpectedStatus`] unless the status is one of `accepted`.
    pub fn expect_status(self, accepted: &[u16]) -> Result<Self> {
        if accepted.contains(&self.status) {
            Ok(self)
        } else {
            Err(ZoteroError::UnexpectedStatus { status: self.status, body: self.body_text() })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    RateLimited,
    Direct,
}

/// Executes exchanges with the API key, protocol version and rate limit applied
#[derive(Clone)]
pub struct Transport {
    http: HttpClient,
    api_key: Option<String>,
    limiter: RequestLimiter,
    cancel: CancellationToken,
}

impl Transport {
    pub fn new(http: HttpClient, api_key: Option<String>, limiter: RequestLimiter) -> Self {
        Self { http, api_key, limiter, cancel: CancellationToken::new() }
    }

    /// Same transport, shared limiter, bound to `cancel`.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self { cancel, ..self.clone() }
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    fn authorized(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, url).header(HEADER_API_VERSION, API_VERSION);
        if let Some(key) = self.api_key.as_deref().filter(|key| !key.is_empty()) {
            builder = builder.header(HEADER_API_KEY, key);
        }
        builder
    }

    /// Read exchange: no body, no conditional headers.
    pub async fn read(&self, method: Method, url: &str) -> Result<Exchange> {
        let builder = self.authorized(method.clone(), url);
        self.execute(&method, url, builder, Gate::RateLimited).await
    }

    /// Write exchange. `version > 0` adds `If-Unmodified-Since-Version`;
    /// a body adds the JSON content type.
    pub async fn write(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        version: u64,
    ) -> Result<Exchange> {
        let mut builder = self.authorized(method.clone(), url);
        if version > 0 {
            debug!(version, "conditional write");
            builder = builder.header(HEADER_IF_UNMODIFIED_SINCE_VERSION, version.to_string());
        }
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, CONTENT_TYPE_JSON).body(body);
        }
        self.execute(&method, url, builder, Gate::RateLimited).await
    }

    /// Form-encoded file authorization request with `If-None-Match`/`If-Match`.
    pub async fn authorize(
        &self,
        url: &str,
        form: &str,
        precondition: &Precondition,
    ) -> Result<Exchange> {
        let (name, value) = precondition.header();
        debug!(header = name, value, "file authorization precondition");
        let builder = self
            .authorized(Method::POST, url)
            .header(CONTENT_TYPE, CONTENT_TYPE_FORM)
            .header(name, value)
            .body(form.to_string());
        self.execute(&Method::POST, url, builder, Gate::RateLimited).await
    }

    /// Multipart POST to a storage host. Skips the rate limiter and the API
    /// headers, which belong to the API only.
    pub async fn upload(&self, url: &str, form: Form) -> Result<Exchange> {
        let builder = self.http.request(Method::POST, url).multipart(form);
        self.execute(&Method::POST, url, builder, Gate::Direct).await
    }

    async fn execute(
        &self,
        method: &Method,
        url: &str,
        builder: RequestBuilder,
        gate: Gate,
    ) -> Result<Exchange> {
        if gate == Gate::RateLimited {
            self.limiter.acquire(&self.cancel).await.map_err(|_| ZoteroError::Cancelled)?;
        }

        debug!(
            %method,
            url,
            api_key = %redact_optional(self.api_key.as_deref()),
            api_version = API_VERSION,
            "making request"
        );

        let exchange = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!(%method, url, "request cancelled");
                return Err(ZoteroError::Cancelled);
            }
            result = self.round_trip(builder) => result?,
        };

        debug!(
            %method,
            url,
            status = exchange.status,
            body_len = exchange.body.len(),
            "response received"
        );

        if exchange.status >= 400 {
            warn!(%method, url, status = exchange.status, "API error");
            return Err(ZoteroError::Api { status: exchange.status, body: exchange.body_text() });
        }

        Ok(exchange)
    }

    async fn round_trip(&self, builder: RequestBuilder) -> Result<Exchange> {
        let response = self.http.send(builder).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = self.http.read_body(response).await?;
        Ok(Exchange { status, headers, body })
    }
}
