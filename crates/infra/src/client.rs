//! Zotero Web API client handle
//!
//! One handle per library. Clones share the HTTP connection pool and the
//! rate limiter; [`ZoteroClient::with_cancellation`] produces a clone whose
//! calls all abort when the given token fires.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use zotero_common::privacy::redact_optional;
use zotero_common::RequestLimiter;
use zotero_core::request::{library_url, root_url, user_url, with_query};
use zotero_domain::{ClientConfig, LibraryRef, QueryParams, Result};

use crate::http::{HttpClient, Transport};

/// Typed client over one remote library
#[derive(Clone)]
pub struct ZoteroClient {
    config: Arc<ClientConfig>,
    transport: Transport,
}

impl ZoteroClient {
    /// Build a client with its own HTTP stack from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Build a client over an existing [`HttpClient`].
    pub fn with_http_client(config: ClientConfig, http: HttpClient) -> Self {
        if config.retry.is_some() {
            debug!("retry configuration supplied; requests are still sent once");
        }
        debug!(
            library = %config.library.path(),
            base_url = %config.base_url,
            api_key = %redact_optional(config.api_key.as_deref()),
            rate_limit_ms = config.rate_limit.as_millis() as u64,
            "creating Zotero client"
        );

        let limiter = if config.rate_limit.is_zero() {
            RequestLimiter::disabled()
        } else {
            RequestLimiter::new(config.rate_limit)
        };
        let transport = Transport::new(http, config.api_key.clone(), limiter);

        Self { config: Arc::new(config), transport }
    }

    /// Clone bound to `cancel`; the rate limiter stays shared.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: self.transport.with_cancellation(cancel),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn library(&self) -> &LibraryRef {
        &self.config.library
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn library_url(&self, path: &str, params: Option<&QueryParams>) -> String {
        with_query(library_url(&self.config.base_url, &self.config.library, path), params)
    }

    pub(crate) fn root_url(&self, path: &str, params: Option<&QueryParams>) -> String {
        with_query(root_url(&self.config.base_url, path), params)
    }

    pub(crate) fn user_url(&self, path: &str, params: Option<&QueryParams>) -> String {
        with_query(user_url(&self.config.base_url, &self.config.library.library_id, path), params)
    }
}

impl std::fmt::Debug for ZoteroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoteroClient")
            .field("library", &self.config.library)
            .field("base_url", &self.config.base_url)
            .field("api_key", &redact_optional(self.config.api_key.as_deref()))
            .finish()
    }
}
