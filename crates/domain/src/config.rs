//! Client configuration
//!
//! Every client instance owns its own `ClientConfig`; there are no
//! process-wide defaults to mutate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_LOCALE, DEFAULT_RATE_LIMIT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::errors::{Result, ZoteroError};
use crate::types::LibraryRef;

/// Retry policy accepted for API parity.
///
/// The client stores this value but never retries a request. It exists so
/// callers can already express a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    #[serde(with = "duration_ms")]
    pub initial_interval: Duration,
    #[serde(with = "duration_ms")]
    pub max_interval: Duration,
    pub multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(30),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Settings threaded into every call of one client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub library: LibraryRef,
    pub api_key: Option<String>,
    /// API root without a trailing slash.
    pub base_url: String,
    pub locale: String,
    pub timeout: Duration,
    /// Minimum spacing between requests; zero disables limiting.
    pub rate_limit: Duration,
    /// Stored only; see [`RetryConfig`].
    pub retry: Option<RetryConfig>,
    pub user_agent: String,
}

impl ClientConfig {
    /// Start building a configuration for `library`.
    pub fn builder(library: LibraryRef) -> ClientConfigBuilder {
        ClientConfigBuilder::new(library)
    }

    /// Defaults for `library`.
    pub fn new(library: LibraryRef) -> Result<Self> {
        Self::builder(library).build()
    }

    /// True when an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    library: LibraryRef,
    api_key: Option<String>,
    base_url: String,
    locale: String,
    timeout: Duration,
    rate_limit: Duration,
    retry: Option<RetryConfig>,
    user_agent: String,
}

impl ClientConfigBuilder {
    fn new(library: LibraryRef) -> Self {
        Self {
            library,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_limit: DEFAULT_RATE_LIMIT,
            retry: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    /// Point the client at another API root, e.g. a local server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn rate_limit(mut self, interval: Duration) -> Self {
        self.rate_limit = interval;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        if self.library.library_id.trim().is_empty() {
            return Err(ZoteroError::Config("library id must not be empty".into()));
        }

        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ZoteroError::Config("base url must not be empty".into()));
        }

        Ok(ClientConfig {
            library: self.library,
            api_key: self.api_key,
            base_url,
            locale: self.locale,
            timeout: self.timeout,
            rate_limit: self.rate_limit,
            retry: self.retry,
            user_agent: self.user_agent,
        })
    }
}
