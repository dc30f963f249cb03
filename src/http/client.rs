//! HTTP client with a shared connection pool
//!
//! Provides the transport used by the page fetcher:
//! - One `reqwest::Client` shared by every request of a run
//! - A cap on simultaneous in-flight requests
//! - Static default headers
//! - Error classification for retry decisions

use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout for a single request, connect to last body byte
    pub timeout: Duration,
    /// Maximum number of simultaneous in-flight requests
    pub max_connections: usize,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(90),
            max_connections: 10,
            default_headers: StringMap::new(),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the in-flight request cap
    pub fn max_connections(mut self, max: usize) -> Self {
        self.config.max_connections = max;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Add several default headers
    pub fn headers(mut self, headers: &StringMap) -> Self {
        self.config
            .default_headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client shared by all page requests of a run
///
/// Cloning is cheap: clones share the connection pool and the in-flight cap.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<HttpClientConfig>,
    permits: Arc<Semaphore>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        if config.max_connections == 0 {
            return Err(Error::invalid_value("max_connections", "must be at least 1"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .pool_max_idle_per_host(config.max_connections)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let permits = Arc::new(Semaphore::new(config.max_connections));

        Ok(Self {
            client,
            config: Arc::new(config),
            permits,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Number of requests that could start right now without waiting
    pub fn available_connections(&self) -> usize {
        self.permits.available_permits()
    }

    /// Send one form-encoded POST and parse the JSON body.
    ///
    /// No retries happen here; failures are classified and returned.
    pub async fn post_form<F>(&self, url: &str, form: &F) -> Result<JsonValue>
    where
        F: Serialize + ?Sized,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| Error::Other("Connection limiter closed".to_string()))?;

        let mut req = self.client.post(url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.form(form).send().await.map_err(|e| self.classify(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), truncate(&body, 200)));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!(url, status = status.as_u16(), bytes = body.len(), "Request succeeded");

        serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("Response is not valid JSON: {e}")))
    }

    fn classify(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            return Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            };
        }
        Error::Http(e)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("available_connections", &self.permits.available_permits())
            .finish_non_exhaustive()
    }
}

/// Cut an error body down to something loggable
fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
