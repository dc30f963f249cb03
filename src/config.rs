//! Run configuration
//!
//! This module contains the configuration structures for a scraping run.
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration; a YAML or JSON file overrides only what it names.

use crate::error::{Error, Result};
use crate::fetch::RetryPolicy;
use crate::http::HttpClientConfig;
use crate::pagination::PaginationConfig;
use crate::query::TradeQuery;
use crate::types::{OptionStringExt, StringMap};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Endpoint serving the HS-code by country statistics grid
pub const DEFAULT_ENDPOINT: &str =
    "https://tradedata.go.kr/cts/hmpgEng/retrieveTradeHsCountryEng.do";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration of a scraping run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Endpoint receiving the search form
    pub endpoint: String,

    /// Search filters
    pub query: TradeQuery,

    /// HTTP client settings
    pub http: HttpSettings,

    /// Batching and retry settings
    pub pagination: PaginationSettings,

    /// Export settings
    pub output: OutputSettings,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query: TradeQuery::default(),
            http: HttpSettings::default(),
            pagination: PaginationSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl ScrapeConfig {
    /// Load a config file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Parse a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Check every setting; nothing touches the network before this passes
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.endpoint)?;
        self.query.prepare()?;

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be at least 1"));
        }
        if self.http.max_connections == 0 {
            return Err(Error::invalid_value("http.max_connections", "must be at least 1"));
        }
        if self.pagination.batch_size == 0 {
            return Err(Error::invalid_value("pagination.batch_size", "must be at least 1"));
        }
        if self.pagination.start_page == 0 {
            return Err(Error::invalid_value("pagination.start_page", "pages are numbered from 1"));
        }
        if self
            .pagination
            .start_page
            .checked_add(self.pagination.batch_size)
            .is_none()
        {
            return Err(Error::invalid_value(
                "pagination.start_page",
                "first batch runs past the highest page number",
            ));
        }
        if self.pagination.max_attempts == 0 {
            return Err(Error::invalid_value("pagination.max_attempts", "must be at least 1"));
        }

        Ok(())
    }

    /// HTTP client configuration derived from these settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_connections(self.http.max_connections)
            .headers(&self.http.headers)
            .user_agent(&self.http.user_agent);

        if let Some(cookie) = self.http.cookie.clone().none_if_empty() {
            builder = builder.header("Cookie", cookie);
        }

        builder.build()
    }

    /// Batch settings for the paginator
    pub fn pagination_config(&self) -> PaginationConfig {
        PaginationConfig {
            batch_size: self.pagination.batch_size,
            start_page: self.pagination.start_page,
        }
    }

    /// Retry settings for the fetcher
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.pagination.max_attempts,
            Duration::from_millis(self.pagination.retry_delay_ms),
        )
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum simultaneous in-flight requests
    pub max_connections: usize,

    /// User agent sent with every request
    pub user_agent: String,

    /// Static headers sent with every request
    pub headers: StringMap,

    /// Static `Cookie` header, if the endpoint demands one
    pub cookie: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 90,
            max_connections: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36"
                .to_string(),
            headers: default_headers(),
            cookie: None,
        }
    }
}

/// Headers the endpoint's own web UI sends with its Ajax search
fn default_headers() -> StringMap {
    [
        ("Accept", "application/json, text/javascript, */*; q=0.01"),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("Origin", "https://tradedata.go.kr"),
        ("Referer", "https://tradedata.go.kr/cts/index_eng.do"),
        ("Sec-Fetch-Dest", "empty"),
        ("Sec-Fetch-Mode", "cors"),
        ("Sec-Fetch-Site", "same-origin"),
        ("X-Requested-With", "XMLHttpRequest"),
        ("isAjax", "true"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Batching and retry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    /// Pages requested concurrently per batch
    pub batch_size: u32,

    /// First page to request
    pub start_page: u32,

    /// Attempts per page before it counts as unavailable
    pub max_attempts: u32,

    /// Pause after each failed attempt, in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            batch_size: 5,
            start_page: 1,
            max_attempts: 3,
            retry_delay_ms: 2000,
        }
    }
}

// ============================================================================
// Output Settings
// ============================================================================

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving `<name>.csv`
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}
