//! Retrying page fetcher

use crate::http::HttpClient;
use crate::query::PreparedQuery;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of fetching one page
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The endpoint answered with a JSON document
    Fetched(JsonValue),
    /// Every attempt failed
    Unavailable {
        /// Attempts made before giving up
        attempts: u32,
        /// Cause of the last failure
        reason: String,
    },
}

impl FetchOutcome {
    /// Check if the page was retrieved
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// Check if the page could not be retrieved
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Anything that can produce pages by number
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a single page; never fails, unavailability is an outcome
    async fn fetch_page(&self, page: u32) -> FetchOutcome;
}

/// Retry policy for page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per page, including the first
    pub max_attempts: u32,
    /// Fixed pause after every failed attempt
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// Fetches result pages from the trade statistics endpoint
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: HttpClient,
    url: String,
    query: PreparedQuery,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Create a fetcher with the default retry policy
    pub fn new(client: HttpClient, url: impl Into<String>, query: PreparedQuery) -> Self {
        Self {
            client,
            url: url.into(),
            query,
            policy: RetryPolicy::default(),
        }
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl PageSource for Fetcher {
    async fn fetch_page(&self, page: u32) -> FetchOutcome {
        let form = self.query.form(page);
        let max_attempts = self.policy.max_attempts;
        let mut reason = String::from("no attempt made");

        for attempt in 1..=max_attempts {
            match self.client.post_form(&self.url, &form).await {
                Ok(body) => {
                    debug!(page, attempt, "Page fetched");
                    return FetchOutcome::Fetched(body);
                }
                Err(e) => {
                    warn!(page, attempt, max_attempts, error = %e, "Request failed on page {page}");
                    reason = e.to_string();

                    if !e.is_retryable() {
                        return FetchOutcome::Unavailable {
                            attempts: attempt,
                            reason,
                        };
                    }
                }
            }

            tokio::time::sleep(self.policy.delay).await;
        }

        warn!(page, max_attempts, "Giving up on page {page}");
        FetchOutcome::Unavailable {
            attempts: max_attempts,
            reason,
        }
    }
}
