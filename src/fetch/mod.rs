//! Page fetching
//!
//! Retrieves one page of results with bounded retries.
//!
//! # Overview
//!
//! A [`Fetcher`] sends the search form for a page through the shared
//! [`HttpClient`](crate::http::HttpClient). Transport failures are logged and
//! retried after a fixed delay; once the attempts run out the page resolves
//! to [`FetchOutcome::Unavailable`] instead of an error, so the paginator can
//! treat every page uniformly.

mod fetcher;

pub use fetcher::{FetchOutcome, Fetcher, PageSource, RetryPolicy};
