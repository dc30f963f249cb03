// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Trade Data Scraper
//!
//! Retrieves paginated trade statistics from the Korea Customs Service
//! trade data portal and consolidates them into a single CSV file.
//!
//! ## Features
//!
//! - **Batch Pagination**: Pages fetched in fixed-size concurrent batches
//! - **Bounded Retries**: Fixed-delay retries, failures resolve to an outcome
//! - **Connection Cap**: One shared pool with a limit on in-flight requests
//! - **CSV Export**: Fixed 9-column, quote-all table
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tradedata_scraper::fetch::Fetcher;
//! use tradedata_scraper::http::HttpClient;
//! use tradedata_scraper::pagination::{BatchPaginator, PaginationConfig};
//! use tradedata_scraper::query::TradeQuery;
//! use tradedata_scraper::config::DEFAULT_ENDPOINT;
//!
//! #[tokio::main]
//! async fn main() -> tradedata_scraper::Result<()> {
//!     let query = TradeQuery::new().hs_code("7009").prepare()?;
//!     let fetcher = Fetcher::new(HttpClient::new()?, DEFAULT_ENDPOINT, query);
//!
//!     let report = BatchPaginator::new(PaginationConfig::default())
//!         .run(&fetcher)
//!         .await;
//!     println!("{} records", report.results.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────────┐   ┌──────────┐   ┌────────────┐
//! │  Query   │──▶│   Fetcher   │──▶│Paginator │──▶│ CSV Export │
//! │ HS level │   │ retry/delay │   │ batches  │   │ 9 columns  │
//! └──────────┘   └──────┬──────┘   └──────────┘   └────────────┘
//!                       │
//!                ┌──────┴──────┐
//!                │ HTTP client │
//!                │ pool + cap  │
//!                └─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Run configuration
pub mod config;

/// Trade statistics records
pub mod record;

/// Search payload construction
pub mod query;

/// Shared HTTP client
pub mod http;

/// Page fetching with retries
pub mod fetch;

/// Batch pagination
pub mod pagination;

/// CSV output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use record::TradeRecord;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
