//! Pagination module
//!
//! Batch pagination over numbered pages with end-of-data detection.
//!
//! # Overview
//!
//! Pages are requested in fixed-size batches. Each batch is awaited as a
//! whole; its records are appended to the [`ResultSet`] in page order, and
//! the run stops after the first batch in which any page is empty, lacks
//! `items`, or could not be retrieved.

mod paginator;
mod types;

pub use paginator::BatchPaginator;
pub use types::{PageOutcome, PaginationConfig, PaginationReport, ResultSet, StopReason};

#[cfg(test)]
mod tests;
