//! Output module
//!
//! Handles the CSV export of collected records.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - The fixed 9-column export schema
//! - Rendering the run timestamp column
//! - Writing quote-all CSV files into the output directory

mod writer;

pub use writer::{
    format_scrape_datetime, scrape_timestamp, write_csv, CsvExporter, ExportSummary, COLUMNS,
    SCRAPE_DATETIME_FORMAT,
};
