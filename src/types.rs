//! Common types used throughout the scraper
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Ordered form-encoded request body
pub type FormPairs = Vec<(String, String)>;

// ============================================================================
// Period Kind
// ============================================================================

/// Granularity of the statistics period (`priodKind`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeriodKind {
    /// Yearly totals, periods formatted as `YYYY`
    #[default]
    Year,
    /// Monthly totals, periods formatted as `YYYYMM`
    Month,
}

impl PeriodKind {
    /// Wire value sent to the endpoint
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodKind::Year => "YEAR",
            PeriodKind::Month => "MONTH",
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}
