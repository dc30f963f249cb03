//! Pagination types
//!
//! Page outcomes, the result accumulator, and the run report.

use crate::fetch::FetchOutcome;
use crate::record::TradeRecord;
use crate::types::JsonValue;
use tracing::warn;

/// Classified result of one page
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// The page carried items; holds the records after the leading summary row
    Records(Vec<TradeRecord>),
    /// The page confirmed there is no data (missing or empty `items`)
    Empty,
    /// The page could not be retrieved
    Unavailable,
}

impl PageOutcome {
    /// Classify a fetch result
    pub fn from_fetch(page: u32, outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Fetched(body) => Self::from_body(page, &body),
            FetchOutcome::Unavailable { .. } => Self::Unavailable,
        }
    }

    /// Classify a response body.
    ///
    /// The first item of `items` is a totals row and is dropped. Items that
    /// are not objects are skipped with a warning.
    pub fn from_body(page: u32, body: &JsonValue) -> Self {
        let items = match body.get("items").and_then(JsonValue::as_array) {
            Some(items) if !items.is_empty() => items,
            _ => return Self::Empty,
        };

        let records = items
            .iter()
            .skip(1)
            .filter_map(|item| match TradeRecord::from_item(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(page, error = %e, "Skipping malformed item");
                    None
                }
            })
            .collect();

        Self::Records(records)
    }

    /// Records carried by this page (empty unless `Records`)
    pub fn records(&self) -> &[TradeRecord] {
        match self {
            Self::Records(records) => records,
            Self::Empty | Self::Unavailable => &[],
        }
    }

    /// Whether this page ends the run
    pub fn ends_stream(&self) -> bool {
        !matches!(self, Self::Records(_))
    }
}

/// Why pagination stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Pages in the final batch reported no data
    EndOfData {
        /// Pages that returned no items
        pages: Vec<u32>,
    },
    /// Pages in the final batch could not be retrieved
    Unavailable {
        /// Pages that exhausted their retries
        pages: Vec<u32>,
    },
    /// The final batch reached the highest representable page number
    PageLimit {
        /// Last page requested
        last_page: u32,
    },
}

impl StopReason {
    /// Decide whether a finished batch stops the run.
    ///
    /// Unavailable pages take precedence over empty ones.
    pub fn from_batch(outcomes: &[(u32, PageOutcome)]) -> Option<Self> {
        let unavailable: Vec<u32> = outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, PageOutcome::Unavailable))
            .map(|(page, _)| *page)
            .collect();
        if !unavailable.is_empty() {
            return Some(Self::Unavailable { pages: unavailable });
        }

        let empty: Vec<u32> = outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, PageOutcome::Empty))
            .map(|(page, _)| *page)
            .collect();
        if !empty.is_empty() {
            return Some(Self::EndOfData { pages: empty });
        }

        None
    }

    /// Pages that triggered the stop
    pub fn pages(&self) -> &[u32] {
        match self {
            Self::EndOfData { pages } | Self::Unavailable { pages } => pages,
            Self::PageLimit { last_page } => std::slice::from_ref(last_page),
        }
    }
}

/// Records accumulated over a run, in page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    records: Vec<TradeRecord>,
}

impl ResultSet {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records of one batch
    pub fn extend(&mut self, records: impl IntoIterator<Item = TradeRecord>) {
        self.records.extend(records);
    }

    /// Number of records collected
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the records
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<TradeRecord> {
        self.records
    }
}

/// Configuration for batch pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Pages requested concurrently per batch
    pub batch_size: u32,
    /// First page number
    pub start_page: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            start_page: 1,
        }
    }
}

impl PaginationConfig {
    /// Create a config with the given batch size, starting at page 1
    pub fn new(batch_size: u32) -> Self {
        Self {
            batch_size: batch_size.max(1),
            ..Self::default()
        }
    }
}

/// Summary of a finished pagination run
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationReport {
    /// Everything collected
    pub results: ResultSet,
    /// Batches issued
    pub batches: u32,
    /// Pages requested
    pub pages: u32,
    /// Records contributed by the final batch
    pub last_batch_records: usize,
    /// Why the run ended
    pub stop: StopReason,
}
