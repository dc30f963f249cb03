//! Batch paginator
//!
//! Walks page numbers in fixed-size concurrent batches until a batch
//! reports the end of the data.

use super::types::{PageOutcome, PaginationConfig, PaginationReport, ResultSet, StopReason};
use crate::fetch::PageSource;
use futures::future::join_all;
use tracing::{info, warn};

/// Drives a [`PageSource`] batch by batch
#[derive(Debug, Clone, Default)]
pub struct BatchPaginator {
    config: PaginationConfig,
}

impl BatchPaginator {
    /// Create a paginator
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Fetch batches until one of them contains an empty or unavailable page.
    ///
    /// All pages of a batch are awaited together; the next batch is issued
    /// only after every member resolved. Records of the stopping batch are
    /// kept.
    pub async fn run(&self, source: &dyn PageSource) -> PaginationReport {
        let batch_size = self.config.batch_size.max(1);
        let mut results = ResultSet::new();
        let mut first_page = self.config.start_page.max(1);
        let mut batch = 0u32;
        let mut pages = 0u32;

        loop {
            batch += 1;
            let last_page = first_page.saturating_add(batch_size - 1);
            let batch_pages: Vec<u32> = (first_page..=last_page).collect();
            let batch_len = batch_pages.len() as u32;

            let fetched = join_all(batch_pages.iter().map(|&page| source.fetch_page(page))).await;
            let outcomes: Vec<(u32, PageOutcome)> = batch_pages
                .iter()
                .zip(fetched)
                .map(|(&page, outcome)| (page, PageOutcome::from_fetch(page, outcome)))
                .collect();

            let batch_records = outcomes
                .iter()
                .flat_map(|(_, outcome)| outcome.records().iter().cloned())
                .collect::<Vec<_>>();
            let batch_count = batch_records.len();

            results.extend(batch_records);
            pages = pages.saturating_add(batch_len);
            let next_page = last_page.checked_add(1);

            info!(
                batch,
                pages_in_batch = batch_len,
                records = batch_count,
                total_pages = pages,
                total_records = results.len(),
                "Batch {batch} with {batch_len} pages: {batch_count} records collected. \
                 Total of {pages} pages processed and {} records collected",
                results.len()
            );

            let stop = match (StopReason::from_batch(&outcomes), next_page) {
                (Some(stop), _) => stop,
                (None, None) => StopReason::PageLimit { last_page },
                (None, Some(next)) => {
                    first_page = next;
                    continue;
                }
            };

            match &stop {
                StopReason::EndOfData { pages: empty } => {
                    info!(pages = ?empty, "There are no more data to collect");
                }
                StopReason::Unavailable { pages: failed } => {
                    warn!(pages = ?failed, "Pages unavailable after retries, stopping pagination");
                }
                StopReason::PageLimit { last_page } => {
                    warn!(last_page, "Highest page number reached, stopping pagination");
                }
            }

            return PaginationReport {
                results,
                batches: batch,
                pages,
                last_batch_records: batch_count,
                stop,
            };
        }
    }
}
