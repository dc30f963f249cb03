//! Tests for pagination module

use super::*;
use crate::fetch::{FetchOutcome, PageSource};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

// ============================================================================
// Scripted page source
// ============================================================================

/// Serves canned outcomes by page number; unknown pages are empty
#[derive(Default)]
struct ScriptedSource {
    pages: HashMap<u32, FetchOutcome>,
    requested: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    fn new() -> Self {
        Self::default()
    }

    fn page(mut self, page: u32, body: Value) -> Self {
        self.pages.insert(page, FetchOutcome::Fetched(body));
        self
    }

    fn unavailable(mut self, page: u32) -> Self {
        self.pages.insert(
            page,
            FetchOutcome::Unavailable {
                attempts: 3,
                reason: "HTTP 500".to_string(),
            },
        );
        self
    }

    fn requested(&self) -> Vec<u32> {
        let mut pages = self.requested.lock().unwrap().clone();
        pages.sort_unstable();
        pages
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, page: u32) -> FetchOutcome {
        self.requested.lock().unwrap().push(page);
        self.pages
            .get(&page)
            .cloned()
            .unwrap_or_else(|| FetchOutcome::Fetched(json!({"items": []})))
    }
}

/// A response body with a totals row followed by `count` records
fn body(page: u32, count: usize) -> Value {
    let mut items = vec![json!({"rnum": 0, "expUsdAmt": 999_999})];
    items.extend((0..count).map(|i| {
        json!({
            "priodTitle": "2024",
            "cntyEnglNm": format!("Country {page}-{i}"),
            "englPrlstNm": "Goods",
            "expUsdAmt": i,
        })
    }));
    json!({ "items": items })
}

fn countries(report: &PaginationReport) -> Vec<String> {
    report
        .results
        .records()
        .iter()
        .map(|r| r.country.clone())
        .collect()
}

// ============================================================================
// PageOutcome Tests
// ============================================================================

#[test]
fn test_page_outcome_drops_header_row() {
    let outcome = PageOutcome::from_body(1, &body(1, 3));
    assert_eq!(outcome.records().len(), 3);
    assert_eq!(outcome.records()[0].country, "Country 1-0");
    assert!(!outcome.ends_stream());
}

#[test]
fn test_page_outcome_empty_items() {
    let outcome = PageOutcome::from_body(1, &json!({"items": []}));
    assert_eq!(outcome, PageOutcome::Empty);
    assert!(outcome.ends_stream());
}

#[test]
fn test_page_outcome_missing_items() {
    assert_eq!(
        PageOutcome::from_body(1, &json!({"message": "no data"})),
        PageOutcome::Empty
    );
    assert_eq!(
        PageOutcome::from_body(1, &json!({"items": null})),
        PageOutcome::Empty
    );
}

#[test]
fn test_page_outcome_header_only_is_not_end() {
    let outcome = PageOutcome::from_body(1, &body(1, 0));
    assert_eq!(outcome, PageOutcome::Records(vec![]));
    assert!(!outcome.ends_stream());
}

#[test]
fn test_page_outcome_skips_malformed_items() {
    let outcome = PageOutcome::from_body(
        1,
        &json!({"items": [{"rnum": 0}, "garbage", {"cntyEnglNm": "Chile"}]}),
    );
    assert_eq!(outcome.records().len(), 1);
    assert_eq!(outcome.records()[0].country, "Chile");
}

#[test]
fn test_page_outcome_from_unavailable_fetch() {
    let outcome = PageOutcome::from_fetch(
        2,
        FetchOutcome::Unavailable {
            attempts: 3,
            reason: "timeout".to_string(),
        },
    );
    assert_eq!(outcome, PageOutcome::Unavailable);
    assert!(outcome.records().is_empty());
}

// ============================================================================
// StopReason Tests
// ============================================================================

#[test]
fn test_stop_reason_none_when_all_pages_have_data() {
    let outcomes = vec![
        (1, PageOutcome::from_body(1, &body(1, 2))),
        (2, PageOutcome::from_body(2, &body(2, 0))),
    ];
    assert_eq!(StopReason::from_batch(&outcomes), None);
}

#[test]
fn test_stop_reason_unavailable_takes_precedence() {
    let outcomes = vec![
        (6, PageOutcome::Empty),
        (7, PageOutcome::Unavailable),
        (8, PageOutcome::Records(vec![])),
    ];
    let stop = StopReason::from_batch(&outcomes).unwrap();
    assert_eq!(stop, StopReason::Unavailable { pages: vec![7] });
    assert_eq!(stop.pages(), &[7]);
}

#[test]
fn test_stop_reason_end_of_data() {
    let outcomes = vec![(3, PageOutcome::Empty), (4, PageOutcome::Empty)];
    assert_eq!(
        StopReason::from_batch(&outcomes),
        Some(StopReason::EndOfData { pages: vec![3, 4] })
    );
}

// ============================================================================
// PaginationConfig / ResultSet Tests
// ============================================================================

#[test]
fn test_pagination_config_default() {
    let config = PaginationConfig::default();
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.start_page, 1);
    assert_eq!(PaginationConfig::new(0).batch_size, 1);
}

#[test]
fn test_result_set_accumulates() {
    let mut results = ResultSet::new();
    assert!(results.is_empty());

    results.extend(PageOutcome::from_body(1, &body(1, 2)).records().to_vec());
    results.extend(PageOutcome::from_body(2, &body(2, 1)).records().to_vec());

    assert_eq!(results.len(), 3);
    assert_eq!(results.into_records()[2].country, "Country 2-0");
}

// ============================================================================
// BatchPaginator Tests
// ============================================================================

#[tokio::test]
async fn test_batch_grows_by_batch_size_times_records() {
    let mut source = ScriptedSource::new();
    for page in 1..=5 {
        source = source.page(page, body(page, 4));
    }
    // Second batch (pages 6..=10) is empty by default

    let paginator = BatchPaginator::new(PaginationConfig::default());
    let report = paginator.run(&source).await;

    assert_eq!(report.batches, 2);
    assert_eq!(report.pages, 10);
    assert_eq!(report.results.len(), 5 * 4);
    assert_eq!(report.last_batch_records, 0);
    assert_eq!(
        report.stop,
        StopReason::EndOfData {
            pages: vec![6, 7, 8, 9, 10]
        }
    );
}

#[tokio::test]
async fn test_stops_after_batch_with_empty_page() {
    let source = ScriptedSource::new()
        .page(1, body(1, 2))
        .page(2, body(2, 2))
        .page(3, body(3, 2))
        .page(4, json!({"items": []}))
        .page(5, body(5, 2))
        .page(6, body(6, 2));

    let paginator = BatchPaginator::new(PaginationConfig::new(3));
    let report = paginator.run(&source).await;

    assert_eq!(report.batches, 2);
    // Page 6 belongs to the stopping batch; page 7 is never requested
    assert_eq!(source.requested(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(report.stop, StopReason::EndOfData { pages: vec![4] });
}

#[tokio::test]
async fn test_two_batch_scenario_keeps_stopping_batch_records() {
    let source = ScriptedSource::new()
        .page(1, body(1, 2))
        .page(2, body(2, 2))
        .page(3, json!({"items": []}))
        .page(4, body(4, 1));

    let paginator = BatchPaginator::new(PaginationConfig::new(2));
    let report = paginator.run(&source).await;

    assert_eq!(source.requested(), vec![1, 2, 3, 4]);
    assert_eq!(report.batches, 2);
    assert_eq!(report.pages, 4);
    assert_eq!(report.last_batch_records, 1);
    assert_eq!(
        countries(&report),
        vec!["Country 1-0", "Country 1-1", "Country 2-0", "Country 2-1", "Country 4-0"]
    );
}

#[tokio::test]
async fn test_unavailable_page_stops_run() {
    let source = ScriptedSource::new()
        .page(1, body(1, 1))
        .unavailable(2)
        .page(3, body(3, 1))
        .page(4, body(4, 1));

    let paginator = BatchPaginator::new(PaginationConfig::new(2));
    let report = paginator.run(&source).await;

    assert_eq!(source.requested(), vec![1, 2]);
    assert_eq!(report.batches, 1);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.stop, StopReason::Unavailable { pages: vec![2] });
}

#[tokio::test]
async fn test_missing_items_stops_run() {
    let source = ScriptedSource::new()
        .page(1, body(1, 1))
        .page(2, json!({"error": "session expired"}));

    let paginator = BatchPaginator::new(PaginationConfig::new(2));
    let report = paginator.run(&source).await;

    assert_eq!(report.batches, 1);
    assert_eq!(report.stop, StopReason::EndOfData { pages: vec![2] });
}

#[tokio::test]
async fn test_records_follow_page_order() {
    let source = ScriptedSource::new()
        .page(1, body(1, 1))
        .page(2, body(2, 1))
        .page(3, body(3, 1));

    let paginator = BatchPaginator::new(PaginationConfig::new(4));
    let report = paginator.run(&source).await;

    assert_eq!(
        countries(&report),
        vec!["Country 1-0", "Country 2-0", "Country 3-0"]
    );
}

#[tokio::test]
async fn test_first_batch_empty_collects_nothing() {
    let source = ScriptedSource::new();

    let paginator = BatchPaginator::new(PaginationConfig::default());
    let report = paginator.run(&source).await;

    assert!(report.results.is_empty());
    assert_eq!(report.batches, 1);
    assert_eq!(source.requested(), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_custom_start_page() {
    let source = ScriptedSource::new().page(10, body(10, 2));

    let paginator = BatchPaginator::new(PaginationConfig {
        batch_size: 2,
        start_page: 10,
    });
    let report = paginator.run(&source).await;

    assert_eq!(source.requested(), vec![10, 11]);
    assert_eq!(report.results.len(), 2);
}

#[tokio::test]
async fn test_stops_at_highest_page_number() {
    let source = (u32::MAX - 4..=u32::MAX)
        .fold(ScriptedSource::new(), |source, page| source.page(page, body(page, 1)));

    let paginator = BatchPaginator::new(PaginationConfig {
        batch_size: 3,
        start_page: u32::MAX - 4,
    });
    let report = paginator.run(&source).await;

    assert_eq!(report.batches, 2);
    assert_eq!(report.pages, 5);
    assert_eq!(report.results.len(), 5);
    assert_eq!(report.last_batch_records, 2);
    assert_eq!(
        report.stop,
        StopReason::PageLimit {
            last_page: u32::MAX
        }
    );
    assert_eq!(report.stop.pages(), &[u32::MAX]);
    assert_eq!(source.requested(), (u32::MAX - 4..=u32::MAX).collect::<Vec<_>>());
}
