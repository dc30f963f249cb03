//! CLI runner - executes a scraping run

use crate::cli::commands::Cli;
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::http::HttpClient;
use crate::output::{scrape_timestamp, CsvExporter, ExportSummary};
use crate::pagination::{BatchPaginator, StopReason};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// What a finished run did
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Batches issued
    pub batches: u32,
    /// Pages requested
    pub pages: u32,
    /// Records collected over the whole run
    pub records: usize,
    /// Records contributed by the final batch
    pub last_batch_records: usize,
    /// Why pagination ended
    pub stop: StopReason,
    /// The written file, if anything was collected
    pub export: Option<ExportSummary>,
    /// Wall-clock duration
    pub elapsed: Duration,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Effective configuration: file (or defaults) plus command-line overrides
    pub fn config(&self) -> Result<ScrapeConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => ScrapeConfig::default(),
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(code) = &self.cli.hs_code {
            config.query.hs_code.clone_from(code);
        }
        if !self.cli.country.is_empty() {
            config.query.countries.clone_from(&self.cli.country);
        }
        if let Some(kind) = self.cli.period_kind {
            config.query.period_kind = kind;
        }
        if let Some(from) = &self.cli.period_from {
            config.query.period_from.clone_from(from);
        }
        if let Some(to) = &self.cli.period_to {
            config.query.period_to.clone_from(to);
        }
        if let Some(size) = self.cli.batch_size {
            config.pagination.batch_size = size;
        }
        if let Some(max) = self.cli.max_connections {
            config.http.max_connections = max;
        }
        if let Some(dir) = &self.cli.output_dir {
            config.output.dir.clone_from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Run the scrape and export.
    ///
    /// Configuration problems fail before any request is sent. An empty
    /// result is reported, not treated as an error.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let config = self.config()?;
        let query = config.query.prepare()?;

        let exporter = CsvExporter::new(&config.output.dir);
        exporter.path_for(&self.cli.filename)?;

        debug!(?config, "Starting run");

        let report = {
            let client = HttpClient::with_config(config.http_client_config())?;
            let fetcher = Fetcher::new(client, &config.endpoint, query)
                .with_policy(config.retry_policy());
            BatchPaginator::new(config.pagination_config())
                .run(&fetcher)
                .await
        };

        info!(
            batches = report.batches,
            pages = report.pages,
            records = report.results.len(),
            last_batch_records = report.last_batch_records,
            "Pagination finished"
        );

        let export = if report.results.is_empty() {
            println!("No data was collected.");
            None
        } else {
            let summary = exporter.export(
                &self.cli.filename,
                report.results.records(),
                &scrape_timestamp(),
            )?;
            println!("Data saved in {}", summary.path.display());
            Some(summary)
        };

        let elapsed = start.elapsed();
        println!("Scraping time: {:.2} seconds", elapsed.as_secs_f64());

        Ok(RunSummary {
            batches: report.batches,
            pages: report.pages,
            records: report.results.len(),
            last_batch_records: report.last_batch_records,
            stop: report.stop,
            export,
            elapsed,
        })
    }
}
