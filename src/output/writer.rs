//! CSV export
//!
//! Writes collected records as a quote-all, newline-terminated CSV table.

use crate::error::{Error, Result, ResultExt};
use crate::record::TradeRecord;
use chrono::{DateTime, Local, TimeZone};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Exported column names, in order
pub const COLUMNS: [&str; 9] = [
    "ScrapeDatetime",
    "Year",
    "Country",
    "Goods",
    "ExportWeightTon",
    "ExportValueKUSD",
    "ImportWeightTon",
    "ImportValueKUSD",
    "BalanceOfTradeKUSD",
];

/// Format used for the `ScrapeDatetime` column
pub const SCRAPE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a run timestamp for the `ScrapeDatetime` column
pub fn format_scrape_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(SCRAPE_DATETIME_FORMAT).to_string()
}

/// Timestamp for a run starting now, in local time
pub fn scrape_timestamp() -> String {
    format_scrape_datetime(&Local::now())
}

/// Write records as CSV to any writer.
///
/// Every row gets the same `scraped_at` value. Returns the number of data rows.
pub fn write_csv<W: Write>(writer: W, records: &[TradeRecord], scraped_at: &str) -> Result<usize> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(COLUMNS)?;
    for record in records {
        csv.write_record(std::iter::once(scraped_at).chain(record.values()))?;
    }
    csv.flush()?;

    Ok(records.len())
}

/// Outcome of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// File written
    pub path: PathBuf,
    /// Data rows written (header excluded)
    pub rows: usize,
}

/// Writes `<dir>/<name>.csv` files
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    /// Create an exporter writing into `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path the export for `name` will be written to
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.csv")))
    }

    /// Write the records, replacing any previous file of the same name
    pub fn export(
        &self,
        name: &str,
        records: &[TradeRecord],
        scraped_at: &str,
    ) -> Result<ExportSummary> {
        let path = self.path_for(name)?;

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        let rows = write_csv(file, records, scraped_at)?;
        info!(path = %path.display(), rows, "Export written");

        Ok(ExportSummary { path, rows })
    }
}

/// The export name is a bare file stem
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_value("filename", "must not be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::invalid_value(
            "filename",
            format!("'{name}' must be a file name without directories"),
        ));
    }
    Ok(())
}
