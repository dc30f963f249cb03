//! CLI arguments

use crate::types::PeriodKind;
use clap::Parser;
use std::path::PathBuf;

/// Scrape Korean trade statistics into a CSV file
#[derive(Parser, Debug)]
#[command(name = "tradedata-scraper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output file name, without the .csv extension
    pub filename: String,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Endpoint URL override
    #[arg(long)]
    pub endpoint: Option<String>,

    /// HS code filter: 2 (chapter), 4 (heading) or 6 (subheading) digits
    #[arg(long)]
    pub hs_code: Option<String>,

    /// Country filter (repeat or comma-separate for several)
    #[arg(long, value_delimiter = ',')]
    pub country: Vec<String>,

    /// Period granularity
    #[arg(long, value_enum)]
    pub period_kind: Option<PeriodKind>,

    /// First period, e.g. 2024 or 202401
    #[arg(long)]
    pub period_from: Option<String>,

    /// Last period, e.g. 2024 or 202412
    #[arg(long)]
    pub period_to: Option<String>,

    /// Pages requested concurrently per batch
    #[arg(long)]
    pub batch_size: Option<u32>,

    /// Maximum simultaneous connections
    #[arg(long)]
    pub max_connections: Option<usize>,

    /// Directory receiving the CSV file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
