//! CLI module
//!
//! Command-line interface for a scraping run.
//!
//! The single positional argument is the output file name (no extension);
//! options override the configuration file.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{RunSummary, Runner};
