//! Command-line argument definitions for the boatrace processor
//!
//! Defines the complete CLI interface using the clap derive API. The
//! `process` surface preserves the long-standing invocation contract:
//! positional year/month/day, range validation with descriptive messages,
//! and append semantics on the output sinks.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::app::models::DocumentKind;
use crate::{Error, Result};

/// CLI arguments for the boatrace document processor
///
/// Converts the official program (番組表) and result (競走成績) text dumps
/// into normalized CSV records for analytics pipelines.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "boatrace-processor",
    version,
    about = "Convert official boatrace text dumps into normalized CSV records",
    long_about = "Converts the fixed-width program and race-result text dumps published per \
                  race day into normalized per-race CSV rows. Handles full-width digit \
                  variants, disqualification codes and historical column drift, and appends \
                  to the per-kind CSV sinks without overwriting previous days."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Suppress progress output; log warnings and errors only
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert one race day's documents to CSV rows (main command)
    Process(ProcessArgs),
    /// Print the track registry (venue codes and names)
    Tracks(TracksArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Race year, e.g. 2025
    #[arg(value_name = "YEAR")]
    pub year: u16,

    /// Race month, 1-12
    #[arg(value_name = "MONTH")]
    pub month: u8,

    /// Race day, 1-31
    #[arg(value_name = "DAY")]
    pub day: u8,

    /// Document kinds to convert
    #[arg(
        short = 'k',
        long = "kind",
        value_enum,
        default_value = "both",
        help = "Document kinds to convert"
    )]
    pub kind: KindSelection,

    /// Input directory holding raw dumps
    ///
    /// Expects `programs/` and `results/` subdirectories with files named
    /// like `b250709_u8.txt` / `k250709_u8.txt`. Defaults to data/raw.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        help = "Input directory holding raw dumps"
    )]
    pub input_dir: Option<PathBuf>,

    /// Output directory for the CSV sinks
    ///
    /// Rows append to race_programs.csv / race_results.csv; the header row
    /// is written only when a sink is newly created. Defaults to data.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory for the CSV sinks"
    )]
    pub output_dir: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long = "config", value_name = "FILE", help = "Path to a JSON configuration file")]
    pub config_file: Option<PathBuf>,

    /// Path to a JSON track table overriding the built-in one
    #[arg(
        long = "track-table",
        value_name = "FILE",
        help = "Path to a JSON track table overriding the built-in one"
    )]
    pub track_table: Option<PathBuf>,
}

impl ProcessArgs {
    /// Validate the date components against the documented ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1900..=2100).contains(&self.year) {
            return Err(Error::invalid_argument(format!(
                "year must be between 1900 and 2100: {}",
                self.year
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(Error::invalid_argument(format!(
                "month must be between 1 and 12: {}",
                self.month
            )));
        }
        if !(1..=31).contains(&self.day) {
            return Err(Error::invalid_argument(format!(
                "day must be between 1 and 31: {}",
                self.day
            )));
        }
        Ok(())
    }

    /// Document kinds selected for this run, in processing order.
    pub fn kinds(&self) -> Vec<DocumentKind> {
        match self.kind {
            KindSelection::Program => vec![DocumentKind::Program],
            KindSelection::Result => vec![DocumentKind::Result],
            KindSelection::Both => vec![DocumentKind::Program, DocumentKind::Result],
        }
    }
}

/// Which document kinds to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindSelection {
    Program,
    Result,
    Both,
}

/// Arguments for the tracks command
#[derive(Debug, Clone, Parser)]
pub struct TracksArgs {
    /// Output format for the registry listing
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "text",
        help = "Output format for the registry listing"
    )]
    pub format: OutputFormat,

    /// Path to a JSON track table overriding the built-in one
    #[arg(
        long = "track-table",
        value_name = "FILE",
        help = "Path to a JSON track table overriding the built-in one"
    )]
    pub track_table: Option<PathBuf>,
}

/// Registry listing formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
