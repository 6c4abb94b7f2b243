//! Configuration management and validation.
//!
//! Provides the path layout for input documents and output sinks. Defaults
//! match the directory conventions the data pipeline has always used; a JSON
//! configuration file and CLI flags can override them layer by layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::models::{DocumentKind, RaceDate};
use crate::{Error, Result};

/// Processor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base directory holding raw input documents
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Subdirectory of `input_dir` with program dumps
    #[serde(default = "default_programs_subdir")]
    pub programs_subdir: PathBuf,

    /// Subdirectory of `input_dir` with result dumps
    #[serde(default = "default_results_subdir")]
    pub results_subdir: PathBuf,

    /// Directory receiving the CSV sinks
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Optional JSON track table overriding the built-in one
    #[serde(default)]
    pub track_table: Option<PathBuf>,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_programs_subdir() -> PathBuf {
    PathBuf::from("programs")
}

fn default_results_subdir() -> PathBuf {
    PathBuf::from("results")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            programs_subdir: default_programs_subdir(),
            results_subdir: default_results_subdir(),
            output_dir: default_output_dir(),
            track_table: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, filling absent fields with
    /// defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("invalid configuration {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Validate path components.
    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(Error::configuration("input_dir must not be empty"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::configuration("output_dir must not be empty"));
        }
        Ok(())
    }

    /// Input document path for a kind and date,
    /// e.g. `data/raw/results/k250709_u8.txt`.
    pub fn input_path(&self, kind: DocumentKind, date: &RaceDate) -> PathBuf {
        let subdir = match kind {
            DocumentKind::Program => &self.programs_subdir,
            DocumentKind::Result => &self.results_subdir,
        };
        self.input_dir.join(subdir).join(date.input_file_name(kind))
    }

    /// Output sink path for a kind, e.g. `data/race_results.csv`.
    pub fn output_path(&self, kind: DocumentKind) -> PathBuf {
        self.output_dir.join(kind.output_file_name())
    }
}
