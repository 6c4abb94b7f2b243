//! Boatrace Processor Library
//!
//! A Rust library for converting the official boatrace program (番組表) and
//! race result (競走成績) text dumps into normalized CSV records.
//!
//! This library provides tools for:
//! - Normalizing quasi-fixed-width Japanese race text (full-width digit and
//!   punctuation variants, boilerplate annotations)
//! - Classifying lines into track markers, race headers, entrant rows and
//!   payout rows
//! - Extracting typed fields with fixed-offset slicing and pattern-scan
//!   fallback
//! - Assembling track/race sections with an explicit state machine
//! - Flattening assembled races into constant-width CSV rows
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_emitter;
        pub mod race_text_parser;
        pub mod track_registry;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DocumentKind, Outcome, RaceDate, RaceRecord, RawDocument, TrackCode};
pub use app::services::race_text_parser::DocumentParser;
pub use app::services::track_registry::TrackRegistry;
pub use config::Config;

/// Result type alias for the boatrace processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that cross the library boundary.
///
/// Per-line and per-section parse failures are deliberately absent here: they
/// are recovered inside the parsing engine and surfaced only as counters in
/// [`app::services::race_text_parser::ParseStats`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input document missing or unreadable
    #[error("Input file not found: {path}")]
    ResourceNotFound { path: String },

    /// CSV sink writing error
    #[error("CSV write error: {message}")]
    CsvWrite {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Command-line argument out of range or malformed
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Track registry error
    #[error("Track registry error: {message}")]
    TrackRegistry { message: String },

    /// Date component error
    #[error("Date error: {message}")]
    Date { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a resource-not-found error for a missing input document
    pub fn resource_not_found(path: impl Into<String>) -> Self {
        Self::ResourceNotFound { path: path.into() }
    }

    /// Create a CSV write error with context
    pub fn csv_write(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvWrite {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a track registry error
    pub fn track_registry(message: impl Into<String>) -> Self {
        Self::TrackRegistry {
            message: message.into(),
        }
    }

    /// Create a date error
    pub fn date(message: impl Into<String>) -> Self {
        Self::Date {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvWrite {
            message: "CSV writing failed".to_string(),
            source: Some(error),
        }
    }
}
