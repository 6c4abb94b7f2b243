//! Parsing statistics and result structures

use crate::app::models::{RaceDate, RaceRecord};

/// Cap on retained per-line error messages; counters keep counting past it.
const MAX_RECORDED_ERRORS: usize = 100;

/// Counters accumulated over one document parse.
///
/// Recovered parse failures (malformed lines, dropped races and sections)
/// live here rather than in the error type: they never abort a document and
/// callers inspect them as data.
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Lines read from the document
    pub lines_total: usize,
    /// Lines that classified or degraded to noise
    pub lines_noise: usize,
    /// Entrant rows successfully extracted
    pub entrant_rows: usize,
    /// Entrant candidates rejected by the extractor
    pub entrant_rows_rejected: usize,
    /// Payout entries collected
    pub payout_entries: usize,
    /// Completed races flushed to the output
    pub races_emitted: usize,
    /// Race drafts dropped below the completeness threshold
    pub races_dropped: usize,
    /// Track sections dropped for marker mismatch
    pub sections_dropped: usize,
    /// Recovered error descriptions, capped at `MAX_RECORDED_ERRORS`
    pub errors: Vec<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_error(&mut self, message: String) {
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }

    /// One-line human-readable summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} lines -> {} races ({} dropped, {} sections dropped, {} entrant rows)",
            self.lines_total,
            self.races_emitted,
            self.races_dropped,
            self.sections_dropped,
            self.entrant_rows
        )
    }
}

/// Outcome of parsing one document.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Completed races in document order
    pub races: Vec<RaceRecord>,
    /// Date found in the document preamble, for cross-checking the request
    pub document_date: Option<RaceDate>,
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }
}
