//! Document parser orchestration
//!
//! Drives the per-line pipeline over one raw document: normalize, classify,
//! extract, assemble. Parsing is a pure function of the document text and the
//! injected track registry — no state survives between calls, so independent
//! documents can be parsed concurrently without coordination.

use std::sync::Arc;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, info};

use crate::app::models::{DocumentKind, RaceDate, RawDocument};
use crate::app::services::track_registry::TrackRegistry;
use crate::constants::VENUE_LINE_MARKER;

use super::assembler::{ParseEvent, SectionAssembler};
use super::classifier::{LineRole, classify};
use super::extractor::{
    extract_payouts, extract_program_entrant, extract_race_header, extract_result_entrant,
};
use super::normalizer::normalize_line;
use super::stats::{ParseResult, ParseStats};

/// Parser for complete program/result documents.
///
/// Holds only the injected track registry; each [`DocumentParser::parse`]
/// call owns its own assembler state.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    registry: Arc<TrackRegistry>,
}

impl DocumentParser {
    /// Create a parser with a track registry dependency.
    pub fn new(registry: Arc<TrackRegistry>) -> Self {
        Self { registry }
    }

    /// Parse one document into completed races and statistics.
    ///
    /// Never fails: malformed lines degrade to noise, incomplete races and
    /// mismatched sections are dropped and counted, and an empty result is a
    /// valid outcome the caller distinguishes from a missing input.
    pub fn parse(&self, document: &RawDocument) -> ParseResult {
        info!(
            "Parsing {} document for {}",
            document.kind, document.date
        );

        let mut stats = ParseStats::new();
        let mut assembler = SectionAssembler::new(document.kind);
        let mut document_date: Option<RaceDate> = None;

        for raw_line in document.text.lines() {
            stats.lines_total += 1;
            let line = normalize_line(raw_line);

            let ctx = assembler.context();
            let event = match classify(&line, &ctx) {
                LineRole::TrackStart(code) => ParseEvent::TrackStart(code),
                LineRole::TrackEnd(code) => ParseEvent::TrackEnd(code),
                LineRole::RaceHeader => {
                    ParseEvent::RaceHeader(extract_race_header(&line, document.kind))
                }
                LineRole::EntrantLine => self.entrant_event(&line, document.kind, &mut stats),
                LineRole::PayoutLine => {
                    let payouts = extract_payouts(&line);
                    stats.payout_entries += payouts.len();
                    ParseEvent::Payouts(payouts)
                }
                LineRole::Noise => {
                    stats.lines_noise += 1;
                    if document_date.is_none() {
                        document_date = scan_preamble_date(&line);
                    }
                    self.venue_fallback(&line, &assembler)
                }
            };

            assembler.apply(event, &mut stats);
        }

        let races = assembler.finish(&mut stats);
        stats.races_emitted = races.len();

        info!("Parsed {} document: {}", document.kind, stats.summary());

        ParseResult {
            races,
            document_date,
            stats,
        }
    }

    fn entrant_event(
        &self,
        line: &str,
        kind: DocumentKind,
        stats: &mut ParseStats,
    ) -> ParseEvent {
        let event = match kind {
            DocumentKind::Program => extract_program_entrant(line).map(ParseEvent::ProgramEntrant),
            DocumentKind::Result => extract_result_entrant(line).map(ParseEvent::ResultEntrant),
        };

        match event {
            Some(event) => {
                stats.entrant_rows += 1;
                event
            }
            None => {
                // Candidate did not survive extraction; reclassify as noise
                stats.entrant_rows_rejected += 1;
                stats.record_error(format!("unparseable entrant line: {}", line.trim_end()));
                debug!("Rejected entrant candidate: {}", line.trim_end());
                ParseEvent::Noise
            }
        }
    }

    /// Fallback entry for documents lacking explicit section markers: a
    /// preamble line naming a known venue opens its track section.
    fn venue_fallback(&self, line: &str, assembler: &SectionAssembler) -> ParseEvent {
        if !assembler.is_outside_track() || !line.contains(VENUE_LINE_MARKER) {
            return ParseEvent::Noise;
        }

        let code = self.registry.resolve_name(line);
        if code.is_unknown() {
            ParseEvent::Noise
        } else {
            debug!("Venue preamble opened track section {}", code);
            ParseEvent::TrackStart(code)
        }
    }
}

/// Scan a preamble line for the published date, e.g. `第 6日          2025/ 7/ 9`.
fn scan_preamble_date(line: &str) -> Option<RaceDate> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\d{4})/\s*(\d{1,2})/\s*(\d{1,2})").unwrap());

    let caps = re.captures(line)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(RaceDate::from)
}
