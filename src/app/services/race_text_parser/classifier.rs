//! Line classification for race text documents
//!
//! Given a normalized line and the current section-nesting context, decide the
//! line's role. Classification never fails: anything unrecognized degrades to
//! [`LineRole::Noise`], since the upstream dumps are inconsistently formatted
//! across years and a hard failure on one odd line would cost the whole
//! document.

use std::sync::OnceLock;

use regex::Regex;

use crate::app::models::{DocumentKind, TrackCode};
use crate::constants::{FINISH_CODES, PROGRAM_DEADLINE_MARKER, payout_keywords, section_markers};

/// Role of one normalized line within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRole {
    /// Venue section opens, e.g. `24KBGN`
    TrackStart(TrackCode),
    /// Venue section closes, e.g. `24KEND`
    TrackEnd(TrackCode),
    /// Race header carrying number, distance and conditions
    RaceHeader,
    /// Candidate entrant row (programs: boat listing; results: finish row)
    EntrantLine,
    /// Payout pool row, including keyword-less continuation rows
    PayoutLine,
    /// Everything else; ignored by the assembler without ending the section
    Noise,
}

/// Section-nesting context the classifier needs.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext {
    pub kind: DocumentKind,
    pub in_track: bool,
    pub in_race: bool,
}

/// Classify one normalized line.
///
/// Rules are tried in priority order: section markers, race headers, entrant
/// rows, payout rows, noise.
pub fn classify(line: &str, ctx: &SectionContext) -> LineRole {
    let trimmed = line.trim();

    if let Some(code) = marker_code(
        trimmed,
        &[section_markers::PROGRAM_BEGIN, section_markers::RESULT_BEGIN],
    ) {
        return LineRole::TrackStart(code);
    }

    if let Some(code) = marker_code(
        trimmed,
        &[section_markers::PROGRAM_END, section_markers::RESULT_END],
    ) {
        return LineRole::TrackEnd(code);
    }

    if is_race_header(line, ctx.kind) {
        return LineRole::RaceHeader;
    }

    if ctx.in_race && is_entrant_candidate(line, ctx.kind) {
        return LineRole::EntrantLine;
    }

    if ctx.kind == DocumentKind::Result && ctx.in_race && is_payout_line(line) {
        return LineRole::PayoutLine;
    }

    LineRole::Noise
}

/// Match `NNBBGN`-style section markers and extract the 2-digit code.
fn marker_code(trimmed: &str, markers: &[&str]) -> Option<TrackCode> {
    let digits: String = trimmed.chars().take(2).collect();
    if digits.len() != 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let rest = &trimmed[2..];
    markers
        .iter()
        .any(|m| rest.starts_with(m))
        .then(|| TrackCode::new(&digits))
}

fn is_race_header(line: &str, kind: DocumentKind) -> bool {
    static RACE_NO: OnceLock<Regex> = OnceLock::new();
    let race_no = RACE_NO.get_or_init(|| Regex::new(r"^\s*(\d{1,2})R\s").unwrap());

    match kind {
        // Program headers carry the betting-deadline marker
        DocumentKind::Program => {
            line.contains(PROGRAM_DEADLINE_MARKER) && find_race_number(line).is_some()
        }
        // Result headers open the line with the race number and carry the
        // distance token (`H1800m`)
        DocumentKind::Result => race_no.is_match(line) && has_distance_token(line),
    }
}

/// Race-number token anywhere in the line (program headers indent it).
pub fn find_race_number(line: &str) -> Option<u8> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\d{1,2})R").unwrap());

    re.captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn has_distance_token(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[HＨ]\d+[mｍ]").unwrap());
    re.is_match(line)
}

fn is_entrant_candidate(line: &str, kind: DocumentKind) -> bool {
    if is_separator_line(line) || is_column_header_line(line) {
        return false;
    }

    match kind {
        DocumentKind::Program => {
            // Boat number 1-6 in the first column with enough trailing
            // structure for the fixed fields
            let mut chars = line.chars();
            matches!(chars.next(), Some(c) if ('1'..='6').contains(&c))
                && line.chars().count() >= crate::constants::program_columns::MIN_LEN
        }
        DocumentKind::Result => {
            // First token must come from the closed outcome-code set
            let first = match line.split_whitespace().next() {
                Some(token) => token,
                None => return false,
            };
            FINISH_CODES.contains(&first)
                && line.chars().count() >= crate::constants::result_columns::MIN_LEN
        }
    }
}

/// Separator rows are dashes (and whitespace) only.
fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-' || c.is_whitespace())
}

/// Column-header rows name the boat/name/number columns.
fn is_column_header_line(line: &str) -> bool {
    (line.contains("着") && line.contains("艇") && line.contains("登番"))
        || line.contains("選手")
        || line.contains("番号")
}

fn is_payout_line(line: &str) -> bool {
    static CONTINUATION: OnceLock<Regex> = OnceLock::new();
    let continuation = CONTINUATION
        .get_or_init(|| Regex::new(r"\d-\d\s+\d+\s+人気\s+\d+").unwrap());

    let keywords = [
        payout_keywords::WIN,
        payout_keywords::PLACE,
        payout_keywords::EXACTA,
        payout_keywords::QUINELLA,
        payout_keywords::WIDE,
        payout_keywords::TRIFECTA,
        payout_keywords::TRIO,
    ];

    keywords.iter().any(|kw| line.contains(kw)) || continuation.is_match(line)
}
