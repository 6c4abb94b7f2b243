//! Typed field extraction for classified lines
//!
//! The extractor turns a line the classifier has already recognized into a
//! typed value. The primary strategy is fixed character-offset slicing
//! (columns are positionally stable within one format version), with every
//! slice followed by a sanitize-and-shape-check pass; when a slice fails its
//! expected shape the extractor falls back to a pattern scan over the whole
//! line before rejecting it. A rejected line is reported as `None` and the
//! caller degrades it to noise — a malformed line never aborts the document.

use std::sync::OnceLock;

use regex::Regex;

use crate::app::models::{
    BetType, DocumentKind, EntrantResult, Outcome, PayoutEntry, ProgramEntrant, RaceHeader,
};
use crate::constants::{payout_keywords, program_columns, result_columns};

use super::classifier::find_race_number;
use super::values::{
    compact, expand_rate_tokens, parse_rate, parse_time_token, parse_u32, slice_chars,
};

// =============================================================================
// Race Headers
// =============================================================================

/// Extract a race header from a classified header line.
///
/// Detection already established the race number; every other field is
/// best-effort and absent fields stay `None`. A header with a missing
/// distance is still a header — completeness is only enforced at the race
/// level, never per field.
pub fn extract_race_header(line: &str, kind: DocumentKind) -> RaceHeader {
    let mut header = RaceHeader {
        race_number: find_race_number(line).unwrap_or(0),
        distance: extract_distance(line),
        ..RaceHeader::default()
    };

    match kind {
        DocumentKind::Program => {
            header.deadline = extract_deadline(line);
        }
        DocumentKind::Result => {
            header.weather = extract_weather(line);
            if let Some((direction, speed)) = extract_wind(line) {
                header.wind_direction = Some(direction);
                header.wind_speed = Some(speed);
            }
            header.wave_height = extract_wave_height(line);
        }
    }

    header
}

fn extract_distance(line: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[HＨ](\d+)[mｍ]").unwrap());
    re.captures(line)?.get(1)?.as_str().parse().ok()
}

fn extract_deadline(line: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\d{1,2}):(\d{2})").unwrap());
    let caps = re.captures(line)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    Some(format!("{:02}:{}", hour, caps.get(2)?.as_str()))
}

fn extract_weather(line: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(晴|曇|雨|雪)").unwrap());
    Some(re.captures(line)?.get(1)?.as_str().to_string())
}

fn extract_wind(line: &str) -> Option<(String, u32)> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"風\s+(\S+)\s+(\d+)m").unwrap());
    let caps = re.captures(line)?;
    let direction = caps.get(1)?.as_str().to_string();
    let speed = caps.get(2)?.as_str().parse().ok()?;
    Some((direction, speed))
}

fn extract_wave_height(line: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"波\s+(\d+)cm").unwrap());
    re.captures(line)?.get(1)?.as_str().parse().ok()
}

// =============================================================================
// Result Entrant Lines
// =============================================================================

/// Extract one finish row from a result document.
///
/// Fixed offsets are tried first. When the identity fields (outcome, boat,
/// registration) fail their shape the pattern scan takes over entirely; when
/// only the equipment/time fields come up empty — either genuinely absent, as
/// on pre-race absence rows, or shifted by a historical column drift — the
/// pattern scan runs as a tie-break and wins only if it matches.
pub fn extract_result_entrant(line: &str) -> Option<EntrantResult> {
    let primary = extract_result_by_offsets(line);

    let complete = matches!(
        &primary,
        Some(e) if e.motor_number.is_some()
            && e.hull_number.is_some()
            && e.exhibition_time.is_some()
    );

    if complete {
        primary
    } else {
        extract_result_by_scan(line).or(primary)
    }
}

fn extract_result_by_offsets(line: &str) -> Option<EntrantResult> {
    if line.chars().count() < result_columns::MIN_LEN {
        return None;
    }

    let outcome_raw = compact(slice_chars(
        line,
        result_columns::OUTCOME.0,
        result_columns::OUTCOME.1,
    ));
    let outcome = Outcome::from_code(&outcome_raw)?;

    let boat = parse_boat_number(slice_chars(
        line,
        result_columns::BOAT.0,
        result_columns::BOAT.1,
    ))?;

    let registration_raw = compact(slice_chars(
        line,
        result_columns::REGISTRATION.0,
        result_columns::REGISTRATION.1,
    ));
    if registration_raw.len() != 4 || !registration_raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let registration: u32 = registration_raw.parse().ok()?;

    Some(EntrantResult {
        outcome,
        boat_number: boat,
        registration,
        motor_number: parse_u32(slice_chars(
            line,
            result_columns::MOTOR.0,
            result_columns::MOTOR.1,
        )),
        hull_number: parse_u32(slice_chars(
            line,
            result_columns::HULL.0,
            result_columns::HULL.1,
        )),
        exhibition_time: parse_time_token(slice_chars(
            line,
            result_columns::EXHIBITION.0,
            result_columns::EXHIBITION.1,
        )),
        approach: parse_u32(slice_chars(
            line,
            result_columns::APPROACH.0,
            result_columns::APPROACH.1,
        ))
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| (1..=6).contains(v)),
        start_timing: parse_time_token(slice_chars(
            line,
            result_columns::START_TIMING.0,
            result_columns::START_TIMING.1,
        )),
        race_time: parse_time_token(slice_chars(
            line,
            result_columns::RACE_TIME.0,
            result_columns::RACE_TIME.1,
        )),
    })
}

fn extract_result_by_scan(line: &str) -> Option<EntrantResult> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(
            r"^\s*(0[1-6]|F|S[0-2]|L[01]|K[01])\s+([1-6])\s+(\d{4})\s+(.*?)\s+(\d{1,2})\s+(\d{1,2})\s+(\d{1,2}\.\d{2})\s+([1-6])\s+(F?\s?-?[\d.]+)\s*(.*)$",
        )
        .unwrap()
    });

    let caps = re.captures(line)?;

    Some(EntrantResult {
        outcome: Outcome::from_code(caps.get(1)?.as_str())?,
        boat_number: caps.get(2)?.as_str().parse().ok()?,
        registration: caps.get(3)?.as_str().parse().ok()?,
        motor_number: caps.get(5).and_then(|m| m.as_str().parse().ok()),
        hull_number: caps.get(6).and_then(|m| m.as_str().parse().ok()),
        exhibition_time: caps.get(7).and_then(|m| parse_time_token(m.as_str())),
        approach: caps.get(8).and_then(|m| m.as_str().parse().ok()),
        start_timing: caps.get(9).and_then(|m| parse_time_token(m.as_str())),
        race_time: caps.get(10).and_then(|m| parse_time_token(m.as_str())),
    })
}

fn parse_boat_number(raw: &str) -> Option<u8> {
    let cleaned = compact(raw);
    let boat: u8 = cleaned.parse().ok()?;
    (1..=6).contains(&boat).then_some(boat)
}

// =============================================================================
// Program Entrant Lines
// =============================================================================

/// Extract one entrant listing row from a program document.
///
/// The identity prefix (boat, registration, name, age, branch, weight, class)
/// sits at stable char offsets; the trailing rate/number run is token-scanned
/// with sentinel de-concatenation, which doubles as the drift-tolerant
/// fallback for that region.
pub fn extract_program_entrant(line: &str) -> Option<ProgramEntrant> {
    let boat = parse_boat_number(slice_chars(
        line,
        program_columns::BOAT.0,
        program_columns::BOAT.1,
    ))?;

    let registration_raw = compact(slice_chars(
        line,
        program_columns::REGISTRATION.0,
        program_columns::REGISTRATION.1,
    ));
    if registration_raw.len() != 4 || !registration_raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let registration: u32 = registration_raw.parse().ok()?;

    let rates = expand_rate_tokens(
        slice_chars(line, program_columns::RATE_RUN.0, program_columns::RATE_RUN.1)
            .split_whitespace(),
    );

    Some(ProgramEntrant {
        boat_number: boat,
        registration,
        racer_name: slice_chars(line, program_columns::NAME.0, program_columns::NAME.1)
            .trim()
            .to_string(),
        age: parse_u32(slice_chars(
            line,
            program_columns::AGE.0,
            program_columns::AGE.1,
        )),
        branch: compact(slice_chars(
            line,
            program_columns::BRANCH.0,
            program_columns::BRANCH.1,
        )),
        weight: parse_u32(slice_chars(
            line,
            program_columns::WEIGHT.0,
            program_columns::WEIGHT.1,
        )),
        racer_class: compact(slice_chars(
            line,
            program_columns::CLASS.0,
            program_columns::CLASS.1,
        )),
        national_win_rate: rates.first().and_then(|t| parse_rate(t)),
        national_place_rate: rates.get(1).and_then(|t| parse_rate(t)),
        local_win_rate: rates.get(2).and_then(|t| parse_rate(t)),
        local_place_rate: rates.get(3).and_then(|t| parse_rate(t)),
        motor_number: rates.get(4).and_then(|t| parse_u32(t)),
        motor_place_rate: rates.get(5).and_then(|t| parse_rate(t)),
        hull_number: rates.get(6).and_then(|t| parse_u32(t)),
        hull_place_rate: rates.get(7).and_then(|t| parse_rate(t)),
    })
}

// =============================================================================
// Payout Lines
// =============================================================================

/// Extract the payout entries carried by one classified payout line.
///
/// A place line carries up to two entries, every other pool one; a
/// keyword-less continuation line (wrapped wide rows) yields a wide entry.
/// Lines whose pool was declared void match no pattern and yield nothing.
pub fn extract_payouts(line: &str) -> Vec<PayoutEntry> {
    if line.contains(payout_keywords::WIN) {
        return extract_single_boat_pool(line, payout_keywords::WIN, BetType::Win);
    }
    if line.contains(payout_keywords::PLACE) {
        return extract_place_pool(line);
    }
    if line.contains(payout_keywords::EXACTA) {
        return extract_pair_pool(line, payout_keywords::EXACTA, BetType::Exacta);
    }
    if line.contains(payout_keywords::QUINELLA) {
        return extract_pair_pool(line, payout_keywords::QUINELLA, BetType::Quinella);
    }
    if line.contains(payout_keywords::WIDE) {
        return extract_pair_pool(line, payout_keywords::WIDE, BetType::Wide);
    }
    if line.contains(payout_keywords::TRIFECTA) {
        return extract_triple_pool(line, payout_keywords::TRIFECTA, BetType::Trifecta);
    }
    if line.contains(payout_keywords::TRIO) {
        return extract_triple_pool(line, payout_keywords::TRIO, BetType::Trio);
    }

    // Keyword-less continuation: wrapped wide rows
    extract_wide_continuation(line)
}

fn extract_single_boat_pool(line: &str, keyword: &str, bet_type: BetType) -> Vec<PayoutEntry> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"([1-6])\s+(\d+)").unwrap());

    let tail = match line.split_once(keyword) {
        Some((_, tail)) => tail,
        None => return Vec::new(),
    };

    re.captures(tail)
        .and_then(|caps| {
            Some(PayoutEntry {
                bet_type,
                combination: vec![caps.get(1)?.as_str().parse().ok()?],
                amount: caps.get(2)?.as_str().parse().ok()?,
                popularity: None,
            })
        })
        .into_iter()
        .collect()
}

fn extract_place_pool(line: &str) -> Vec<PayoutEntry> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"([1-6])\s+(\d+)").unwrap());

    let tail = match line.split_once(payout_keywords::PLACE) {
        Some((_, tail)) => tail,
        None => return Vec::new(),
    };

    re.captures_iter(tail)
        .take(2)
        .filter_map(|caps| {
            Some(PayoutEntry {
                bet_type: BetType::Place,
                combination: vec![caps.get(1)?.as_str().parse().ok()?],
                amount: caps.get(2)?.as_str().parse().ok()?,
                popularity: None,
            })
        })
        .collect()
}

fn extract_pair_pool(line: &str, keyword: &str, bet_type: BetType) -> Vec<PayoutEntry> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE
        .get_or_init(|| Regex::new(r"([1-6])-([1-6])\s+(\d+)(?:\s+人気\s+(\d+))?").unwrap());

    let tail = match line.split_once(keyword) {
        Some((_, tail)) => tail,
        None => return Vec::new(),
    };

    re.captures(tail)
        .and_then(|caps| {
            Some(PayoutEntry {
                bet_type,
                combination: vec![
                    caps.get(1)?.as_str().parse().ok()?,
                    caps.get(2)?.as_str().parse().ok()?,
                ],
                amount: caps.get(3)?.as_str().parse().ok()?,
                popularity: caps.get(4).and_then(|m| m.as_str().parse().ok()),
            })
        })
        .into_iter()
        .collect()
}

fn extract_triple_pool(line: &str, keyword: &str, bet_type: BetType) -> Vec<PayoutEntry> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"([1-6])-([1-6])-([1-6])\s+(\d+)(?:\s+人気\s+(\d+))?").unwrap()
    });

    let tail = match line.split_once(keyword) {
        Some((_, tail)) => tail,
        None => return Vec::new(),
    };

    re.captures(tail)
        .and_then(|caps| {
            Some(PayoutEntry {
                bet_type,
                combination: vec![
                    caps.get(1)?.as_str().parse().ok()?,
                    caps.get(2)?.as_str().parse().ok()?,
                    caps.get(3)?.as_str().parse().ok()?,
                ],
                amount: caps.get(4)?.as_str().parse().ok()?,
                popularity: caps.get(5).and_then(|m| m.as_str().parse().ok()),
            })
        })
        .into_iter()
        .collect()
}

fn extract_wide_continuation(line: &str) -> Vec<PayoutEntry> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r"([1-6])-([1-6])\s+(\d+)\s+人気\s+(\d+)").unwrap());

    re.captures(line)
        .and_then(|caps| {
            Some(PayoutEntry {
                bet_type: BetType::Wide,
                combination: vec![
                    caps.get(1)?.as_str().parse().ok()?,
                    caps.get(2)?.as_str().parse().ok()?,
                ],
                amount: caps.get(3)?.as_str().parse().ok()?,
                popularity: caps.get(4)?.as_str().parse().ok(),
            })
        })
        .into_iter()
        .collect()
}
