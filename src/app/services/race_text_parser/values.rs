//! Token-level value parsing for race text fields
//!
//! Helper functions shared by the field extractor: character-offset slicing
//! (the layouts are specified in display columns, so slicing must count chars,
//! never bytes), time-token parsing, numeric sanitizers, and the splitting of
//! rate runs glued together by the `100.00` sentinel.

use crate::constants::RATE_SENTINEL;

/// Slice a line by character offsets, tolerating short lines.
///
/// Returns the empty string when the range lies beyond the end of the line;
/// a range that starts inside the line but runs past the end yields the
/// available suffix.
pub fn slice_chars(line: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }

    let mut byte_start = line.len();
    let mut byte_end = line.len();
    for (count, (idx, _)) in line.char_indices().enumerate() {
        if count == start {
            byte_start = idx;
        }
        if count == end {
            byte_end = idx;
            break;
        }
    }

    if byte_start >= byte_end {
        ""
    } else {
        &line[byte_start..byte_end]
    }
}

/// Strip all whitespace (both widths) from a token.
pub fn compact(token: &str) -> String {
    token.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Sanitize a time token before parsing: drop whitespace and the stray
/// `K`/`L` letters that historical dumps glue onto time fields, and map the
/// flying-start marker `F` to a leading minus.
pub fn sanitize_time_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != 'K' && *c != 'L')
        .map(|c| if c == 'F' { '-' } else { c })
        .collect()
}

/// Parse a time token into signed seconds, rounded to 2 decimal places.
///
/// Two shapes occur: `SS.HH` (exhibition and start times) and `M.SS.HH`
/// (race completion times). Blank components default to zero. The final
/// component is a decimal fraction exactly as written, so `1.48.6` is one
/// minute 48.6 seconds = 108.6. A token carrying no digit at all (dot
/// placeholders for an unrecorded time) parses to `None`.
pub fn parse_time_token(token: &str) -> Option<f64> {
    let cleaned = sanitize_time_token(token);
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let (sign, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, cleaned.as_str()),
    };

    let parts: Vec<&str> = body.split('.').collect();
    let (minutes, seconds, fraction) = match parts.as_slice() {
        [sec] => ("", *sec, ""),
        [sec, frac] => ("", *sec, *frac),
        [min, sec, frac] => (*min, *sec, *frac),
        _ => return None,
    };

    let minutes = parse_component(minutes)?;
    let seconds = parse_component(seconds)?;
    let fraction = parse_fraction(fraction)?;

    let total = sign * (minutes * 60.0 + seconds + fraction);
    Some(round2(total))
}

/// Format seconds back into the canonical token shape: `M.SS.HH` for values
/// of a minute or more, `SS.HH` otherwise. Inverse of [`parse_time_token`]
/// to 2 decimal places.
pub fn format_time_token(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs();

    if total >= 60.0 {
        let minutes = (total / 60.0).floor();
        let rest = total - minutes * 60.0;
        format!("{}{}.{:05.2}", sign, minutes as u32, rest)
    } else {
        format!("{}{:.2}", sign, total)
    }
}

fn parse_component(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_fraction(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits = s.len() as i32;
    let value = s.parse::<f64>().ok()?;
    Some(value / 10f64.powi(digits))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a compacted token as an unsigned integer.
pub fn parse_u32(token: &str) -> Option<u32> {
    let cleaned = compact(token);
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse a compacted token as a rate value (`d.dd` / `dd.dd` / `100.00`).
pub fn parse_rate(token: &str) -> Option<f64> {
    let cleaned = compact(token);
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    cleaned.parse().ok()
}

/// Split a token that may contain rate values glued together by the
/// `100.00` sentinel.
///
/// One program format variant drops the separating space when a rate equals
/// 100.00, producing tokens like `6.80100.00` or `38100.0045.23`. The token
/// is split around every sentinel occurrence, and the residual digit runs are
/// split left-to-right: a 2-digit run followed by a dot is a two-digit-integer
/// rate, a 1-digit run followed by a dot is a one-digit-integer rate, and a
/// trailing run with no dot is an identifier (motor/hull number).
///
/// Idempotent: already-separated tokens pass through unchanged.
pub fn split_merged_token(token: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = token;

    while let Some(pos) = rest.find(RATE_SENTINEL) {
        if pos > 0 {
            split_digit_run(&rest[..pos], &mut out);
        }
        out.push(RATE_SENTINEL.to_string());
        rest = &rest[pos + RATE_SENTINEL.len()..];
    }

    if !rest.is_empty() {
        split_digit_run(rest, &mut out);
    }

    out
}

/// Split one sentinel-free digit run into rates and identifiers.
fn split_digit_run(segment: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = segment.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            // Stray separator; skip it
            i += 1;
            continue;
        }

        // Find the dot terminating the next rate, if any
        let dot = chars[i..].iter().position(|c| *c == '.').map(|p| i + p);

        match dot {
            None => {
                // Trailing dotless run: identifier
                out.push(chars[i..].iter().collect());
                break;
            }
            Some(dot) => {
                // The 1-2 digits before the dot are the rate's integer part;
                // anything earlier is an identifier run.
                let int_start = if dot - i >= 2 { dot - 2 } else { i };
                if int_start > i {
                    out.push(chars[i..int_start].iter().collect());
                }

                let frac_end = (dot + 3).min(chars.len());
                out.push(chars[int_start..frac_end].iter().collect());
                i = frac_end;
            }
        }
    }
}

/// Expand a whitespace-split token list, undoing sentinel concatenation.
pub fn expand_rate_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    tokens.flat_map(split_merged_token).collect()
}
