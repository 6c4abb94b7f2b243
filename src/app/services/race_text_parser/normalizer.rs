//! Line normalization for quasi-fixed-width race text
//!
//! The raw dumps mix full-width and half-width digits freely and decorate
//! some race headers with fixed annotations. Everything downstream (the
//! classifier's patterns and the extractor's char-offset slicing) assumes the
//! canonical forms produced here, so normalization is the first step applied
//! to every line.

use crate::constants::ENTRY_LOCKED_ANNOTATION;

/// Normalize one raw line into canonical form.
///
/// - full-width digits ０-９ map to half-width 0-9
/// - full-width ： and Ｒ map to half-width `:` and `R`
/// - the fixed-entry annotation is blanked with full-width spaces of equal
///   width so char offsets into the line remain valid
///
/// Idempotent: normalizing an already-normalized line is a no-op. The output
/// always has the same char count as the input.
pub fn normalize_line(line: &str) -> String {
    let blanked = blank_annotation(line);
    blanked.chars().map(normalize_char).collect()
}

fn normalize_char(c: char) -> char {
    match c {
        '０'..='９' => {
            // U+FF10..U+FF19 -> U+0030..U+0039
            char::from_u32(c as u32 - 0xFF10 + 0x30).unwrap_or(c)
        }
        '：' => ':',
        'Ｒ' => 'R',
        other => other,
    }
}

/// Replace the fixed-entry annotation with full-width spaces of the same
/// char count, preserving both line length and display width.
fn blank_annotation(line: &str) -> String {
    if !line.contains(ENTRY_LOCKED_ANNOTATION) {
        return line.to_string();
    }
    let padding: String = "　".repeat(ENTRY_LOCKED_ANNOTATION.chars().count());
    line.replace(ENTRY_LOCKED_ANNOTATION, &padding)
}
