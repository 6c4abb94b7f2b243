//! Application constants for the boatrace processor
//!
//! This module contains the static track table, outcome code sets, payout pool
//! keywords, and the fixed column layouts used by the field extractor.

// =============================================================================
// Track Table
// =============================================================================

/// Official track (venue) table: stable 2-digit code and venue name.
///
/// Codes 01-24 cover every venue operated by the racing authority. The order
/// matches the code sequence; substring matching against venue text must be
/// done longest-name-first (see `TrackRegistry`) so that 唐津 is never
/// shadowed by the single-character 津.
pub const TRACK_TABLE: &[(&str, &str)] = &[
    ("01", "桐生"),
    ("02", "戸田"),
    ("03", "江戸川"),
    ("04", "平和島"),
    ("05", "多摩川"),
    ("06", "浜名湖"),
    ("07", "蒲郡"),
    ("08", "常滑"),
    ("09", "津"),
    ("10", "三国"),
    ("11", "びわこ"),
    ("12", "住之江"),
    ("13", "尼崎"),
    ("14", "鳴門"),
    ("15", "丸亀"),
    ("16", "児島"),
    ("17", "宮島"),
    ("18", "徳山"),
    ("19", "下関"),
    ("20", "若松"),
    ("21", "芦屋"),
    ("22", "福岡"),
    ("23", "唐津"),
    ("24", "大村"),
];

/// Sentinel code for venues that cannot be resolved against the track table
pub const UNKNOWN_TRACK_CODE: &str = "00";

/// Marker preceding the venue name in document preambles
pub const VENUE_LINE_MARKER: &str = "ボートレース";

// =============================================================================
// Document Layout Markers
// =============================================================================

/// Program documents delimit each venue with `NNBBGN` .. `NNBEND`,
/// result documents with `NNKBGN` .. `NNKEND`.
pub mod section_markers {
    pub const PROGRAM_BEGIN: &str = "BBGN";
    pub const PROGRAM_END: &str = "BEND";
    pub const RESULT_BEGIN: &str = "KBGN";
    pub const RESULT_END: &str = "KEND";
}

/// Deadline marker that identifies a program race header line
pub const PROGRAM_DEADLINE_MARKER: &str = "電話投票締切予定";

/// Fixed-entry annotation blanked out by the normalizer. Replaced with the
/// same number of full-width spaces so char offsets downstream stay valid.
pub const ENTRY_LOCKED_ANNOTATION: &str = "進入固定";

// =============================================================================
// Outcome Codes
// =============================================================================

/// Raw finish-position codes accepted on result entrant lines.
///
/// `01`-`06` are finishing ranks; the letter codes are non-finishes:
/// F = flying (early) start, L0/L1 = delayed start (not at fault / at fault),
/// K0/K1 = absence (not at fault / at fault),
/// S0/S1/S2 = disqualification (not at fault / at fault / interference).
pub const FINISH_CODES: &[&str] = &[
    "01", "02", "03", "04", "05", "06", "F", "L0", "L1", "K0", "K1", "S0", "S1", "S2",
];

// =============================================================================
// Payout Pools
// =============================================================================

/// Payout pool keywords as they appear after digit normalization.
///
/// The raw dumps print ２連単/３連単 etc. with full-width digits; the
/// classifier only ever sees normalized lines, so the half-width spellings are
/// canonical here.
pub mod payout_keywords {
    pub const WIN: &str = "単勝";
    pub const PLACE: &str = "複勝";
    pub const EXACTA: &str = "2連単";
    pub const QUINELLA: &str = "2連複";
    pub const WIDE: &str = "拡連複";
    pub const TRIFECTA: &str = "3連単";
    pub const TRIO: &str = "3連複";

    /// Popularity-rank marker on payout lines
    pub const POPULARITY: &str = "人気";
}

/// Sentinel rate value that the program format renders without a separating
/// space, gluing adjacent rate/number fields into one token.
pub const RATE_SENTINEL: &str = "100.00";

// =============================================================================
// Fixed Column Offsets
// =============================================================================
//
// All offsets are character positions (not bytes) into the normalized line.
// They are the primary extraction strategy; a pattern-scan fallback covers
// the historical format variants whose columns drift by a character or two.

/// Result entrant line layout, e.g.
/// `  01  1 3501 川　上　　昇　平 50   12  6.89   1    0.08     1.49.7`
pub mod result_columns {
    /// Finish position or non-finish code
    pub const OUTCOME: (usize, usize) = (2, 4);
    /// Boat (lane) number
    pub const BOAT: (usize, usize) = (5, 7);
    /// 4-digit competitor registration number
    pub const REGISTRATION: (usize, usize) = (8, 12);
    /// Racer name (full-width padded, unused by the result schema)
    pub const NAME: (usize, usize) = (13, 21);
    pub const MOTOR: (usize, usize) = (22, 24);
    pub const HULL: (usize, usize) = (27, 29);
    /// Exhibition time, `S.HH`
    pub const EXHIBITION: (usize, usize) = (31, 37);
    /// Approach (entry) lane
    pub const APPROACH: (usize, usize) = (38, 41);
    /// Start timing, `0.SS` or `F0.SS` for flying starts
    pub const START_TIMING: (usize, usize) = (42, 49);
    /// Race time, `M.SS.H`, or dot placeholders when no time was recorded
    pub const RACE_TIME: (usize, usize) = (52, 60);

    /// Minimum line length (chars) for the fixed-offset strategy
    pub const MIN_LEN: usize = 40;
}

/// Program entrant line layout, e.g.
/// `1 4444 松　井　　繁　 54大阪52A1 8.20 35.29 7.54 47.83 40 32.51 69 25.93`
pub mod program_columns {
    pub const BOAT: (usize, usize) = (0, 1);
    pub const REGISTRATION: (usize, usize) = (2, 6);
    pub const NAME: (usize, usize) = (6, 10);
    pub const AGE: (usize, usize) = (10, 12);
    pub const BRANCH: (usize, usize) = (12, 14);
    pub const WEIGHT: (usize, usize) = (14, 16);
    pub const CLASS: (usize, usize) = (16, 18);
    /// Rate/number run: national win/place rates, local win/place rates,
    /// motor number + place rate, hull number + place rate
    pub const RATE_RUN: (usize, usize) = (18, 58);

    /// Minimum line length (chars) for an entrant candidate
    pub const MIN_LEN: usize = 40;
}

// =============================================================================
// File Naming
// =============================================================================

/// Input file name for a document kind and date, e.g. `b250709_u8.txt`
pub fn input_file_name(prefix: &str, year: u16, month: u8, day: u8) -> String {
    format!("{}{:02}{:02}{:02}_u8.txt", prefix, year % 100, month, day)
}

/// Number of entrant column groups every emitted row carries
pub const ENTRANT_GROUPS: usize = 6;

/// Races per track per day in a full card
pub const RACES_PER_TRACK: u8 = 12;
