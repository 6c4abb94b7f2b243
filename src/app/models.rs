//! Data models for boatrace document processing
//!
//! This module contains the core data structures for representing race
//! programs and race results as typed records: track sections, race headers,
//! entrant rows, outcomes and payout entries. All entities live for one
//! document conversion pass; nothing is shared across documents.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::constants::{self, UNKNOWN_TRACK_CODE};
use crate::{Error, Result};

// =============================================================================
// Documents
// =============================================================================

/// The two dump kinds published per race day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Pre-race program (番組表): entrant listing with rates, `b*` files
    Program,
    /// Post-race results (競走成績): finish order and payouts, `k*` files
    Result,
}

impl DocumentKind {
    /// File-name prefix used by the publishing authority
    pub fn file_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Program => "b",
            DocumentKind::Result => "k",
        }
    }

    /// Default CSV sink name for this kind
    pub fn output_file_name(&self) -> &'static str {
        match self {
            DocumentKind::Program => "race_programs.csv",
            DocumentKind::Result => "race_results.csv",
        }
    }

    /// Human-readable label for log and status output
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Program => "program",
            DocumentKind::Result => "result",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Race day identifier used for input file naming and output date columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceDate(NaiveDate);

impl RaceDate {
    /// Build a race date from calendar components.
    ///
    /// Range validation (year 1900-2100 etc.) happens at the CLI boundary;
    /// this only rejects calendar-impossible combinations such as Feb 30.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
            .map(RaceDate)
            .ok_or_else(|| {
                Error::date(format!(
                    "{:04}-{:02}-{:02} is not a valid calendar date",
                    year, month, day
                ))
            })
    }

    pub fn year(&self) -> u16 {
        self.0.year() as u16
    }

    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    pub fn day(&self) -> u8 {
        self.0.day() as u8
    }

    /// Input file name for the given document kind, e.g. `k250709_u8.txt`
    pub fn input_file_name(&self, kind: DocumentKind) -> String {
        constants::input_file_name(kind.file_prefix(), self.year(), self.month(), self.day())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for RaceDate {
    fn from(date: NaiveDate) -> Self {
        RaceDate(date)
    }
}

impl fmt::Display for RaceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One complete decoded text dump: all venues for one (date, kind) unit.
///
/// Immutable once constructed; the parser borrows it for the duration of a
/// single conversion call and retains nothing afterwards.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub kind: DocumentKind,
    pub date: RaceDate,
    pub text: String,
}

impl RawDocument {
    pub fn new(kind: DocumentKind, date: RaceDate, text: impl Into<String>) -> Self {
        Self {
            kind,
            date,
            text: text.into(),
        }
    }
}

// =============================================================================
// Tracks
// =============================================================================

/// Stable 2-digit venue code, `"01"`-`"24"`, or the `"00"` unknown sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackCode(String);

impl TrackCode {
    /// Accepts exactly two ASCII digits; anything else resolves to unknown.
    pub fn new(code: &str) -> Self {
        if code.len() == 2 && code.bytes().all(|b| b.is_ascii_digit()) {
            TrackCode(code.to_string())
        } else {
            Self::unknown()
        }
    }

    /// The sentinel code for unresolvable venues
    pub fn unknown() -> Self {
        TrackCode(UNKNOWN_TRACK_CODE.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_TRACK_CODE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Race Header
// =============================================================================

/// Header fields shared by both document kinds.
///
/// Condition fields are optional: a header detected with a missing distance is
/// still a header, and the absent fields emit as empty strings. Completeness
/// is enforced at the race level (entrant count), never per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceHeader {
    /// Race number 1-12
    pub race_number: u8,
    /// Course distance in meters
    pub distance: Option<u32>,
    /// Scheduled betting deadline `HH:MM` (program documents only)
    pub deadline: Option<String>,
    /// Weather token: 晴, 曇, 雨, 雪 (result documents only)
    pub weather: Option<String>,
    pub wind_direction: Option<String>,
    /// Wind speed in m/s
    pub wind_speed: Option<u32>,
    /// Wave height in cm
    pub wave_height: Option<u32>,
}

impl RaceHeader {
    /// A header is usable once it carries a plausible race number.
    pub fn is_valid(&self) -> bool {
        (1..=constants::RACES_PER_TRACK).contains(&self.race_number)
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// An entrant's race outcome: a finishing rank or one of the closed set of
/// non-finish codes, each tagged by whether the competitor was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Finished in rank 1-6 (`01`-`06`)
    Finished(u8),
    /// Flying start (`F`): crossed the line before the start signal
    EarlyStart,
    /// Delayed start, not the competitor's fault (`L0`)
    DelayedStartNotAtFault,
    /// Delayed start, competitor at fault (`L1`)
    DelayedStartAtFault,
    /// Pre-race absence, not the competitor's fault (`K0`)
    AbsentNotAtFault,
    /// Pre-race absence, competitor at fault (`K1`)
    AbsentAtFault,
    /// Disqualified, not the competitor's fault (`S0`)
    DisqualifiedNotAtFault,
    /// Disqualified, competitor at fault (`S1`)
    DisqualifiedAtFault,
    /// Disqualified for interfering with another boat (`S2`)
    DisqualifiedInterference,
}

impl Outcome {
    /// Parse a raw 1-2 character outcome code.
    ///
    /// Returns `None` for anything outside the closed set; the caller must
    /// then reject the line rather than guess.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" | "1" => Some(Outcome::Finished(1)),
            "02" | "2" => Some(Outcome::Finished(2)),
            "03" | "3" => Some(Outcome::Finished(3)),
            "04" | "4" => Some(Outcome::Finished(4)),
            "05" | "5" => Some(Outcome::Finished(5)),
            "06" | "6" => Some(Outcome::Finished(6)),
            "F" => Some(Outcome::EarlyStart),
            "L0" => Some(Outcome::DelayedStartNotAtFault),
            "L1" => Some(Outcome::DelayedStartAtFault),
            "K0" => Some(Outcome::AbsentNotAtFault),
            "K1" => Some(Outcome::AbsentAtFault),
            "S0" => Some(Outcome::DisqualifiedNotAtFault),
            "S1" => Some(Outcome::DisqualifiedAtFault),
            "S2" => Some(Outcome::DisqualifiedInterference),
            _ => None,
        }
    }

    /// Canonical code as printed in the source dumps. Round-trips through
    /// [`Outcome::from_code`].
    pub fn code(&self) -> String {
        match self {
            Outcome::Finished(rank) => format!("{:02}", rank),
            Outcome::EarlyStart => "F".to_string(),
            Outcome::DelayedStartNotAtFault => "L0".to_string(),
            Outcome::DelayedStartAtFault => "L1".to_string(),
            Outcome::AbsentNotAtFault => "K0".to_string(),
            Outcome::AbsentAtFault => "K1".to_string(),
            Outcome::DisqualifiedNotAtFault => "S0".to_string(),
            Outcome::DisqualifiedAtFault => "S1".to_string(),
            Outcome::DisqualifiedInterference => "S2".to_string(),
        }
    }

    /// Finishing rank, if the entrant completed the race
    pub fn rank(&self) -> Option<u8> {
        match self {
            Outcome::Finished(rank) => Some(*rank),
            _ => None,
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, Outcome::Finished(_))
    }

    /// Output-column form: rank without the leading zero, or the raw code.
    pub fn emitted(&self) -> String {
        match self {
            Outcome::Finished(rank) => rank.to_string(),
            other => other.code(),
        }
    }
}

// =============================================================================
// Entrants
// =============================================================================

/// One competitor's row in a result document.
///
/// Optional fields model genuinely absent data (a flying start has no race
/// time); they emit as empty strings, never as omitted columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrantResult {
    pub outcome: Outcome,
    /// Boat (lane) assignment 1-6, the stable identifier within one race
    pub boat_number: u8,
    /// 4-digit competitor registration number
    pub registration: u32,
    pub motor_number: Option<u32>,
    pub hull_number: Option<u32>,
    /// Exhibition trial time in seconds
    pub exhibition_time: Option<f64>,
    /// Approach (entry) lane actually taken at the start
    pub approach: Option<u8>,
    /// Signed start offset in seconds; negative means a flying start
    pub start_timing: Option<f64>,
    /// Total race time in seconds; `None` when no time was recorded
    pub race_time: Option<f64>,
}

/// One competitor's row in a program document.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramEntrant {
    pub boat_number: u8,
    pub registration: u32,
    /// Racer name as printed (full-width padded); parsed but not emitted
    pub racer_name: String,
    pub age: Option<u32>,
    /// Home branch, e.g. 大阪
    pub branch: String,
    pub weight: Option<u32>,
    /// Racer class, e.g. A1, B2
    pub racer_class: String,
    pub national_win_rate: Option<f64>,
    pub national_place_rate: Option<f64>,
    pub local_win_rate: Option<f64>,
    pub local_place_rate: Option<f64>,
    pub motor_number: Option<u32>,
    pub motor_place_rate: Option<f64>,
    pub hull_number: Option<u32>,
    pub hull_place_rate: Option<f64>,
}

// =============================================================================
// Payouts
// =============================================================================

/// Wagering pool categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetType {
    Win,
    Place,
    Exacta,
    Quinella,
    Wide,
    Trifecta,
    Trio,
}

impl BetType {
    /// Pool keyword as it appears on normalized payout lines
    pub fn keyword(&self) -> &'static str {
        use crate::constants::payout_keywords as kw;
        match self {
            BetType::Win => kw::WIN,
            BetType::Place => kw::PLACE,
            BetType::Exacta => kw::EXACTA,
            BetType::Quinella => kw::QUINELLA,
            BetType::Wide => kw::WIDE,
            BetType::Trifecta => kw::TRIFECTA,
            BetType::Trio => kw::TRIO,
        }
    }

    /// Number of boat numbers in a winning combination
    pub fn arity(&self) -> usize {
        match self {
            BetType::Win | BetType::Place => 1,
            BetType::Exacta | BetType::Quinella | BetType::Wide => 2,
            BetType::Trifecta | BetType::Trio => 3,
        }
    }

    /// Win and place pools carry no popularity rank
    pub fn has_popularity(&self) -> bool {
        !matches!(self, BetType::Win | BetType::Place)
    }
}

/// One payout line: pool, winning combination, amount, popularity rank.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutEntry {
    pub bet_type: BetType,
    /// Ordered boat numbers, length matching `bet_type.arity()`
    pub combination: Vec<u8>,
    /// Payout per 100-yen ticket
    pub amount: u32,
    pub popularity: Option<u32>,
}

impl PayoutEntry {
    /// Combination in output form, e.g. `1-3-6`
    pub fn combination_label(&self) -> String {
        self.combination
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

// =============================================================================
// Races
// =============================================================================

/// One assembled program race: header plus the six entrant rows.
#[derive(Debug, Clone)]
pub struct ProgramRace {
    pub track: TrackCode,
    pub header: RaceHeader,
    /// Keyed by boat number; duplicates overwrite (last write wins)
    pub entrants: BTreeMap<u8, ProgramEntrant>,
}

impl ProgramRace {
    /// Programs are complete only with all six boats listed.
    pub fn is_complete(&self) -> bool {
        self.header.is_valid() && self.entrants.len() >= constants::ENTRANT_GROUPS
    }
}

/// One assembled result race: header, finish rows and payout rows.
#[derive(Debug, Clone)]
pub struct ResultRace {
    pub track: TrackCode,
    pub header: RaceHeader,
    /// Keyed by boat number; duplicates overwrite (last write wins)
    pub entrants: BTreeMap<u8, EntrantResult>,
    pub payouts: Vec<PayoutEntry>,
}

impl ResultRace {
    /// Results are complete with at least one recorded entrant row; missing
    /// boats are padded at emission.
    pub fn is_complete(&self) -> bool {
        self.header.is_valid() && !self.entrants.is_empty()
    }

    /// First payout entry of the given pool, if present
    pub fn payout(&self, bet_type: BetType) -> Option<&PayoutEntry> {
        self.payouts.iter().find(|p| p.bet_type == bet_type)
    }

    /// All payout entries of the given pool, in document order
    pub fn payouts_of(&self, bet_type: BetType) -> impl Iterator<Item = &PayoutEntry> {
        self.payouts.iter().filter(move |p| p.bet_type == bet_type)
    }
}

/// One completed race of either document kind.
#[derive(Debug, Clone)]
pub enum RaceRecord {
    Program(ProgramRace),
    Result(ResultRace),
}

impl RaceRecord {
    pub fn track(&self) -> &TrackCode {
        match self {
            RaceRecord::Program(race) => &race.track,
            RaceRecord::Result(race) => &race.track,
        }
    }

    pub fn race_number(&self) -> u8 {
        match self {
            RaceRecord::Program(race) => race.header.race_number,
            RaceRecord::Result(race) => race.header.race_number,
        }
    }
}
