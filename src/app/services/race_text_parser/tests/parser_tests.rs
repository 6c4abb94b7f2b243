//! End-to-end tests for the document parser

use std::sync::Arc;

use crate::app::models::{DocumentKind, RaceDate, RaceRecord, RawDocument};
use crate::app::services::race_text_parser::DocumentParser;
use crate::app::services::track_registry::TrackRegistry;

use super::{program_document_text, result_document_text, result_race_section};

fn parser() -> DocumentParser {
    DocumentParser::new(Arc::new(TrackRegistry::builtin()))
}

fn date() -> RaceDate {
    RaceDate::new(2025, 7, 9).unwrap()
}

#[test]
fn parses_complete_result_document() {
    let document = RawDocument::new(
        DocumentKind::Result,
        date(),
        result_document_text("24", 2),
    );
    let result = parser().parse(&document);

    assert_eq!(result.races.len(), 2);
    assert_eq!(result.stats.races_emitted, 2);
    assert_eq!(result.stats.sections_dropped, 0);

    match &result.races[0] {
        RaceRecord::Result(race) => {
            assert_eq!(race.track.as_str(), "24");
            assert_eq!(race.header.race_number, 1);
            assert_eq!(race.header.distance, Some(1800));
            assert_eq!(race.entrants.len(), 6);
            // Pools: win, 2 places, exacta, quinella, wide + continuation,
            // trifecta, trio
            assert_eq!(race.payouts.len(), 9);
        }
        other => panic!("unexpected record: {:?}", other),
    }
}

#[test]
fn parses_complete_program_document() {
    let document = RawDocument::new(
        DocumentKind::Program,
        date(),
        program_document_text("01", 3),
    );
    let result = parser().parse(&document);

    assert_eq!(result.races.len(), 3);
    match &result.races[0] {
        RaceRecord::Program(race) => {
            assert_eq!(race.track.as_str(), "01");
            assert_eq!(race.header.distance, Some(1800));
            assert_eq!(race.header.deadline.as_deref(), Some("15:05"));
            assert_eq!(race.entrants.len(), 6);
            assert_eq!(race.entrants[&1].registration, 3701);
        }
        other => panic!("unexpected record: {:?}", other),
    }
}

#[test]
fn captures_document_date_from_preamble() {
    let document = RawDocument::new(
        DocumentKind::Result,
        date(),
        result_document_text("24", 1),
    );
    let result = parser().parse(&document);

    assert_eq!(result.document_date, Some(date()));
}

#[test]
fn venue_preamble_opens_section_without_markers() {
    // No KBGN/KEND markers at all; the venue line carries the track identity
    let mut text = String::from("第 6日          2025/ 7/ 9      ボートレース住之江\n");
    text.push_str(&result_race_section(1));

    let document = RawDocument::new(DocumentKind::Result, date(), text);
    let result = parser().parse(&document);

    assert_eq!(result.races.len(), 1);
    assert_eq!(result.races[0].track().as_str(), "12");
}

#[test]
fn unknown_venue_preamble_stays_outside_sections() {
    let mut text = String::from("ボートレース月面\n");
    text.push_str(&result_race_section(1));

    let document = RawDocument::new(DocumentKind::Result, date(), text);
    let result = parser().parse(&document);

    assert!(result.races.is_empty());
}

#[test]
fn mismatched_section_markers_drop_races_but_parsing_continues() {
    let mut text = String::new();
    text.push_str("05KBGN\n");
    text.push_str(&result_race_section(1));
    text.push_str("06KEND\n");
    text.push_str(&result_document_text("07", 1));

    let document = RawDocument::new(DocumentKind::Result, date(), text);
    let result = parser().parse(&document);

    assert_eq!(result.races.len(), 1);
    assert_eq!(result.races[0].track().as_str(), "07");
    assert_eq!(result.stats.sections_dropped, 1);
}

#[test]
fn truncated_race_is_dropped_while_earlier_races_survive() {
    let mut text = String::new();
    text.push_str("01BBGN\n");
    text.push_str(&super::program_race_section(1));
    // Second race breaks off after three entrant rows
    text.push_str(
        "　２Ｒ　　一般　　　　　　　　　　Ｈ１８００ｍ　電話投票締切予定　１５：３５\n",
    );
    for boat in 1u8..=3 {
        text.push_str(&super::program_entrant_line(
            boat,
            3800 + u32::from(boat),
            "6.70 47.52 7.29 55.56 66 35.14 40 35.71",
        ));
        text.push('\n');
    }

    let document = RawDocument::new(DocumentKind::Program, date(), text);
    let result = parser().parse(&document);

    assert_eq!(result.races.len(), 1);
    assert_eq!(result.races[0].race_number(), 1);
    assert_eq!(result.stats.races_dropped, 1);
}

#[test]
fn empty_document_yields_empty_result_not_error() {
    let document = RawDocument::new(DocumentKind::Result, date(), "no races here\n");
    let result = parser().parse(&document);

    assert!(result.is_empty());
    assert_eq!(result.stats.races_emitted, 0);
    assert!(result.stats.lines_total > 0);
}

#[test]
fn stats_count_entrant_rows_and_noise() {
    let document = RawDocument::new(
        DocumentKind::Result,
        date(),
        result_document_text("24", 1),
    );
    let result = parser().parse(&document);

    assert_eq!(result.stats.entrant_rows, 6);
    assert!(result.stats.payout_entries >= 9);
    assert!(result.stats.lines_noise > 0);
    assert_eq!(result.stats.entrant_rows_rejected, 0);
}
