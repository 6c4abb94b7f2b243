//! Tests for typed field extraction

use crate::app::models::{BetType, DocumentKind, Outcome};
use crate::app::services::race_text_parser::extractor::{
    extract_payouts, extract_program_entrant, extract_race_header, extract_result_entrant,
};
use crate::app::services::race_text_parser::normalizer::normalize_line;

use super::{program_entrant_line, result_entrant_line};

// =============================================================================
// Result entrant lines
// =============================================================================

#[test]
fn extracts_finish_row_at_canonical_offsets() {
    let line = result_entrant_line("01", 1, 3501, 50, 12, "6.89", 1, "0.08", "1.49.7");
    let entrant = extract_result_entrant(&line).unwrap();

    assert_eq!(entrant.outcome, Outcome::Finished(1));
    assert_eq!(entrant.boat_number, 1);
    assert_eq!(entrant.registration, 3501);
    assert_eq!(entrant.motor_number, Some(50));
    assert_eq!(entrant.hull_number, Some(12));
    assert_eq!(entrant.exhibition_time, Some(6.89));
    assert_eq!(entrant.approach, Some(1));
    assert_eq!(entrant.start_timing, Some(0.08));
    assert_eq!(entrant.race_time, Some(109.7));
}

#[test]
fn extracts_finish_row_with_drifted_columns_via_fallback() {
    // Short name field shifts every column left of the canonical offsets
    let line = "  01  4 3930 <name> 39   47    6.80   4    0.09     1.48.6";
    let entrant = extract_result_entrant(line).unwrap();

    assert_eq!(entrant.outcome, Outcome::Finished(1));
    assert_eq!(entrant.boat_number, 4);
    assert_eq!(entrant.registration, 3930);
    assert_eq!(entrant.motor_number, Some(39));
    assert_eq!(entrant.hull_number, Some(47));
    assert_eq!(entrant.exhibition_time, Some(6.80));
    assert_eq!(entrant.approach, Some(4));
    assert_eq!(entrant.start_timing, Some(0.09));
    assert_eq!(entrant.race_time, Some(108.6));
}

#[test]
fn extracts_flying_start_row() {
    let line = "  F   1 4204 <name> 55   22    6.69   1   F0.01      .  . ";
    let entrant = extract_result_entrant(line).unwrap();

    assert_eq!(entrant.outcome, Outcome::EarlyStart);
    assert_eq!(entrant.boat_number, 1);
    assert_eq!(entrant.start_timing, Some(-0.01));
    assert_eq!(entrant.race_time, None);
}

#[test]
fn keeps_sparse_absence_row_from_offsets() {
    // Pre-race absences carry no equipment or time fields; the pattern scan
    // cannot match, and the offset result with absent fields stands
    let line = "  K0  5 4459 川　上　　昇　平                               .  . ";
    let entrant = extract_result_entrant(&line).unwrap();

    assert_eq!(entrant.outcome, Outcome::AbsentNotAtFault);
    assert_eq!(entrant.boat_number, 5);
    assert_eq!(entrant.registration, 4459);
    assert_eq!(entrant.motor_number, None);
    assert_eq!(entrant.exhibition_time, None);
    assert_eq!(entrant.race_time, None);
}

#[test]
fn rejects_line_without_valid_identity() {
    // Registration must be exactly four digits
    assert!(extract_result_entrant("  01  1 351 name 50 12").is_none());
    assert!(extract_result_entrant("garbage").is_none());
}

#[test]
fn outcome_codes_round_trip() {
    let codes = [
        "01", "02", "03", "04", "05", "06", "F", "L0", "L1", "K0", "K1", "S0", "S1", "S2",
    ];
    for code in codes {
        let outcome = Outcome::from_code(code).unwrap();
        assert_eq!(Outcome::from_code(&outcome.code()), Some(outcome), "{}", code);
        assert_eq!(outcome.code(), code, "canonical form of {}", code);
    }

    assert_eq!(Outcome::from_code("X9"), None);
    assert_eq!(Outcome::from_code("07"), None);
    assert_eq!(Outcome::from_code(""), None);
}

// =============================================================================
// Program entrant lines
// =============================================================================

#[test]
fn extracts_program_entrant_fields() {
    let line = program_entrant_line(1, 3783, "6.70 47.52 7.29 55.56 66 35.14 40 35.71");
    let entrant = extract_program_entrant(&line).unwrap();

    assert_eq!(entrant.boat_number, 1);
    assert_eq!(entrant.registration, 3783);
    assert_eq!(entrant.racer_name, "西島義則");
    assert_eq!(entrant.age, Some(52));
    assert_eq!(entrant.branch, "広島");
    assert_eq!(entrant.weight, Some(52));
    assert_eq!(entrant.racer_class, "A1");
    assert_eq!(entrant.national_win_rate, Some(6.70));
    assert_eq!(entrant.national_place_rate, Some(47.52));
    assert_eq!(entrant.local_win_rate, Some(7.29));
    assert_eq!(entrant.local_place_rate, Some(55.56));
    assert_eq!(entrant.motor_number, Some(66));
    assert_eq!(entrant.motor_place_rate, Some(35.14));
    assert_eq!(entrant.hull_number, Some(40));
    assert_eq!(entrant.hull_place_rate, Some(35.71));
}

#[test]
fn recovers_rates_glued_by_the_sentinel() {
    // 100.00 fills the separating space, gluing two fields into one token
    let line = program_entrant_line(2, 3783, "6.80100.00 7.29 55.56 66 35.14 40 35.71");
    let entrant = extract_program_entrant(&line).unwrap();

    assert_eq!(entrant.national_win_rate, Some(6.80));
    assert_eq!(entrant.national_place_rate, Some(100.00));
    assert_eq!(entrant.local_win_rate, Some(7.29));
    assert_eq!(entrant.hull_place_rate, Some(35.71));
}

#[test]
fn missing_trailing_rates_stay_absent() {
    let line = program_entrant_line(3, 3783, "6.70 47.52");
    let entrant = extract_program_entrant(&line).unwrap();

    assert_eq!(entrant.national_win_rate, Some(6.70));
    assert_eq!(entrant.national_place_rate, Some(47.52));
    assert_eq!(entrant.local_win_rate, None);
    assert_eq!(entrant.hull_place_rate, None);
}

#[test]
fn rejects_program_line_without_registration() {
    assert!(extract_program_entrant("1 37x3西島義則52広島52A1 6.70").is_none());
}

// =============================================================================
// Race headers
// =============================================================================

#[test]
fn extracts_program_header_from_full_width_source() {
    let raw = "　１２Ｒ　　一般　　　　Ｈ１２００ｍ　電話投票締切予定１６：１５";
    let header = extract_race_header(&normalize_line(raw), DocumentKind::Program);

    assert_eq!(header.race_number, 12);
    assert_eq!(header.distance, Some(1200));
    assert_eq!(header.deadline.as_deref(), Some("16:15"));
    assert_eq!(header.weather, None);
}

#[test]
fn extracts_result_header_conditions() {
    let line = "   2R       一般戦　　　          H1800m  晴　    風  北　　  3m   波　  2cm";
    let header = extract_race_header(line, DocumentKind::Result);

    assert_eq!(header.race_number, 2);
    assert_eq!(header.distance, Some(1800));
    assert_eq!(header.weather.as_deref(), Some("晴"));
    assert_eq!(header.wind_direction.as_deref(), Some("北"));
    assert_eq!(header.wind_speed, Some(3));
    assert_eq!(header.wave_height, Some(2));
    assert_eq!(header.deadline, None);
}

#[test]
fn partial_header_keeps_missing_fields_absent() {
    // Distance missing: still a header, fields stay empty
    let line = "   7R       予選              晴　    風  南西　  5m   波    4cm";
    let header = extract_race_header(line, DocumentKind::Result);

    assert_eq!(header.race_number, 7);
    assert_eq!(header.distance, None);
    assert_eq!(header.weather.as_deref(), Some("晴"));
    assert_eq!(header.wind_direction.as_deref(), Some("南西"));
    assert_eq!(header.wave_height, Some(4));
}

// =============================================================================
// Payout lines
// =============================================================================

#[test]
fn extracts_win_payout() {
    let entries = extract_payouts("        単勝     1          130");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].bet_type, BetType::Win);
    assert_eq!(entries[0].combination, vec![1]);
    assert_eq!(entries[0].amount, 130);
    assert_eq!(entries[0].popularity, None);
}

#[test]
fn extracts_both_place_payouts() {
    let entries = extract_payouts("        複勝     1          140  3          290");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].combination, vec![1]);
    assert_eq!(entries[0].amount, 140);
    assert_eq!(entries[1].combination, vec![3]);
    assert_eq!(entries[1].amount, 290);
}

#[test]
fn extracts_combination_pools_with_popularity() {
    let exacta = extract_payouts("        2連単   1-3        390  人気     1");
    assert_eq!(exacta[0].bet_type, BetType::Exacta);
    assert_eq!(exacta[0].combination, vec![1, 3]);
    assert_eq!(exacta[0].amount, 390);
    assert_eq!(exacta[0].popularity, Some(1));

    let trifecta = extract_payouts("        3連単   1-3-6     1830  人気     5");
    assert_eq!(trifecta[0].bet_type, BetType::Trifecta);
    assert_eq!(trifecta[0].combination, vec![1, 3, 6]);
    assert_eq!(trifecta[0].amount, 1830);
    assert_eq!(trifecta[0].popularity, Some(5));

    let trio = extract_payouts("        3連複   1-3-6      760  人気     3");
    assert_eq!(trio[0].bet_type, BetType::Trio);
    assert_eq!(trio[0].combination, vec![1, 3, 6]);
}

#[test]
fn keyword_less_continuation_becomes_wide_entry() {
    let entries = extract_payouts("                 1-2        420  人気     5");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].bet_type, BetType::Wide);
    assert_eq!(entries[0].combination, vec![1, 2]);
    assert_eq!(entries[0].amount, 420);
    assert_eq!(entries[0].popularity, Some(5));
}

#[test]
fn void_pool_line_yields_nothing() {
    assert!(extract_payouts("        単勝             特払い").is_empty());
    assert!(extract_payouts("        3連単          不成立").is_empty());
}
