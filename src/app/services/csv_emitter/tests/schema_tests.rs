//! Tests for the fixed column schemas

use crate::app::services::csv_emitter::schema::{
    program_headers, program_width, result_headers, result_width,
};

#[test]
fn program_schema_has_seven_race_columns_plus_six_entrant_groups() {
    let headers = program_headers();
    assert_eq!(headers.len(), 7 + 6 * 13);
    assert_eq!(headers.len(), program_width());

    assert_eq!(headers[0], "年");
    assert_eq!(headers[3], "レース場番号");
    assert_eq!(headers[5], "距離(m)");
    assert_eq!(headers[6], "投票締切時間");
    assert_eq!(headers[7], "1艇_選手登番");
    assert_eq!(headers[7 + 13], "2艇_選手登番");
    assert_eq!(*headers.last().unwrap(), "6艇_ボート2連率");
}

#[test]
fn result_schema_has_conditions_payouts_and_six_entrant_groups() {
    let headers = result_headers();
    assert_eq!(headers.len(), 10 + 27 + 6 * 9);
    assert_eq!(headers.len(), result_width());

    assert_eq!(headers[5], "距離(m)");
    assert_eq!(headers[9], "波高(cm)");
    assert_eq!(headers[10], "単勝_艇番");
    assert_eq!(headers[12], "複勝1着_艇番");
    assert_eq!(headers[16], "2連単_艇番");
    assert_eq!(headers[22], "拡連複1_艇番");
    assert_eq!(headers[31], "3連単_艇番");
    assert_eq!(headers[36], "3連複_人気");
    assert_eq!(headers[37], "1艇_着順");
    assert_eq!(*headers.last().unwrap(), "6艇_レースタイム");
}

#[test]
fn header_names_are_unique() {
    for headers in [program_headers(), result_headers()] {
        let mut seen = std::collections::HashSet::new();
        for header in &headers {
            assert!(seen.insert(header.clone()), "duplicate column {}", header);
        }
    }
}
