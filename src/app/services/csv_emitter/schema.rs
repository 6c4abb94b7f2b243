//! Fixed output column schemas
//!
//! Each document kind flattens to one row per race with a constant column
//! set; entrant fields repeat as six fixed groups ordered by boat number.
//! Column names match the sinks the original converters produced, so
//! downstream consumers see an unchanged layout.

use crate::constants::ENTRANT_GROUPS;

/// Race-level columns shared by both kinds
const DATE_AND_TRACK: [&str; 5] = ["年", "月", "日", "レース場番号", "レース番号"];

/// Per-boat columns of a program row
const PROGRAM_ENTRANT_FIELDS: [&str; 13] = [
    "選手登番",
    "年齢",
    "支部",
    "体重",
    "級別",
    "全国勝率",
    "全国2連率",
    "当地勝率",
    "当地2連率",
    "モーター番号",
    "モーター2連率",
    "ボート番号",
    "ボート2連率",
];

/// Per-boat columns of a result row
const RESULT_ENTRANT_FIELDS: [&str; 9] = [
    "着順",
    "選手登番",
    "艇番",
    "モーター番号",
    "ボート番号",
    "展示",
    "進入",
    "スタートタイミング",
    "レースタイム",
];

/// Header row for the program sink: date/track columns, race conditions,
/// then six 13-field entrant groups.
pub fn program_headers() -> Vec<String> {
    let mut headers: Vec<String> = DATE_AND_TRACK.iter().map(|s| s.to_string()).collect();
    headers.push("距離(m)".to_string());
    headers.push("投票締切時間".to_string());

    for boat in 1..=ENTRANT_GROUPS {
        for field in PROGRAM_ENTRANT_FIELDS {
            headers.push(format!("{}艇_{}", boat, field));
        }
    }

    headers
}

/// Header row for the result sink: date/track columns, race conditions,
/// payout columns, then six 9-field entrant groups.
pub fn result_headers() -> Vec<String> {
    let mut headers: Vec<String> = DATE_AND_TRACK.iter().map(|s| s.to_string()).collect();
    headers.extend(
        ["距離(m)", "天候", "風向", "風速(m)", "波高(cm)"]
            .iter()
            .map(|s| s.to_string()),
    );

    headers.push("単勝_艇番".to_string());
    headers.push("単勝_払戻金".to_string());
    for slot in ["複勝1着", "複勝2着"] {
        headers.push(format!("{}_艇番", slot));
        headers.push(format!("{}_払戻金", slot));
    }
    for pool in ["2連単", "2連複", "拡連複1", "拡連複2", "拡連複3", "3連単", "3連複"] {
        headers.push(format!("{}_艇番", pool));
        headers.push(format!("{}_払戻金", pool));
        headers.push(format!("{}_人気", pool));
    }

    for boat in 1..=ENTRANT_GROUPS {
        for field in RESULT_ENTRANT_FIELDS {
            headers.push(format!("{}艇_{}", boat, field));
        }
    }

    headers
}

/// Column count of a program row
pub fn program_width() -> usize {
    DATE_AND_TRACK.len() + 2 + ENTRANT_GROUPS * PROGRAM_ENTRANT_FIELDS.len()
}

/// Column count of a result row
pub fn result_width() -> usize {
    DATE_AND_TRACK.len() + 5 + 27 + ENTRANT_GROUPS * RESULT_ENTRANT_FIELDS.len()
}
