//! Tests for the race text parsing engine
//!
//! Shared fixtures live here; each component has its own test module.

pub mod extractor_tests;
pub mod parser_tests;

/// Fixed racer name used by line builders: eight chars, full-width padded,
/// matching the name column width of the result layout.
pub const RACER_NAME: &str = "川　上　　昇　平";

/// Build a result entrant line at the canonical column offsets.
pub fn result_entrant_line(
    outcome: &str,
    boat: u8,
    registration: u32,
    motor: u32,
    hull: u32,
    exhibition: &str,
    approach: u8,
    start_timing: &str,
    race_time: &str,
) -> String {
    let mut line = String::new();
    line.push_str(&format!("  {:<2}", outcome));
    line.push_str(&format!("  {}", boat));
    line.push_str(&format!(" {:04}", registration));
    line.push_str(&format!(" {}", RACER_NAME));
    line.push_str(&format!(" {:02}", motor));
    line.push_str(&format!("   {:02}", hull));
    line.push_str(&format!("  {}", exhibition));
    line.push_str(&format!("   {}", approach));
    line.push_str(&format!("    {}", start_timing));
    line.push_str(&format!("     {}", race_time));
    line
}

/// Build a program entrant line at the canonical column offsets.
///
/// The name field is exactly four chars wide; the rate run carries the eight
/// trailing values separated by single spaces.
pub fn program_entrant_line(boat: u8, registration: u32, rate_run: &str) -> String {
    format!("{} {:04}西島義則52広島52A1 {}", boat, registration, rate_run)
}

/// A complete six-entrant result race section (header, column header,
/// separator, entrant rows, payout block) for race `race_number`.
pub fn result_race_section(race_number: u8) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "   {}R       予選              H1800m  晴　    風  北　　  3m   波　  2cm\n",
        race_number
    ));
    text.push_str("  着 艇 登番 選　手　名　　　 ﾓｰﾀｰ ﾎﾞｰﾄ 展示 進入 ｽﾀｰﾄﾀｲﾐﾝｸﾞ ﾚｰｽﾀｲﾑ\n");
    text.push_str("  -------------------------------------------------------------------\n");
    for (rank, boat) in [(1u8, 1u8), (2, 3), (3, 2), (4, 5), (5, 4), (6, 6)] {
        text.push_str(&result_entrant_line(
            &format!("{:02}", rank),
            boat,
            3500 + u32::from(boat),
            50 + u32::from(boat),
            10 + u32::from(boat),
            "6.89",
            boat,
            "0.08",
            "1.49.7",
        ));
        text.push('\n');
    }
    text.push_str("        単勝     1          130\n");
    text.push_str("        複勝     1          140  3          290\n");
    text.push_str("        ２連単   1-3        390  人気     1\n");
    text.push_str("        ２連複   1-3        310  人気     1\n");
    text.push_str("        拡連複   1-3        190  人気     1\n");
    text.push_str("                 1-2        420  人気     5\n");
    text.push_str("        ３連単   1-3-6     1830  人気     5\n");
    text.push_str("        ３連複   1-3-6      760  人気     3\n");
    text
}

/// A complete six-entrant program race section for race `race_number`.
pub fn program_race_section(race_number: u8) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "　{}Ｒ　　一般　　　　　　　　　　Ｈ１８００ｍ　電話投票締切予定　１５：０５\n",
        race_number
    ));
    text.push_str("艇 選手 選手  年 支 体級    全国      当地    モーター   ボート\n");
    text.push_str("-------------------------------------------------------------------------\n");
    for boat in 1u8..=6 {
        text.push_str(&program_entrant_line(
            boat,
            3700 + u32::from(boat),
            "6.70 47.52 7.29 55.56 66 35.14 40 35.71",
        ));
        text.push('\n');
    }
    text
}

/// A result document with one track section holding `races` full races.
pub fn result_document_text(track: &str, races: u8) -> String {
    let mut text = String::new();
    text.push_str(&format!("{}KBGN\n", track));
    text.push_str("第 6日          2025/ 7/ 9                ボートレース大村\n");
    for race_number in 1..=races {
        text.push_str(&result_race_section(race_number));
    }
    text.push_str(&format!("{}KEND\n", track));
    text
}

/// A program document with one track section holding `races` full races.
pub fn program_document_text(track: &str, races: u8) -> String {
    let mut text = String::new();
    text.push_str(&format!("{}BBGN\n", track));
    text.push_str("ボートレース桐生    第 6日    2025/ 7/ 9\n");
    for race_number in 1..=races {
        text.push_str(&program_race_section(race_number));
    }
    text.push_str(&format!("{}BEND\n", track));
    text
}
