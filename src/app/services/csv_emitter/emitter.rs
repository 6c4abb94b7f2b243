//! Race record flattening
//!
//! Turns one completed race into one flat output row matching the fixed
//! schema of its document kind. Entrants emit in boat-number order 1-6
//! regardless of finish order; a boat with no recorded row emits a full
//! empty-string column group so every row of a sink has the same width.

use crate::app::models::{
    BetType, EntrantResult, PayoutEntry, ProgramEntrant, ProgramRace, RaceDate, RaceRecord,
    ResultRace,
};
use crate::constants::ENTRANT_GROUPS;

/// Flatten a race of either kind.
pub fn emit_row(date: &RaceDate, record: &RaceRecord) -> Vec<String> {
    match record {
        RaceRecord::Program(race) => program_row(date, race),
        RaceRecord::Result(race) => result_row(date, race),
    }
}

/// Program row: date, track, race number, distance, deadline, 6×13 entrant fields.
pub fn program_row(date: &RaceDate, race: &ProgramRace) -> Vec<String> {
    let mut row = race_prefix(date, race.track.as_str(), race.header.race_number);
    row.push(opt_u32(race.header.distance));
    row.push(race.header.deadline.clone().unwrap_or_default());

    for boat in 1..=ENTRANT_GROUPS as u8 {
        match race.entrants.get(&boat) {
            Some(entrant) => row.extend(program_entrant_fields(entrant)),
            None => row.extend(empty_fields(13)),
        }
    }

    row
}

/// Result row: date, track, race number, conditions, payouts, 6×9 entrant fields.
pub fn result_row(date: &RaceDate, race: &ResultRace) -> Vec<String> {
    let mut row = race_prefix(date, race.track.as_str(), race.header.race_number);
    row.push(opt_u32(race.header.distance));
    row.push(race.header.weather.clone().unwrap_or_default());
    row.push(race.header.wind_direction.clone().unwrap_or_default());
    row.push(opt_u32(race.header.wind_speed));
    row.push(opt_u32(race.header.wave_height));

    row.extend(payout_fields(race));

    for boat in 1..=ENTRANT_GROUPS as u8 {
        match race.entrants.get(&boat) {
            Some(entrant) => row.extend(result_entrant_fields(entrant)),
            None => row.extend(empty_fields(9)),
        }
    }

    row
}

fn race_prefix(date: &RaceDate, track: &str, race_number: u8) -> Vec<String> {
    vec![
        date.year().to_string(),
        date.month().to_string(),
        date.day().to_string(),
        track.to_string(),
        race_number.to_string(),
    ]
}

fn program_entrant_fields(entrant: &ProgramEntrant) -> Vec<String> {
    vec![
        entrant.registration.to_string(),
        opt_u32(entrant.age),
        entrant.branch.clone(),
        opt_u32(entrant.weight),
        entrant.racer_class.clone(),
        opt_rate(entrant.national_win_rate),
        opt_rate(entrant.national_place_rate),
        opt_rate(entrant.local_win_rate),
        opt_rate(entrant.local_place_rate),
        opt_u32(entrant.motor_number),
        opt_rate(entrant.motor_place_rate),
        opt_u32(entrant.hull_number),
        opt_rate(entrant.hull_place_rate),
    ]
}

fn result_entrant_fields(entrant: &EntrantResult) -> Vec<String> {
    vec![
        entrant.outcome.emitted(),
        entrant.registration.to_string(),
        entrant.boat_number.to_string(),
        opt_u32(entrant.motor_number),
        opt_u32(entrant.hull_number),
        opt_rate(entrant.exhibition_time),
        entrant
            .approach
            .map(|v| v.to_string())
            .unwrap_or_default(),
        opt_rate(entrant.start_timing),
        opt_rate(entrant.race_time),
    ]
}

/// The 27 payout columns: 単勝(2), 複勝(4), then combination/amount/popularity
/// triples for 2連単, 2連複, 拡連複1-3, 3連単, 3連複.
fn payout_fields(race: &ResultRace) -> Vec<String> {
    let mut fields = Vec::with_capacity(27);

    fields.extend(pair_fields(race.payout(BetType::Win)));

    let places: Vec<&PayoutEntry> = race.payouts_of(BetType::Place).take(2).collect();
    fields.extend(pair_fields(places.first().copied()));
    fields.extend(pair_fields(places.get(1).copied()));

    fields.extend(triple_fields(race.payout(BetType::Exacta)));
    fields.extend(triple_fields(race.payout(BetType::Quinella)));

    let wides: Vec<&PayoutEntry> = race.payouts_of(BetType::Wide).take(3).collect();
    for slot in 0..3 {
        fields.extend(triple_fields(wides.get(slot).copied()));
    }

    fields.extend(triple_fields(race.payout(BetType::Trifecta)));
    fields.extend(triple_fields(race.payout(BetType::Trio)));

    fields
}

/// combination + amount (pools without a popularity rank)
fn pair_fields(entry: Option<&PayoutEntry>) -> Vec<String> {
    match entry {
        Some(entry) => vec![entry.combination_label(), entry.amount.to_string()],
        None => empty_fields(2),
    }
}

/// combination + amount + popularity
fn triple_fields(entry: Option<&PayoutEntry>) -> Vec<String> {
    match entry {
        Some(entry) => vec![
            entry.combination_label(),
            entry.amount.to_string(),
            entry.popularity.map(|p| p.to_string()).unwrap_or_default(),
        ],
        None => empty_fields(3),
    }
}

fn empty_fields(count: usize) -> Vec<String> {
    vec![String::new(); count]
}

fn opt_u32(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Two-decimal form for rates and second-valued times
fn opt_rate(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}
