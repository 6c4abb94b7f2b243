//! Tests for CSV emission
//!
//! Shared fixtures live here; schema, emitter and writer have their own
//! test modules.

pub mod schema_tests;
pub mod writer_tests;

use std::collections::BTreeMap;

use crate::app::models::{
    BetType, EntrantResult, Outcome, PayoutEntry, ProgramEntrant, ProgramRace, RaceDate,
    RaceHeader, ResultRace, TrackCode,
};

pub fn test_date() -> RaceDate {
    RaceDate::new(2025, 7, 9).unwrap()
}

pub fn result_entrant(boat: u8, outcome: Outcome) -> EntrantResult {
    EntrantResult {
        outcome,
        boat_number: boat,
        registration: 3500 + u32::from(boat),
        motor_number: Some(40 + u32::from(boat)),
        hull_number: Some(10 + u32::from(boat)),
        exhibition_time: Some(6.80),
        approach: Some(boat),
        start_timing: Some(0.08),
        race_time: Some(109.7),
    }
}

pub fn program_entrant(boat: u8) -> ProgramEntrant {
    ProgramEntrant {
        boat_number: boat,
        registration: 3700 + u32::from(boat),
        racer_name: "西島義則".to_string(),
        age: Some(52),
        branch: "広島".to_string(),
        weight: Some(52),
        racer_class: "A1".to_string(),
        national_win_rate: Some(6.70),
        national_place_rate: Some(47.52),
        local_win_rate: Some(7.29),
        local_place_rate: Some(55.56),
        motor_number: Some(66),
        motor_place_rate: Some(35.14),
        hull_number: Some(40),
        hull_place_rate: Some(35.71),
    }
}

pub fn payout(bet_type: BetType, combination: Vec<u8>, amount: u32, popularity: Option<u32>) -> PayoutEntry {
    PayoutEntry {
        bet_type,
        combination,
        amount,
        popularity,
    }
}

/// A result race with the given boats present.
pub fn result_race(boats: &[u8]) -> ResultRace {
    let mut entrants = BTreeMap::new();
    for (i, &boat) in boats.iter().enumerate() {
        entrants.insert(boat, result_entrant(boat, Outcome::Finished((i + 1) as u8)));
    }

    ResultRace {
        track: TrackCode::new("24"),
        header: RaceHeader {
            race_number: 5,
            distance: Some(1800),
            weather: Some("晴".to_string()),
            wind_direction: Some("北".to_string()),
            wind_speed: Some(3),
            wave_height: Some(2),
            ..RaceHeader::default()
        },
        entrants,
        payouts: vec![
            payout(BetType::Win, vec![1], 130, None),
            payout(BetType::Place, vec![1], 140, None),
            payout(BetType::Place, vec![3], 290, None),
            payout(BetType::Exacta, vec![1, 3], 390, Some(1)),
            payout(BetType::Quinella, vec![1, 3], 310, Some(1)),
            payout(BetType::Wide, vec![1, 3], 190, Some(1)),
            payout(BetType::Wide, vec![1, 2], 420, Some(5)),
            payout(BetType::Trifecta, vec![1, 3, 6], 1830, Some(5)),
            payout(BetType::Trio, vec![1, 3, 6], 760, Some(3)),
        ],
    }
}

/// A program race with all six boats.
pub fn program_race() -> ProgramRace {
    let mut entrants = BTreeMap::new();
    for boat in 1u8..=6 {
        entrants.insert(boat, program_entrant(boat));
    }

    ProgramRace {
        track: TrackCode::new("01"),
        header: RaceHeader {
            race_number: 1,
            distance: Some(1800),
            deadline: Some("15:05".to_string()),
            ..RaceHeader::default()
        },
        entrants,
    }
}
