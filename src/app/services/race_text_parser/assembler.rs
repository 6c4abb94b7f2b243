//! Section assembly state machine
//!
//! Walks the classified line stream and groups it into nested sections:
//! document → track → race → entrant/payout rows. Every transition has a
//! named trigger; there is no implicit fallthrough scanning. Completed races
//! buffer inside their track section and flush to the output list when the
//! section closes cleanly — a mismatched end marker drops the section's races
//! while the rest of the document continues.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::app::models::{
    BetType, DocumentKind, EntrantResult, PayoutEntry, ProgramEntrant, ProgramRace, RaceHeader,
    RaceRecord, ResultRace, TrackCode,
};

use super::classifier::SectionContext;
use super::stats::ParseStats;

/// Maximum wide-pool entries per race (first plus wrapped continuations)
const MAX_WIDE_ENTRIES: usize = 3;

/// Typed event produced from one classified line.
#[derive(Debug, Clone)]
pub enum ParseEvent {
    TrackStart(TrackCode),
    TrackEnd(TrackCode),
    RaceHeader(RaceHeader),
    ProgramEntrant(ProgramEntrant),
    ResultEntrant(EntrantResult),
    Payouts(Vec<PayoutEntry>),
    Noise,
}

#[derive(Debug)]
enum State {
    OutsideTrack,
    InTrack {
        track: TrackCode,
        races: Vec<RaceRecord>,
    },
    InRace {
        track: TrackCode,
        races: Vec<RaceRecord>,
        draft: RaceDraft,
    },
}

#[derive(Debug)]
struct RaceDraft {
    header: RaceHeader,
    body: DraftBody,
}

#[derive(Debug)]
enum DraftBody {
    Program(BTreeMap<u8, ProgramEntrant>),
    Result {
        entrants: BTreeMap<u8, EntrantResult>,
        payouts: Vec<PayoutEntry>,
    },
}

impl RaceDraft {
    fn new(kind: DocumentKind, header: RaceHeader) -> Self {
        let body = match kind {
            DocumentKind::Program => DraftBody::Program(BTreeMap::new()),
            DocumentKind::Result => DraftBody::Result {
                entrants: BTreeMap::new(),
                payouts: Vec::new(),
            },
        };
        Self { header, body }
    }

    /// Promote the draft to a race record, or `None` if it falls short of
    /// the completeness threshold (all six boats for programs, at least one
    /// finish row for results).
    fn into_record(self, track: TrackCode) -> Option<RaceRecord> {
        match self.body {
            DraftBody::Program(entrants) => {
                let race = ProgramRace {
                    track,
                    header: self.header,
                    entrants,
                };
                race.is_complete().then(|| RaceRecord::Program(race))
            }
            DraftBody::Result { entrants, payouts } => {
                let race = ResultRace {
                    track,
                    header: self.header,
                    entrants,
                    payouts,
                };
                race.is_complete().then(|| RaceRecord::Result(race))
            }
        }
    }
}

/// State machine assembling classified lines into completed races.
///
/// One assembler instance serves exactly one document pass; it owns no state
/// beyond that pass, so documents can be processed in parallel with
/// independent assemblers and zero coordination.
#[derive(Debug)]
pub struct SectionAssembler {
    kind: DocumentKind,
    state: State,
    emitted: Vec<RaceRecord>,
}

impl SectionAssembler {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            state: State::OutsideTrack,
            emitted: Vec::new(),
        }
    }

    /// Current nesting context for the classifier.
    pub fn context(&self) -> SectionContext {
        SectionContext {
            kind: self.kind,
            in_track: !matches!(self.state, State::OutsideTrack),
            in_race: matches!(self.state, State::InRace { .. }),
        }
    }

    pub fn is_outside_track(&self) -> bool {
        matches!(self.state, State::OutsideTrack)
    }

    /// Apply one event, advancing the machine.
    pub fn apply(&mut self, event: ParseEvent, stats: &mut ParseStats) {
        match event {
            ParseEvent::TrackStart(code) => self.on_track_start(code, stats),
            ParseEvent::TrackEnd(code) => self.on_track_end(code, stats),
            ParseEvent::RaceHeader(header) => self.on_race_header(header, stats),
            ParseEvent::ProgramEntrant(entrant) => self.on_program_entrant(entrant),
            ParseEvent::ResultEntrant(entrant) => self.on_result_entrant(entrant),
            ParseEvent::Payouts(payouts) => self.on_payouts(payouts),
            ParseEvent::Noise => {}
        }
    }

    /// End of document: close any open race and flush the open section.
    pub fn finish(mut self, stats: &mut ParseStats) -> Vec<RaceRecord> {
        let state = std::mem::replace(&mut self.state, State::OutsideTrack);
        if let Some((track, races)) = Self::close_section(state, stats) {
            debug!(
                "Document ended inside track {}; flushing {} races",
                track,
                races.len()
            );
            self.emitted.extend(races);
        }
        self.emitted
    }

    fn on_track_start(&mut self, code: TrackCode, stats: &mut ParseStats) {
        let state = std::mem::replace(&mut self.state, State::OutsideTrack);

        // A start marker while a section is open implies the previous section
        // had no end marker; with no mismatch evidence its races are kept.
        if let Some((_, races)) = Self::close_section(state, stats) {
            self.emitted.extend(races);
        }

        debug!("Track section {} opened", code);
        self.state = State::InTrack {
            track: code,
            races: Vec::new(),
        };
    }

    fn on_track_end(&mut self, code: TrackCode, stats: &mut ParseStats) {
        let state = std::mem::replace(&mut self.state, State::OutsideTrack);

        if let Some((track, races)) = Self::close_section(state, stats) {
            if track == code {
                debug!("Track section {} closed with {} races", track, races.len());
                self.emitted.extend(races);
            } else {
                stats.sections_dropped += 1;
                stats.record_error(format!(
                    "track section {}: end marker carries {}; {} races dropped",
                    track,
                    code,
                    races.len()
                ));
                warn!(
                    "Dropping track section {}: mismatched end marker {}",
                    track, code
                );
            }
        }
    }

    fn on_race_header(&mut self, header: RaceHeader, stats: &mut ParseStats) {
        let state = std::mem::replace(&mut self.state, State::OutsideTrack);

        match state {
            State::OutsideTrack => {
                // Header outside any track section: no venue to attribute it to
                debug!("Ignoring race header {}R outside track", header.race_number);
            }
            State::InTrack { track, races } => {
                self.state = State::InRace {
                    draft: RaceDraft::new(self.kind, header),
                    track,
                    races,
                };
            }
            State::InRace {
                track,
                mut races,
                draft,
            } => {
                Self::settle_draft(draft, &track, &mut races, stats);
                self.state = State::InRace {
                    draft: RaceDraft::new(self.kind, header),
                    track,
                    races,
                };
            }
        }
    }

    fn on_program_entrant(&mut self, entrant: ProgramEntrant) {
        if let State::InRace {
            draft:
                RaceDraft {
                    body: DraftBody::Program(entrants),
                    ..
                },
            ..
        } = &mut self.state
        {
            // Duplicate boat numbers overwrite: some sources repeat rows
            entrants.insert(entrant.boat_number, entrant);
        }
    }

    fn on_result_entrant(&mut self, entrant: EntrantResult) {
        if let State::InRace {
            draft:
                RaceDraft {
                    body: DraftBody::Result { entrants, .. },
                    ..
                },
            ..
        } = &mut self.state
        {
            entrants.insert(entrant.boat_number, entrant);
        }
    }

    fn on_payouts(&mut self, new_entries: Vec<PayoutEntry>) {
        if let State::InRace {
            draft:
                RaceDraft {
                    body: DraftBody::Result { payouts, .. },
                    ..
                },
            ..
        } = &mut self.state
        {
            for entry in new_entries {
                let wides = payouts
                    .iter()
                    .filter(|p| p.bet_type == BetType::Wide)
                    .count();
                if entry.bet_type == BetType::Wide && wides >= MAX_WIDE_ENTRIES {
                    continue;
                }
                payouts.push(entry);
            }
        }
    }

    /// Close an open race draft into its section's race list.
    fn settle_draft(
        draft: RaceDraft,
        track: &TrackCode,
        races: &mut Vec<RaceRecord>,
        stats: &mut ParseStats,
    ) {
        let race_number = draft.header.race_number;
        match draft.into_record(track.clone()) {
            Some(record) => races.push(record),
            None => {
                stats.races_dropped += 1;
                debug!(
                    "Dropping incomplete race {}R in track {}",
                    race_number, track
                );
            }
        }
    }

    /// Tear down a state into its section payload, settling any open draft.
    fn close_section(
        state: State,
        stats: &mut ParseStats,
    ) -> Option<(TrackCode, Vec<RaceRecord>)> {
        match state {
            State::OutsideTrack => None,
            State::InTrack { track, races } => Some((track, races)),
            State::InRace {
                track,
                mut races,
                draft,
            } => {
                Self::settle_draft(draft, &track, &mut races, stats);
                Some((track, races))
            }
        }
    }
}
