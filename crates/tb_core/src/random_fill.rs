//! Random Fill
//!
//! Fills the whole roster without user input: formation, coach, every
//! field slot in order, then the bench.
//!
//! - `Constrained`: field slots take an unused player of the required
//!   position, falling back to any unused player when none is left.
//! - `Ultra`: positions are ignored everywhere.
//!
//! A run is an iterator yielding one [`FillEvent`] per committed step, so a
//! caller can pace it (one slot per animation frame) or drain it at once
//! with [`RandomFill::finish`]. The iterator holds the engine mutably; a
//! second run cannot start until the first is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::engine::AssemblyEngine;
use crate::error::RosterError;
use crate::events::AssemblyEvent;
use crate::models::{CoachId, Player, PlayerId};
use crate::presenter::Presenter;
use crate::selection::{SlotAssignment, SlotKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    Constrained,
    Ultra,
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillMode::Constrained => f.write_str("constrained"),
            FillMode::Ultra => f.write_str("ultra"),
        }
    }
}

impl FromStr for FillMode {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "constrained" | "random" => Ok(FillMode::Constrained),
            "ultra" | "ultra-random" => Ok(FillMode::Ultra),
            other => Err(RosterError::InvalidConfig(format!("unknown fill mode: {}", other))),
        }
    }
}

/// One committed step of a fill run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillEvent {
    FormationChosen { name: String },
    CoachChosen { coach_id: CoachId },
    Assigned(SlotAssignment),
    /// No unused player left; `remaining` slots (this one included) stay empty
    PoolExhausted { slot_kind: SlotKind, slot_index: usize, remaining: usize },
    Finished { unfilled: usize },
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub mode: FillMode,
    pub formation: Option<String>,
    pub coach: Option<CoachId>,
    pub assigned: Vec<SlotAssignment>,
    /// Field slots filled with an off-position player
    pub fallbacks: usize,
    pub unfilled: usize,
}

impl FillReport {
    fn new(mode: FillMode) -> Self {
        Self {
            mode,
            formation: None,
            coach: None,
            assigned: Vec::new(),
            fallbacks: 0,
            unfilled: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.formation.is_some() && self.coach.is_some() && self.unfilled == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Formation,
    Coach,
    Field(usize),
    Bench(usize),
    Done,
    Finished,
}

pub struct RandomFill<'a, P: Presenter> {
    engine: &'a mut AssemblyEngine<P>,
    mode: FillMode,
    cursor: Cursor,
    report: FillReport,
}

impl<'a, P: Presenter> RandomFill<'a, P> {
    /// Expects the engine to have cleared the lineup already.
    pub(crate) fn new(engine: &'a mut AssemblyEngine<P>, mode: FillMode) -> Self {
        Self { engine, mode, cursor: Cursor::Formation, report: FillReport::new(mode) }
    }

    pub fn mode(&self) -> FillMode {
        self.mode
    }

    /// Progress so far.
    pub fn report(&self) -> &FillReport {
        &self.report
    }

    /// Run the remaining steps and return the outcome.
    pub fn finish(mut self) -> FillReport {
        for _ in self.by_ref() {}
        self.report
    }

    fn step_formation(&mut self) -> FillEvent {
        let engine = &mut *self.engine;
        let picked = engine.sampler.pick_one(&engine.pool.formations);
        let formation = match picked {
            Ok(formation) => formation,
            Err(_) => return self.exhausted(SlotKind::Field, 0),
        };

        let name = formation.name.clone();
        engine.state.set_formation(formation);
        engine.emit(AssemblyEvent::FormationChosen { name: name.clone() });
        self.report.formation = Some(name.clone());
        self.cursor = Cursor::Coach;
        FillEvent::FormationChosen { name }
    }

    fn step_coach(&mut self) -> FillEvent {
        let engine = &mut *self.engine;
        let coach = match engine.sampler.pick_one(&engine.pool.coaches) {
            Ok(coach) => coach,
            Err(_) => return self.exhausted(SlotKind::Field, 0),
        };

        let coach_id = coach.id.clone();
        engine.state.set_coach(coach);
        engine.emit(AssemblyEvent::CoachChosen { coach_id: coach_id.clone() });
        self.report.coach = Some(coach_id.clone());
        self.cursor = Cursor::Field(0);
        FillEvent::CoachChosen { coach_id }
    }

    fn step_field(&mut self, index: usize) -> FillEvent {
        let engine = &mut *self.engine;
        let required = engine.state.formation().and_then(|f| f.requirement(index));

        let (picked, via_fallback) = {
            let pool = &engine.pool;
            let state = &engine.state;
            let unused = |p: &&Player| !state.is_used(&p.id);

            match (self.mode, required) {
                (FillMode::Constrained, Some(position)) => {
                    let eligible: Vec<&Player> = pool.players_at(position).filter(unused).collect();
                    if eligible.is_empty() {
                        let any: Vec<&Player> = pool.players.iter().filter(unused).collect();
                        (pick_id(&mut engine.sampler, &any), true)
                    } else {
                        (pick_id(&mut engine.sampler, &eligible), false)
                    }
                }
                _ => {
                    let any: Vec<&Player> = pool.players.iter().filter(unused).collect();
                    (pick_id(&mut engine.sampler, &any), false)
                }
            }
        };

        let Some(player_id) = picked else {
            return self.exhausted(SlotKind::Field, index);
        };
        if let Err(err) = self.commit(SlotKind::Field, index, player_id, via_fallback) {
            warn!(%err, slot = index, "random fill could not commit field slot");
            return self.exhausted(SlotKind::Field, index);
        }

        if via_fallback {
            if let Some(required) = required {
                warn!(slot = index, %required, "no unused player for position, using fallback");
                self.engine.emit(AssemblyEvent::FallbackUsed { slot_index: index, required });
            }
            self.report.fallbacks += 1;
        }
        self.cursor = Cursor::Field(index + 1);
        self.last_assigned()
    }

    fn step_bench(&mut self, index: usize) -> FillEvent {
        let engine = &mut *self.engine;
        let picked = {
            let state = &engine.state;
            let any: Vec<&Player> =
                engine.pool.players.iter().filter(|p| !state.is_used(&p.id)).collect();
            pick_id(&mut engine.sampler, &any)
        };

        let Some(player_id) = picked else {
            return self.exhausted(SlotKind::Bench, index);
        };
        if let Err(err) = self.commit(SlotKind::Bench, index, player_id, false) {
            warn!(%err, slot = index, "random fill could not commit bench slot");
            return self.exhausted(SlotKind::Bench, index);
        }

        self.cursor = Cursor::Bench(index + 1);
        self.last_assigned()
    }

    fn commit(
        &mut self,
        slot_kind: SlotKind,
        slot_index: usize,
        player_id: PlayerId,
        via_fallback: bool,
    ) -> crate::error::Result<()> {
        self.engine.state.commit_assignment(slot_kind, slot_index, &player_id, via_fallback)?;
        let assignment = SlotAssignment { slot_kind, slot_index, player_id, via_fallback };
        self.engine.emit(AssemblyEvent::Assigned(assignment.clone()));
        self.report.assigned.push(assignment);
        Ok(())
    }

    fn last_assigned(&self) -> FillEvent {
        match self.report.assigned.last() {
            Some(assignment) => FillEvent::Assigned(assignment.clone()),
            None => FillEvent::Finished { unfilled: self.report.unfilled },
        }
    }

    /// Every slot from here on stays empty.
    fn exhausted(&mut self, slot_kind: SlotKind, slot_index: usize) -> FillEvent {
        let field = self.engine.state.slot_count(SlotKind::Field);
        let bench = self.engine.state.slot_count(SlotKind::Bench);
        let remaining = match slot_kind {
            SlotKind::Field => field.saturating_sub(slot_index) + bench,
            SlotKind::Bench => bench.saturating_sub(slot_index),
        };
        warn!(%slot_kind, slot_index, remaining, "player pool exhausted");
        self.report.unfilled = remaining;
        self.cursor = Cursor::Done;
        FillEvent::PoolExhausted { slot_kind, slot_index, remaining }
    }

    fn finalize(&mut self) -> FillEvent {
        let unfilled = self.report.unfilled;
        if unfilled > 0 {
            self.engine.emit(AssemblyEvent::RandomFillPartial { unfilled });
        }
        info!(
            mode = %self.mode,
            assigned = self.report.assigned.len(),
            fallbacks = self.report.fallbacks,
            unfilled,
            "random fill finished"
        );
        self.cursor = Cursor::Finished;
        FillEvent::Finished { unfilled }
    }
}

impl<P: Presenter> Iterator for RandomFill<'_, P> {
    type Item = FillEvent;

    fn next(&mut self) -> Option<FillEvent> {
        loop {
            let event = match self.cursor {
                Cursor::Formation => self.step_formation(),
                Cursor::Coach => self.step_coach(),
                Cursor::Field(index) => {
                    if index >= self.engine.state.slot_count(SlotKind::Field) {
                        self.cursor = Cursor::Bench(0);
                        continue;
                    }
                    self.step_field(index)
                }
                Cursor::Bench(index) => {
                    if index >= self.engine.state.slot_count(SlotKind::Bench) {
                        self.cursor = Cursor::Done;
                        continue;
                    }
                    self.step_bench(index)
                }
                Cursor::Done => self.finalize(),
                Cursor::Finished => return None,
            };
            debug!(?event, "random fill step");
            return Some(event);
        }
    }
}

fn pick_id(sampler: &mut crate::sampler::CandidateSampler, players: &[&Player]) -> Option<PlayerId> {
    sampler.pick_one(players).ok().map(|p| p.id.clone())
}
