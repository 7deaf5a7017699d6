//! Draft Mode
//!
//! Guided, one-choice-per-step roster assembly:
//!
//! ```text
//! FormationSelect -> CoachSelect -> FieldSelect(0..slots) -> BenchSelect(0..bench) -> Complete
//! ```
//!
//! Each step offers a handful of random candidates and waits for the user
//! to pick one. If a step has no eligible candidate the run halts at that
//! slot instead of substituting an off-position player; the halted run stays
//! inspectable until it is cancelled or the roster is reset.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{Result, RosterError};
use crate::events::AssemblyEvent;
use crate::export::RosterSnapshot;
use crate::models::{CoachId, Formation, Player, PlayerId, Position};
use crate::pool::RosterPool;
use crate::sampler::CandidateSampler;
use crate::selection::{SelectionState, SlotAssignment, SlotKind};

/// Draft cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DraftPhase {
    FormationSelect,
    CoachSelect,
    FieldSelect { index: usize },
    BenchSelect { index: usize },
    Complete,
    /// No eligible candidate for this slot
    Halted { slot_kind: SlotKind, slot_index: usize },
    Cancelled,
}

impl DraftPhase {
    /// Run still owns the roster. A halted run keeps it until acknowledged.
    pub fn holds_lock(&self) -> bool {
        !matches!(self, DraftPhase::Complete | DraftPhase::Cancelled)
    }

    /// Waiting for a user choice.
    pub fn accepts_choice(&self) -> bool {
        matches!(
            self,
            DraftPhase::FormationSelect
                | DraftPhase::CoachSelect
                | DraftPhase::FieldSelect { .. }
                | DraftPhase::BenchSelect { .. }
        )
    }

    /// Step heading for the draft modal.
    pub fn title(&self, requirements: &[Position]) -> String {
        match self {
            DraftPhase::FormationSelect => "Draft: Select Formation".to_string(),
            DraftPhase::CoachSelect => "Draft: Select Coach".to_string(),
            DraftPhase::FieldSelect { index } => match requirements.get(*index) {
                Some(position) => {
                    format!("Draft: Select {} for Player #{}", position, index + 1)
                }
                None => format!("Draft: Select Player #{}", index + 1),
            },
            DraftPhase::BenchSelect { index } => {
                format!("Draft: Select Bench Player #{}", index + 1)
            }
            DraftPhase::Complete => "Draft Complete!".to_string(),
            DraftPhase::Halted { slot_kind, slot_index } => {
                format!("Draft cannot continue ({})", slot_kind.slot_label(*slot_index))
            }
            DraftPhase::Cancelled => "Draft cancelled".to_string(),
        }
    }
}

impl fmt::Display for DraftPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftPhase::FormationSelect => f.write_str("formation-select"),
            DraftPhase::CoachSelect => f.write_str("coach-select"),
            DraftPhase::FieldSelect { index } => write!(f, "field-select({})", index),
            DraftPhase::BenchSelect { index } => write!(f, "bench-select({})", index),
            DraftPhase::Complete => f.write_str("complete"),
            DraftPhase::Halted { slot_kind, slot_index } => {
                write!(f, "halted({} {})", slot_kind, slot_index)
            }
            DraftPhase::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Candidates presented for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DraftOffer {
    Formations { names: Vec<String> },
    Coaches { ids: Vec<CoachId> },
    Players {
        slot_kind: SlotKind,
        slot_index: usize,
        /// Position the slot requires (field slots only)
        required: Option<Position>,
        ids: Vec<PlayerId>,
    },
}

impl DraftOffer {
    pub fn len(&self) -> usize {
        match self {
            DraftOffer::Formations { names } => names.len(),
            DraftOffer::Coaches { ids } => ids.len(),
            DraftOffer::Players { ids, .. } => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, choice: &DraftChoice) -> bool {
        match (self, choice) {
            (DraftOffer::Formations { names }, DraftChoice::Formation(name)) => {
                names.contains(name)
            }
            (DraftOffer::Coaches { ids }, DraftChoice::Coach(id)) => ids.contains(id),
            (DraftOffer::Players { ids, .. }, DraftChoice::Player(id)) => ids.contains(id),
            _ => false,
        }
    }

    /// Choice for the `index`-th offered candidate.
    pub fn choice_at(&self, index: usize) -> Option<DraftChoice> {
        match self {
            DraftOffer::Formations { names } => {
                names.get(index).cloned().map(DraftChoice::Formation)
            }
            DraftOffer::Coaches { ids } => ids.get(index).cloned().map(DraftChoice::Coach),
            DraftOffer::Players { ids, .. } => ids.get(index).cloned().map(DraftChoice::Player),
        }
    }
}

/// "User chose X" event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChoice {
    Formation(String),
    Coach(CoachId),
    Player(PlayerId),
}

impl fmt::Display for DraftChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftChoice::Formation(name) => write!(f, "formation {}", name),
            DraftChoice::Coach(id) => write!(f, "coach {}", id),
            DraftChoice::Player(id) => write!(f, "player {}", id),
        }
    }
}

/// Where the run stands after a start or a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftProgress {
    /// Waiting for the user to pick from this offer
    Offer(DraftOffer),
    Complete(RosterSnapshot),
    CannotContinue { reason: String, slot_kind: SlotKind, slot_index: usize },
}

/// Borrowed engine pieces a draft step works on.
pub(crate) struct DraftContext<'a> {
    pub pool: &'a RosterPool,
    pub state: &'a mut SelectionState,
    pub sampler: &'a mut CandidateSampler,
    pub offer_size: usize,
}

/// One draft run: cursor, the formation's slot requirements and the
/// pending offer.
#[derive(Debug, Clone)]
pub(crate) struct DraftRun {
    phase: DraftPhase,
    requirements: Vec<Position>,
    offer: Option<DraftOffer>,
}

impl DraftRun {
    /// New run sitting at `FormationSelect` with its first offer drawn.
    pub fn start(ctx: &mut DraftContext<'_>) -> (Self, Vec<AssemblyEvent>) {
        let mut run =
            Self { phase: DraftPhase::FormationSelect, requirements: Vec::new(), offer: None };
        let mut events = Vec::new();
        run.enter_phase(ctx, &mut events);
        (run, events)
    }

    pub fn phase(&self) -> &DraftPhase {
        &self.phase
    }

    pub fn offer(&self) -> Option<&DraftOffer> {
        self.offer.as_ref()
    }

    pub fn requirements(&self) -> &[Position] {
        &self.requirements
    }

    /// Why a halted run stopped.
    pub fn halt_reason(&self) -> Option<String> {
        let DraftPhase::Halted { slot_kind, slot_index } = self.phase else {
            return None;
        };
        let reason = match (slot_kind, self.requirements.get(slot_index)) {
            (SlotKind::Field, Some(position)) => format!(
                "cannot complete draft: no eligible {} player for {}",
                position,
                slot_kind.slot_label(slot_index)
            ),
            _ => format!(
                "cannot complete draft: no eligible player for {}",
                slot_kind.slot_label(slot_index)
            ),
        };
        Some(reason)
    }

    /// Apply a user choice and move to the next step.
    ///
    /// Choices outside the current offer, or of the wrong kind for the
    /// phase, are rejected without touching any state.
    pub fn apply(
        &mut self,
        choice: DraftChoice,
        ctx: &mut DraftContext<'_>,
    ) -> Result<Vec<AssemblyEvent>> {
        if !self.phase.accepts_choice() {
            return Err(RosterError::WrongPhase {
                phase: self.phase.to_string(),
                choice: choice.to_string(),
            });
        }

        let offered = self.offer.as_ref().map_or(false, |offer| offer.contains(&choice));
        if !offered {
            let kind_matches = matches!(
                (&self.phase, &choice),
                (DraftPhase::FormationSelect, DraftChoice::Formation(_))
                    | (DraftPhase::CoachSelect, DraftChoice::Coach(_))
                    | (DraftPhase::FieldSelect { .. }, DraftChoice::Player(_))
                    | (DraftPhase::BenchSelect { .. }, DraftChoice::Player(_))
            );
            return Err(if kind_matches {
                RosterError::InvalidChoice(choice.to_string())
            } else {
                RosterError::WrongPhase { phase: self.phase.to_string(), choice: choice.to_string() }
            });
        }

        let mut events = Vec::new();
        self.phase = match (self.phase.clone(), choice) {
            (DraftPhase::FormationSelect, DraftChoice::Formation(name)) => {
                let formation = ctx
                    .pool
                    .formation(&name)
                    .ok_or_else(|| RosterError::UnknownFormation(name.clone()))?;
                self.requirements = formation.positions.clone();
                ctx.state.set_formation(formation.clone());
                events.push(AssemblyEvent::FormationChosen { name });
                DraftPhase::CoachSelect
            }
            (DraftPhase::CoachSelect, DraftChoice::Coach(id)) => {
                let coach =
                    ctx.pool.coach(&id).ok_or_else(|| RosterError::UnknownCoach(id.clone()))?;
                ctx.state.set_coach(coach.clone());
                events.push(AssemblyEvent::CoachChosen { coach_id: id });
                DraftPhase::FieldSelect { index: 0 }
            }
            (DraftPhase::FieldSelect { index }, DraftChoice::Player(id)) => {
                ctx.state.commit_assignment(SlotKind::Field, index, &id, false)?;
                events.push(AssemblyEvent::Assigned(SlotAssignment {
                    slot_kind: SlotKind::Field,
                    slot_index: index,
                    player_id: id,
                    via_fallback: false,
                }));
                DraftPhase::FieldSelect { index: index + 1 }
            }
            (DraftPhase::BenchSelect { index }, DraftChoice::Player(id)) => {
                ctx.state.commit_assignment(SlotKind::Bench, index, &id, false)?;
                events.push(AssemblyEvent::Assigned(SlotAssignment {
                    slot_kind: SlotKind::Bench,
                    slot_index: index,
                    player_id: id,
                    via_fallback: false,
                }));
                DraftPhase::BenchSelect { index: index + 1 }
            }
            // Offer membership already pins the choice kind to the phase
            (phase, choice) => {
                return Err(RosterError::WrongPhase {
                    phase: phase.to_string(),
                    choice: choice.to_string(),
                })
            }
        };

        self.enter_phase(ctx, &mut events);
        Ok(events)
    }

    /// Stop the run where it is.
    pub fn cancel(&mut self) -> Vec<AssemblyEvent> {
        self.phase = DraftPhase::Cancelled;
        self.offer = None;
        vec![
            AssemblyEvent::PhaseChanged {
                phase: DraftPhase::Cancelled,
                title: DraftPhase::Cancelled.title(&self.requirements),
            },
            AssemblyEvent::DraftCancelled,
        ]
    }

    /// Skip past exhausted slot ranges, then draw the offer for the phase
    /// the cursor lands on (or halt / complete).
    fn enter_phase(&mut self, ctx: &mut DraftContext<'_>, events: &mut Vec<AssemblyEvent>) {
        let pool = ctx.pool;
        let bench_size = ctx.state.slot_count(SlotKind::Bench);
        loop {
            match self.phase {
                DraftPhase::FieldSelect { index } if index >= self.requirements.len() => {
                    self.phase = DraftPhase::BenchSelect { index: 0 };
                }
                DraftPhase::BenchSelect { index } if index >= bench_size => {
                    self.phase = DraftPhase::Complete;
                }
                _ => break,
            }
        }

        self.offer = match self.phase {
            DraftPhase::FormationSelect => {
                let all: Vec<&Formation> = pool.formations.iter().collect();
                let names = ctx
                    .sampler
                    .pick_unique(&all, ctx.offer_size)
                    .into_iter()
                    .map(|f| f.name.clone())
                    .collect();
                Some(DraftOffer::Formations { names })
            }
            DraftPhase::CoachSelect => {
                let all: Vec<&CoachId> = pool.coaches.iter().map(|c| &c.id).collect();
                let ids = ctx
                    .sampler
                    .pick_unique(&all, ctx.offer_size)
                    .into_iter()
                    .cloned()
                    .collect();
                Some(DraftOffer::Coaches { ids })
            }
            DraftPhase::FieldSelect { index } => {
                let required = self.requirements[index];
                let eligible: Vec<&Player> = pool
                    .players_at(required)
                    .filter(|p| !ctx.state.is_used(&p.id))
                    .collect();
                self.player_offer(ctx, SlotKind::Field, index, Some(required), eligible)
            }
            DraftPhase::BenchSelect { index } => {
                let eligible: Vec<&Player> =
                    pool.players.iter().filter(|p| !ctx.state.is_used(&p.id)).collect();
                self.player_offer(ctx, SlotKind::Bench, index, None, eligible)
            }
            DraftPhase::Complete | DraftPhase::Halted { .. } | DraftPhase::Cancelled => None,
        };

        // player_offer may have halted the run
        events.push(AssemblyEvent::PhaseChanged {
            phase: self.phase.clone(),
            title: self.phase.title(&self.requirements),
        });
        debug!(phase = %self.phase, offered = self.offer.as_ref().map_or(0, DraftOffer::len), "draft step");

        match &self.phase {
            DraftPhase::Complete => {
                info!("draft complete");
                events.push(AssemblyEvent::DraftComplete);
            }
            DraftPhase::Halted { slot_kind, slot_index } => {
                let reason = self.halt_reason().unwrap_or_default();
                warn!(%reason, "draft halted");
                events.push(AssemblyEvent::DraftCannotContinue {
                    reason,
                    slot_kind: *slot_kind,
                    slot_index: *slot_index,
                });
            }
            _ => {}
        }
    }

    fn player_offer(
        &mut self,
        ctx: &mut DraftContext<'_>,
        slot_kind: SlotKind,
        slot_index: usize,
        required: Option<Position>,
        eligible: Vec<&Player>,
    ) -> Option<DraftOffer> {
        if eligible.is_empty() {
            self.phase = DraftPhase::Halted { slot_kind, slot_index };
            return None;
        }
        let ids = ctx
            .sampler
            .pick_unique(&eligible, ctx.offer_size)
            .into_iter()
            .map(|p| p.id.clone())
            .collect();
        Some(DraftOffer::Players { slot_kind, slot_index, required, ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    struct Harness {
        pool: RosterPool,
        state: SelectionState,
        sampler: CandidateSampler,
    }

    impl Harness {
        fn new(pool: RosterPool) -> Self {
            Self { pool, state: SelectionState::new(5), sampler: CandidateSampler::from_seed(11) }
        }

        fn ctx(&mut self) -> DraftContext<'_> {
            DraftContext {
                pool: &self.pool,
                state: &mut self.state,
                sampler: &mut self.sampler,
                offer_size: 5,
            }
        }
    }

    fn first_choice(run: &DraftRun) -> DraftChoice {
        run.offer().and_then(|o| o.choice_at(0)).expect("offer should not be empty")
    }

    #[test]
    fn test_start_offers_formations() {
        let mut h = Harness::new(fixtures::standard_pool());
        let (run, events) = DraftRun::start(&mut h.ctx());

        assert_eq!(run.phase(), &DraftPhase::FormationSelect);
        // six formations in the pool, five offered
        assert_eq!(run.offer().unwrap().len(), 5);
        assert!(matches!(&events[0], AssemblyEvent::PhaseChanged { title, .. } if title == "Draft: Select Formation"));
    }

    #[test]
    fn test_formation_then_coach_then_field() {
        let mut h = Harness::new(fixtures::standard_pool());
        let (mut run, _) = DraftRun::start(&mut h.ctx());

        let choice = first_choice(&run);
        run.apply(choice, &mut h.ctx()).unwrap();
        assert_eq!(run.phase(), &DraftPhase::CoachSelect);
        assert_eq!(run.requirements().len(), 11);
        assert!(h.state.formation().is_some());

        let choice = first_choice(&run);
        let events = run.apply(choice, &mut h.ctx()).unwrap();
        assert_eq!(run.phase(), &DraftPhase::FieldSelect { index: 0 });
        assert!(events.iter().any(|e| matches!(e, AssemblyEvent::CoachChosen { .. })));

        // slot 0 of every fixture formation is the keeper
        match run.offer().unwrap() {
            DraftOffer::Players { required, ids, .. } => {
                assert_eq!(*required, Some(Position::GK));
                for id in ids {
                    assert_eq!(h.pool.player(id).unwrap().position, Position::GK);
                }
            }
            other => panic!("expected player offer, got {:?}", other),
        }
    }

    #[test]
    fn test_choice_outside_offer_rejected() {
        let mut h = Harness::new(fixtures::standard_pool());
        let (mut run, _) = DraftRun::start(&mut h.ctx());

        let err = run.apply(DraftChoice::Formation("9-0-1".into()), &mut h.ctx()).unwrap_err();
        assert!(matches!(err, RosterError::InvalidChoice(_)));

        let err = run.apply(DraftChoice::Player("gk-1".into()), &mut h.ctx()).unwrap_err();
        assert!(matches!(err, RosterError::WrongPhase { .. }));

        assert_eq!(run.phase(), &DraftPhase::FormationSelect);
        assert!(h.state.formation().is_none());
    }

    #[test]
    fn test_halts_on_missing_position() {
        let mut h = Harness::new(fixtures::single_keeper_pool());
        let (mut run, _) = DraftRun::start(&mut h.ctx());

        run.apply(DraftChoice::Formation("2-keeper".into()), &mut h.ctx()).unwrap();
        let choice = first_choice(&run);
        run.apply(choice, &mut h.ctx()).unwrap();
        let events = run.apply(DraftChoice::Player("gk-1".into()), &mut h.ctx()).unwrap();

        assert_eq!(run.phase(), &DraftPhase::Halted { slot_kind: SlotKind::Field, slot_index: 1 });
        assert!(run.offer().is_none());
        assert!(events.iter().any(|e| matches!(
            e,
            AssemblyEvent::DraftCannotContinue { slot_kind: SlotKind::Field, slot_index: 1, .. }
        )));
        assert_eq!(h.state.filled_count(SlotKind::Field), 1, "halted run keeps its picks");

        let err = run.apply(DraftChoice::Player("df-1".into()), &mut h.ctx()).unwrap_err();
        assert!(matches!(err, RosterError::WrongPhase { .. }));
    }

    #[test]
    fn test_cancel() {
        let mut h = Harness::new(fixtures::standard_pool());
        let (mut run, _) = DraftRun::start(&mut h.ctx());
        let events = run.cancel();

        assert_eq!(run.phase(), &DraftPhase::Cancelled);
        assert!(!run.phase().holds_lock());
        assert_eq!(events.last(), Some(&AssemblyEvent::DraftCancelled));
    }

    #[test]
    fn test_phase_titles() {
        let reqs = [Position::GK, Position::DF];
        assert_eq!(
            DraftPhase::FieldSelect { index: 1 }.title(&reqs),
            "Draft: Select DF for Player #2"
        );
        assert_eq!(
            DraftPhase::BenchSelect { index: 0 }.title(&reqs),
            "Draft: Select Bench Player #1"
        );
        assert!(DraftPhase::Halted { slot_kind: SlotKind::Field, slot_index: 0 }.holds_lock());
    }
}
