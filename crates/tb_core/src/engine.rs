//! Assembly Engine
//!
//! Owns the roster pool, the selection state and the sampler, and is the
//! only place roster mutations happen. Three ways in:
//!
//! - manual edits (`set_formation`, `assign_player`, ...)
//! - a guided draft (`start_draft` / `choose` / `cancel_draft`)
//! - a random fill (`random_fill` / `fill_random`)
//!
//! While a draft holds the roster every other mutation is refused. Each
//! committed change is reported to the [`Presenter`] after it lands.

use tracing::{debug, info, warn};

use crate::config::BuilderConfig;
use crate::draft::{DraftChoice, DraftContext, DraftOffer, DraftPhase, DraftProgress, DraftRun};
use crate::error::{Result, RosterError};
use crate::events::AssemblyEvent;
use crate::export::{ExportRequest, RosterSnapshot};
use crate::models::{CoachId, EmblemId, Language, PlayerId, Position, ViewportClass};
use crate::pool::RosterPool;
use crate::presenter::{NullPresenter, Presenter};
use crate::random_fill::{FillMode, FillReport, RandomFill};
use crate::sampler::CandidateSampler;
use crate::selection::{SelectionState, SlotAssignment, SlotKind};

pub struct AssemblyEngine<P: Presenter = NullPresenter> {
    pub(crate) pool: RosterPool,
    pub(crate) config: BuilderConfig,
    pub(crate) sampler: CandidateSampler,
    pub(crate) state: SelectionState,
    pub(crate) draft: Option<DraftRun>,
    pub(crate) language: Language,
    pub(crate) presenter: P,
}

impl AssemblyEngine<NullPresenter> {
    pub fn new(pool: RosterPool, config: BuilderConfig) -> Result<Self> {
        Self::with_presenter(pool, config, NullPresenter)
    }
}

impl<P: Presenter> AssemblyEngine<P> {
    /// Validate config and pool, then start from an empty roster with the
    /// configured default formation preselected.
    pub fn with_presenter(pool: RosterPool, config: BuilderConfig, presenter: P) -> Result<Self> {
        config.validate()?;
        pool.validate(config.field_slots)?;

        let mut engine = Self {
            sampler: CandidateSampler::new(config.seed),
            state: SelectionState::new(config.bench_size),
            draft: None,
            language: config.language,
            pool,
            config,
            presenter,
        };
        engine.apply_default_formation();
        info!(
            formations = engine.pool.formations.len(),
            coaches = engine.pool.coaches.len(),
            players = engine.pool.players.len(),
            seeded = engine.config.seed.is_some(),
            "assembly engine ready"
        );
        Ok(engine)
    }

    // ========================
    // Accessors
    // ========================

    pub fn pool(&self) -> &RosterPool {
        &self.pool
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.state.snapshot()
    }

    /// Hand-off for the image exporter, names in the current language.
    pub fn export_request(&self, viewport: ViewportClass) -> ExportRequest {
        ExportRequest::new(self.snapshot(), &self.pool, viewport, self.language)
    }

    pub(crate) fn emit(&mut self, event: AssemblyEvent) {
        self.presenter.on_event(&event, &self.state);
    }

    fn emit_all(&mut self, events: Vec<AssemblyEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    // ========================
    // Draft mode
    // ========================

    pub fn is_draft_active(&self) -> bool {
        self.draft.as_ref().map_or(false, |run| run.phase().holds_lock())
    }

    pub fn draft_phase(&self) -> Option<&DraftPhase> {
        self.draft.as_ref().map(DraftRun::phase)
    }

    pub fn draft_offer(&self) -> Option<&DraftOffer> {
        self.draft.as_ref().and_then(DraftRun::offer)
    }

    /// Step heading for the current draft phase.
    pub fn draft_title(&self) -> Option<String> {
        self.draft.as_ref().map(|run| run.phase().title(run.requirements()))
    }

    /// Clear the roster and open a draft at formation selection.
    pub fn start_draft(&mut self) -> Result<DraftProgress> {
        if self.is_draft_active() {
            warn!("draft start refused, a draft is already running");
            self.emit(AssemblyEvent::DraftAlreadyInProgress);
            return Err(RosterError::DraftAlreadyInProgress);
        }
        self.ensure_fillable()?;

        self.state.reset();
        let (run, events) = {
            let mut ctx = self.draft_context();
            DraftRun::start(&mut ctx)
        };
        info!("draft started");
        self.draft = Some(run);
        self.emit_all(events);
        self.draft_progress()
    }

    /// Commit one draft choice. Rejected choices leave the run untouched.
    pub fn choose(&mut self, choice: DraftChoice) -> Result<DraftProgress> {
        let mut run = match self.draft.take() {
            Some(run) if run.phase().holds_lock() => run,
            other => {
                self.draft = other;
                return Err(RosterError::NoActiveDraft);
            }
        };

        debug!(%choice, phase = %run.phase(), "draft choice");
        let applied = {
            let mut ctx = self.draft_context();
            run.apply(choice, &mut ctx)
        };
        self.draft = Some(run);
        self.emit_all(applied?);
        self.draft_progress()
    }

    /// Pick the `index`-th candidate of the current offer.
    pub fn choose_offered(&mut self, index: usize) -> Result<DraftProgress> {
        let offer = self.draft_offer().ok_or(RosterError::NoActiveDraft)?;
        let choice = offer
            .choice_at(index)
            .ok_or_else(|| RosterError::InvalidChoice(format!("candidate #{}", index + 1)))?;
        self.choose(choice)
    }

    /// Stop the running (or halted) draft. Picks made so far stay.
    pub fn cancel_draft(&mut self) -> Result<()> {
        let mut run = match self.draft.take() {
            Some(run) if run.phase().holds_lock() => run,
            other => {
                self.draft = other;
                return Err(RosterError::NoActiveDraft);
            }
        };
        let events = run.cancel();
        info!(filled = self.state.used().len(), "draft cancelled");
        self.draft = Some(run);
        self.emit_all(events);
        Ok(())
    }

    fn draft_progress(&self) -> Result<DraftProgress> {
        let run = self.draft.as_ref().ok_or(RosterError::NoActiveDraft)?;
        match run.phase() {
            DraftPhase::Complete => Ok(DraftProgress::Complete(self.snapshot())),
            DraftPhase::Halted { slot_kind, slot_index } => Ok(DraftProgress::CannotContinue {
                reason: run.halt_reason().unwrap_or_default(),
                slot_kind: *slot_kind,
                slot_index: *slot_index,
            }),
            DraftPhase::Cancelled => Err(RosterError::NoActiveDraft),
            _ => run.offer().cloned().map(DraftProgress::Offer).ok_or(RosterError::NoActiveDraft),
        }
    }

    fn draft_context(&mut self) -> DraftContext<'_> {
        DraftContext {
            pool: &self.pool,
            state: &mut self.state,
            sampler: &mut self.sampler,
            offer_size: self.config.offer_size,
        }
    }

    // ========================
    // Random fill
    // ========================

    /// Start a step-by-step random fill. Team name and emblem are kept,
    /// everything else is cleared first.
    pub fn random_fill(&mut self, mode: FillMode) -> Result<RandomFill<'_, P>> {
        if self.is_draft_active() {
            warn!(%mode, "random fill refused while a draft is running");
            return Err(RosterError::DraftAlreadyInProgress);
        }
        self.ensure_fillable()?;

        self.draft = None;
        self.state.clear_lineup();
        info!(%mode, "random fill started");
        Ok(RandomFill::new(self, mode))
    }

    /// Random fill in one go.
    pub fn fill_random(&mut self, mode: FillMode) -> Result<FillReport> {
        Ok(self.random_fill(mode)?.finish())
    }

    fn ensure_fillable(&self) -> Result<()> {
        if self.pool.formations.is_empty() {
            return Err(RosterError::InvalidPool("no formations to choose from".into()));
        }
        if self.pool.coaches.is_empty() {
            return Err(RosterError::InvalidPool("no coaches to choose from".into()));
        }
        Ok(())
    }

    // ========================
    // Manual editing
    // ========================

    /// Empty roster, default formation, no draft.
    pub fn reset(&mut self) {
        if self.is_draft_active() {
            info!("draft dropped by reset");
            self.emit(AssemblyEvent::DraftCancelled);
        }
        self.draft = None;
        self.state.reset();
        self.apply_default_formation();
        debug!("roster cleared");
        self.emit(AssemblyEvent::RosterCleared);
    }

    fn apply_default_formation(&mut self) {
        match self.pool.formation(&self.config.default_formation) {
            Some(formation) => {
                self.state.set_formation(formation.clone());
            }
            None => debug!(
                formation = %self.config.default_formation,
                "default formation not in pool"
            ),
        }
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.is_draft_active() {
            return Err(RosterError::DraftAlreadyInProgress);
        }
        Ok(())
    }

    /// Switch formation; field players are released, the bench stays.
    pub fn set_formation(&mut self, name: &str) -> Result<Vec<SlotAssignment>> {
        self.ensure_editable()?;
        let formation = self
            .pool
            .formation(name)
            .cloned()
            .ok_or_else(|| RosterError::UnknownFormation(name.to_string()))?;
        let released = self.state.set_formation(formation);
        self.emit(AssemblyEvent::FormationChosen { name: name.to_string() });
        Ok(released)
    }

    pub fn set_coach(&mut self, id: &CoachId) -> Result<()> {
        self.ensure_editable()?;
        let coach = self.pool.coach(id).cloned().ok_or_else(|| RosterError::UnknownCoach(id.clone()))?;
        self.state.set_coach(coach);
        self.emit(AssemblyEvent::CoachChosen { coach_id: id.clone() });
        Ok(())
    }

    /// Put a player into a slot, replacing its occupant.
    ///
    /// Field slots accept any position; an off-position player is marked
    /// `via_fallback` like a random-fill substitute.
    pub fn assign_player(
        &mut self,
        kind: SlotKind,
        slot_index: usize,
        player_id: &PlayerId,
    ) -> Result<SlotAssignment> {
        self.ensure_editable()?;
        let player =
            self.pool.player(player_id).ok_or_else(|| RosterError::UnknownPlayer(player_id.clone()))?;

        let via_fallback = match kind {
            SlotKind::Field => {
                let formation = self.state.formation().ok_or(RosterError::NoFormation)?;
                formation.requirement(slot_index).map_or(false, |required| required != player.position)
            }
            SlotKind::Bench => false,
        };

        self.state.commit_assignment(kind, slot_index, player_id, via_fallback)?;
        let assignment =
            SlotAssignment { slot_kind: kind, slot_index, player_id: player_id.clone(), via_fallback };
        self.emit(AssemblyEvent::Assigned(assignment.clone()));
        Ok(assignment)
    }

    pub fn clear_slot(&mut self, kind: SlotKind, slot_index: usize) -> Result<Option<SlotAssignment>> {
        self.ensure_editable()?;
        let cleared = self.state.clear_slot(kind, slot_index)?;
        if let Some(assignment) = &cleared {
            self.emit(AssemblyEvent::SlotCleared {
                slot_kind: kind,
                slot_index,
                player_id: assignment.player_id.clone(),
            });
        }
        Ok(cleared)
    }

    pub fn set_team_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.state.set_team_name(name.clone());
        self.emit(AssemblyEvent::TeamNameChanged { name });
    }

    pub fn set_emblem(&mut self, emblem: Option<EmblemId>) -> Result<()> {
        if let Some(id) = &emblem {
            if self.pool.emblem(id).is_none() {
                return Err(RosterError::UnknownEmblem(id.clone()));
            }
        }
        self.state.set_emblem(emblem.clone());
        self.emit(AssemblyEvent::EmblemChanged { emblem });
        Ok(())
    }

    /// Add a user-made player to the pool; it becomes eligible for every
    /// later draft and fill. The pool is frozen while a draft runs.
    pub fn add_custom_player(
        &mut self,
        name: &str,
        position: Position,
        sprite: impl Into<String>,
    ) -> Result<PlayerId> {
        self.ensure_editable()?;
        let player_id = self.pool.add_custom_player(name, position, sprite)?;
        self.emit(AssemblyEvent::CustomPlayerAdded { player_id: player_id.clone() });
        Ok(player_id)
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }
}
