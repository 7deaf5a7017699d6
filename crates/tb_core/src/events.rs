// Events the assembly engine publishes to the presentation layer
use serde::Serialize;

use crate::draft::DraftPhase;
use crate::models::{CoachId, EmblemId, PlayerId, Position};
use crate::selection::{SlotAssignment, SlotKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AssemblyEvent {
    /// Draft cursor moved; `title` is the step heading to display
    PhaseChanged { phase: DraftPhase, title: String },
    FormationChosen { name: String },
    CoachChosen { coach_id: CoachId },
    Assigned(SlotAssignment),
    SlotCleared { slot_kind: SlotKind, slot_index: usize, player_id: PlayerId },
    TeamNameChanged { name: String },
    EmblemChanged { emblem: Option<EmblemId> },
    /// Pool grew; later drafts and fills may pick this player
    CustomPlayerAdded { player_id: PlayerId },
    /// Constrained fill found no unused player for the slot's position
    FallbackUsed { slot_index: usize, required: Position },
    DraftComplete,
    DraftAlreadyInProgress,
    DraftCannotContinue { reason: String, slot_kind: SlotKind, slot_index: usize },
    DraftCancelled,
    RandomFillPartial { unfilled: usize },
    RosterCleared,
}

impl AssemblyEvent {
    /// Ends a run (successfully or not).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AssemblyEvent::DraftComplete
                | AssemblyEvent::DraftCannotContinue { .. }
                | AssemblyEvent::DraftCancelled
                | AssemblyEvent::RandomFillPartial { .. }
        )
    }
}
