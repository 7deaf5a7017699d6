//! Selection State
//!
//! The roster being assembled: formation, coach, field and bench slots.
//! Owned by the assembly engine; presenters only ever see `&SelectionState`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, RosterError};
use crate::export::RosterSnapshot;
use crate::models::{Coach, EmblemId, Formation, PlayerId};

/// Number of bench slots in the default layout.
pub const DEFAULT_BENCH_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Field,
    Bench,
}

impl SlotKind {
    /// Label the pitch shows for an empty slot ("Player #1", "Sub #3").
    pub fn slot_label(&self, slot_index: usize) -> String {
        match self {
            SlotKind::Field => format!("Player #{}", slot_index + 1),
            SlotKind::Bench => format!("Sub #{}", slot_index + 1),
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Field => f.write_str("field"),
            SlotKind::Bench => f.write_str("bench"),
        }
    }
}

/// One filled slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot_kind: SlotKind,
    pub slot_index: usize,
    pub player_id: PlayerId,
    /// Filled by a player whose position does not match the slot
    #[serde(default)]
    pub via_fallback: bool,
}

#[derive(Debug, Clone)]
pub struct SelectionState {
    formation: Option<Formation>,
    coach: Option<Coach>,
    field: Vec<Option<SlotAssignment>>,
    bench: Vec<Option<SlotAssignment>>,
    /// field ∪ bench player ids
    used: HashSet<PlayerId>,
    team_name: String,
    emblem: Option<EmblemId>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(DEFAULT_BENCH_SIZE)
    }
}

impl SelectionState {
    pub fn new(bench_size: usize) -> Self {
        Self {
            formation: None,
            coach: None,
            field: Vec::new(),
            bench: vec![None; bench_size],
            used: HashSet::new(),
            team_name: String::new(),
            emblem: None,
        }
    }

    // ========================
    // Read access
    // ========================

    pub fn formation(&self) -> Option<&Formation> {
        self.formation.as_ref()
    }

    pub fn coach(&self) -> Option<&Coach> {
        self.coach.as_ref()
    }

    pub fn field(&self) -> &[Option<SlotAssignment>] {
        &self.field
    }

    pub fn bench(&self) -> &[Option<SlotAssignment>] {
        &self.bench
    }

    pub fn slots(&self, kind: SlotKind) -> &[Option<SlotAssignment>] {
        match kind {
            SlotKind::Field => &self.field,
            SlotKind::Bench => &self.bench,
        }
    }

    pub fn slot(&self, kind: SlotKind, slot_index: usize) -> Option<&SlotAssignment> {
        self.slots(kind).get(slot_index).and_then(Option::as_ref)
    }

    pub fn slot_count(&self, kind: SlotKind) -> usize {
        self.slots(kind).len()
    }

    pub fn used(&self) -> &HashSet<PlayerId> {
        &self.used
    }

    pub fn is_used(&self, player_id: &PlayerId) -> bool {
        self.used.contains(player_id)
    }

    pub fn filled_count(&self, kind: SlotKind) -> usize {
        self.slots(kind).iter().filter(|s| s.is_some()).count()
    }

    pub fn unfilled_count(&self) -> usize {
        self.slot_count(SlotKind::Field) + self.slot_count(SlotKind::Bench) - self.used.len()
    }

    /// Formation and coach chosen, every slot filled.
    pub fn is_complete(&self) -> bool {
        self.formation.is_some() && self.coach.is_some() && self.unfilled_count() == 0
    }

    /// Filled slots, field first, each in slot order.
    pub fn assignments(&self) -> impl Iterator<Item = &SlotAssignment> {
        self.field.iter().chain(self.bench.iter()).flatten()
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn emblem(&self) -> Option<&EmblemId> {
        self.emblem.as_ref()
    }

    // ========================
    // Mutation
    // ========================

    /// Install a formation; the field is rebuilt empty with one slot per
    /// position. Returns the field assignments that were released.
    pub fn set_formation(&mut self, formation: Formation) -> Vec<SlotAssignment> {
        let released: Vec<SlotAssignment> = self.field.drain(..).flatten().collect();
        for assignment in &released {
            self.used.remove(&assignment.player_id);
        }
        self.field = vec![None; formation.slot_count()];
        self.formation = Some(formation);
        released
    }

    pub fn set_coach(&mut self, coach: Coach) {
        self.coach = Some(coach);
    }

    pub fn set_team_name(&mut self, name: impl Into<String>) {
        self.team_name = name.into();
    }

    pub fn set_emblem(&mut self, emblem: Option<EmblemId>) {
        self.emblem = emblem;
    }

    /// Put `player_id` into a slot and return the used-set size.
    ///
    /// Fails with `SlotIndexOutOfRange` for an index past the slot count and
    /// with `DuplicatePlayer` when the player already sits in any slot
    /// (including this one). A previous occupant of the slot is released.
    pub fn commit_assignment(
        &mut self,
        kind: SlotKind,
        slot_index: usize,
        player_id: &PlayerId,
        via_fallback: bool,
    ) -> Result<usize> {
        let len = self.slot_count(kind);
        if slot_index >= len {
            return Err(RosterError::SlotIndexOutOfRange { kind, index: slot_index, len });
        }
        if self.used.contains(player_id) {
            return Err(RosterError::DuplicatePlayer { player: player_id.clone() });
        }

        let assignment = SlotAssignment {
            slot_kind: kind,
            slot_index,
            player_id: player_id.clone(),
            via_fallback,
        };
        let slot = match kind {
            SlotKind::Field => &mut self.field[slot_index],
            SlotKind::Bench => &mut self.bench[slot_index],
        };
        if let Some(previous) = slot.replace(assignment) {
            self.used.remove(&previous.player_id);
        }
        self.used.insert(player_id.clone());

        debug_assert_eq!(self.used.len(), self.assignments().count());
        Ok(self.used.len())
    }

    /// Empty a slot, returning what was in it.
    pub fn clear_slot(&mut self, kind: SlotKind, slot_index: usize) -> Result<Option<SlotAssignment>> {
        let len = self.slot_count(kind);
        let slot = match kind {
            SlotKind::Field => self.field.get_mut(slot_index),
            SlotKind::Bench => self.bench.get_mut(slot_index),
        }
        .ok_or(RosterError::SlotIndexOutOfRange { kind, index: slot_index, len })?;

        let previous = slot.take();
        if let Some(previous) = &previous {
            self.used.remove(&previous.player_id);
        }
        Ok(previous)
    }

    /// Drop formation, coach and every assignment; keep team name and emblem.
    pub fn clear_lineup(&mut self) {
        self.formation = None;
        self.coach = None;
        self.field.clear();
        self.bench.iter_mut().for_each(|slot| *slot = None);
        self.used.clear();
    }

    /// Back to an empty roster with the same bench size.
    pub fn reset(&mut self) {
        self.clear_lineup();
        self.team_name.clear();
        self.emblem = None;
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        let ids = |slots: &[Option<SlotAssignment>]| -> Vec<Option<PlayerId>> {
            slots.iter().map(|s| s.as_ref().map(|a| a.player_id.clone())).collect()
        };
        RosterSnapshot {
            formation: self.formation.as_ref().map(|f| f.name.clone()),
            coach: self.coach.as_ref().map(|c| c.id.clone()),
            field: ids(&self.field),
            bench: ids(&self.bench),
            fallback_slots: self
                .field
                .iter()
                .flatten()
                .filter(|a| a.via_fallback)
                .map(|a| a.slot_index)
                .collect(),
            team_name: self.team_name.clone(),
            emblem: self.emblem.clone(),
        }
    }
}
