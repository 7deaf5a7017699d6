//! Presentation Adapter contract
//!
//! The view layer (pitch slots, draft modal, step title) implements
//! [`Presenter`]. It is told about every committed change and may read the
//! roster, but never mutates it.

use crate::events::AssemblyEvent;
use crate::selection::SelectionState;

pub trait Presenter {
    fn on_event(&mut self, event: &AssemblyEvent, roster: &SelectionState);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn on_event(&mut self, _event: &AssemblyEvent, _roster: &SelectionState) {}
}

/// Keeps every event in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<AssemblyEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<AssemblyEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn last(&self) -> Option<&AssemblyEvent> {
        self.events.last()
    }

    pub fn count(&self, predicate: impl Fn(&AssemblyEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl Presenter for EventLog {
    fn on_event(&mut self, event: &AssemblyEvent, _roster: &SelectionState) {
        self.events.push(event.clone());
    }
}

impl<F> Presenter for F
where
    F: FnMut(&AssemblyEvent, &SelectionState),
{
    fn on_event(&mut self, event: &AssemblyEvent, roster: &SelectionState) {
        self(event, roster)
    }
}
