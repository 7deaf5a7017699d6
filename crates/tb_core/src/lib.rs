//! # tb_core - Roster Assembly Core for the Team Builder
//!
//! Builds a football roster (formation, coach, 11 field players and a
//! bench) from a static pool of reference data.
//!
//! ## Features
//! - Draft mode: one offer per step, halts instead of breaking position rules
//! - Random fill: position-constrained or fully random ("ultra"), pace-able
//! - Seeded runs are reproducible (same seed, same pool, same roster)
//! - Presenter trait so any view layer can follow along

// Draft offers and fill events are matched exhaustively by callers
#![allow(clippy::large_enum_variant)]
// Slot loops read clearer with indices
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod draft;
pub mod engine;
pub mod error;
pub mod events;
pub mod export;
pub mod models;
pub mod pool;
pub mod presenter;
pub mod random_fill;
pub mod sampler;
pub mod selection;

#[cfg(test)]
mod fixtures;

pub use config::BuilderConfig;
pub use draft::{DraftChoice, DraftOffer, DraftPhase, DraftProgress};
pub use engine::AssemblyEngine;
pub use error::{Result, RosterError};
pub use events::AssemblyEvent;
pub use export::{ExportRequest, RosterSnapshot};
pub use models::{
    Coach, CoachId, Emblem, EmblemId, Formation, Language, LocalizedName, Player, PlayerId,
    Position, Team, TeamId, ViewportClass,
};
pub use pool::RosterPool;
pub use presenter::{EventLog, NullPresenter, Presenter};
pub use random_fill::{FillEvent, FillMode, FillReport, RandomFill};
pub use selection::{SelectionState, SlotAssignment, SlotKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
