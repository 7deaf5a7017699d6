use thiserror::Error;

use crate::models::{CoachId, EmblemId, PlayerId};
use crate::selection::SlotKind;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Cannot pick from an empty pool")]
    EmptyPool,

    #[error("Player {player} is already in the roster")]
    DuplicatePlayer { player: PlayerId },

    #[error("{kind} slot {index} is out of range (slot count {len})")]
    SlotIndexOutOfRange { kind: SlotKind, index: usize, len: usize },

    #[error("A draft is already in progress")]
    DraftAlreadyInProgress,

    #[error("No draft is active")]
    NoActiveDraft,

    #[error("Draft phase {phase} does not accept {choice}")]
    WrongPhase { phase: String, choice: String },

    #[error("{0} is not among the offered candidates")]
    InvalidChoice(String),

    #[error("Unknown formation: {0}")]
    UnknownFormation(String),

    #[error("Unknown coach: {0}")]
    UnknownCoach(CoachId),

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unknown emblem: {0}")]
    UnknownEmblem(EmblemId),

    #[error("No formation selected")]
    NoFormation,

    #[error("Invalid roster pool: {0}")]
    InvalidPool(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    /// Caller misuse: reported synchronously, state is left untouched.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            RosterError::DraftAlreadyInProgress
                | RosterError::NoActiveDraft
                | RosterError::WrongPhase { .. }
                | RosterError::InvalidChoice(_)
                | RosterError::SlotIndexOutOfRange { .. }
                | RosterError::DuplicatePlayer { .. }
        )
    }

    /// Errors raised while loading reference data or configuration.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            RosterError::InvalidPool(_)
                | RosterError::InvalidConfig(_)
                | RosterError::Json(_)
                | RosterError::Yaml(_)
                | RosterError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
