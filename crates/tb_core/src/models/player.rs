use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Language, LocalizedName, PlayerId, TeamId};
use crate::error::RosterError;

/// Field position a player is registered for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    DF,
    MF,
    FW,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::GK, Position::DF, Position::MF, Position::FW];

    pub fn code(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GK" => Ok(Position::GK),
            "DF" => Ok(Position::DF),
            "MF" => Ok(Position::MF),
            "FW" => Ok(Position::FW),
            other => Err(RosterError::InvalidPool(format!("unknown position: {}", other))),
        }
    }
}

/// A selectable player.
///
/// Identity is `id`; the localized names are display text only and may
/// collide between players.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: LocalizedName,
    pub position: Position,
    pub team: TeamId,

    /// Source game tag (e.g. "IE1", "GO2"), used to group the picker.
    #[serde(default)]
    pub game: String,

    // Visual attributes, opaque to the assembly core
    #[serde(default)]
    pub sprite: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_sprite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Added at runtime rather than shipped with the dataset
    #[serde(default)]
    pub custom: bool,
}

impl Player {
    pub fn new(
        id: impl Into<PlayerId>,
        name: LocalizedName,
        position: Position,
        team: impl Into<TeamId>,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            position,
            team: team.into(),
            game: String::new(),
            sprite: String::new(),
            team_sprite: None,
            element: None,
            gender: None,
            custom: false,
        }
    }

    pub fn display_name(&self, language: Language) -> &str {
        self.name.get(language)
    }
}
