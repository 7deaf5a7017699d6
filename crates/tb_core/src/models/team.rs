use serde::{Deserialize, Serialize};

use super::{EmblemId, LocalizedName, TeamId};

/// Team a player belongs to in the source games.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: LocalizedName,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub sprite: String,
}

/// Crest the user can put on the roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Emblem {
    pub id: EmblemId,
    pub team_name: LocalizedName,
    #[serde(default)]
    pub sprite: String,
}
