use serde::{Deserialize, Serialize};

use super::{CoachId, Language, LocalizedName};

/// Team coach shown next to the pitch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coach {
    pub id: CoachId,
    pub name: LocalizedName,
    /// Portrait reference
    #[serde(default)]
    pub sprite: String,
}

impl Coach {
    pub fn new(id: impl Into<CoachId>, name: LocalizedName) -> Self {
        Self { id: id.into(), name, sprite: String::new() }
    }

    pub fn display_name(&self, language: Language) -> &str {
        self.name.get(language)
    }
}
