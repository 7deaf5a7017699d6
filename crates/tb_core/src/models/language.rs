// Display language toggle (English / Japanese names)
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;

/// Which localized name field to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English names
    #[default]
    Primary,
    /// Japanese names
    Secondary,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Primary, Language::Secondary];

    pub fn label(&self) -> &'static str {
        match self {
            Language::Primary => "English",
            Language::Secondary => "Japanese",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::Primary => Language::Secondary,
            Language::Secondary => Language::Primary,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" | "english" | "en" => Ok(Language::Primary),
            "secondary" | "japanese" | "ja" | "jp" => Ok(Language::Secondary),
            other => Err(RosterError::InvalidConfig(format!("unknown language: {}", other))),
        }
    }
}

/// A display name in every supported language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedName {
    pub primary: String,
    pub secondary: String,
}

impl LocalizedName {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self { primary: primary.into(), secondary: secondary.into() }
    }

    /// Same text in both languages (custom players have no translation).
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { primary: name.clone(), secondary: name }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Primary => &self.primary,
            Language::Secondary => &self.secondary,
        }
    }

    /// Every language has a non-empty name.
    pub fn is_complete(&self) -> bool {
        Language::ALL.iter().all(|lang| !self.get(*lang).trim().is_empty())
    }
}
