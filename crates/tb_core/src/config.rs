//! # Builder Configuration
//!
//! Sizes and defaults for one assembly engine. Every field has a default so
//! a config file only needs to name what it changes.
//!
//! ```rust
//! use tb_core::config::BuilderConfig;
//!
//! let config = BuilderConfig::default();
//! assert_eq!(config.bench_size, 5);
//! let replay = BuilderConfig::seeded(42);
//! assert_eq!(replay.seed, Some(42));
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::models::Language;
use crate::selection::DEFAULT_BENCH_SIZE;

pub const DEFAULT_FIELD_SLOTS: usize = 11;
pub const DEFAULT_OFFER_SIZE: usize = 5;
pub const DEFAULT_FORMATION: &str = "4-4-2 (F-Basic)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Positions every formation must define
    pub field_slots: usize,
    pub bench_size: usize,
    /// Candidates shown per draft step
    pub offer_size: usize,
    /// Formation preselected on reset (skipped if the pool lacks it)
    pub default_formation: String,
    pub language: Language,
    /// Fixed RNG seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            field_slots: DEFAULT_FIELD_SLOTS,
            bench_size: DEFAULT_BENCH_SIZE,
            offer_size: DEFAULT_OFFER_SIZE,
            default_formation: DEFAULT_FORMATION.to_string(),
            language: Language::default(),
            seed: None,
        }
    }
}

impl BuilderConfig {
    /// Default sizes with a fixed seed (tests, replays).
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, anything else is read as YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json { Self::from_json_str(&raw)? } else { Self::from_yaml_str(&raw)? };
        debug!(path = %path.display(), ?config, "loaded builder config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_slots == 0 {
            return Err(RosterError::InvalidConfig("field_slots must be at least 1".into()));
        }
        if self.bench_size == 0 {
            return Err(RosterError::InvalidConfig("bench_size must be at least 1".into()));
        }
        if self.offer_size == 0 {
            return Err(RosterError::InvalidConfig("offer_size must be at least 1".into()));
        }
        Ok(())
    }
}
