//! Roster snapshots and the hand-off to the image exporter.
//!
//! The exporter itself (canvas rendering) lives outside this crate; it
//! receives an `ExportRequest` and renders it however it likes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CoachId, EmblemId, Formation, Language, PlayerId, ViewportClass};
use crate::pool::RosterPool;
use crate::selection::SlotKind;

/// Canvas size the team image is rendered at.
pub const EXPORT_WIDTH: u32 = 1280;
pub const EXPORT_HEIGHT: u32 = 500;
pub const DEFAULT_WATERMARK: &str = "inazuma-eleven.fr";
pub const DEFAULT_FILE_NAME: &str = "team-image.png";

/// Committed roster, detached from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub formation: Option<String>,
    pub coach: Option<CoachId>,
    /// One entry per formation slot, in formation order
    pub field: Vec<Option<PlayerId>>,
    pub bench: Vec<Option<PlayerId>>,
    /// Field slots filled with an off-position player
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_slots: Vec<usize>,
    #[serde(default)]
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emblem: Option<EmblemId>,
}

impl RosterSnapshot {
    pub fn is_complete(&self) -> bool {
        self.formation.is_some()
            && self.coach.is_some()
            && self.field.iter().chain(self.bench.iter()).all(Option::is_some)
    }

    pub fn unfilled_count(&self) -> usize {
        self.field.iter().chain(self.bench.iter()).filter(|s| s.is_none()).count()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.field.iter().chain(self.bench.iter()).flatten()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text roster, one line per slot, names in `language`.
    pub fn render_lines(&self, pool: &RosterPool, language: Language) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.field.len() + self.bench.len() + 3);

        if !self.team_name.is_empty() {
            lines.push(format!("Team: {}", self.team_name));
        }
        lines.push(format!("Formation: {}", self.formation.as_deref().unwrap_or("-")));
        let coach = self
            .coach
            .as_ref()
            .and_then(|id| pool.coach(id))
            .map(|c| c.display_name(language).to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!("Coach: {}", coach));

        let formation: Option<&Formation> = self.formation.as_deref().and_then(|n| pool.formation(n));
        for (kind, slots) in [(SlotKind::Field, &self.field), (SlotKind::Bench, &self.bench)] {
            for (index, slot) in slots.iter().enumerate() {
                let required = match kind {
                    SlotKind::Field => formation
                        .and_then(|f| f.requirement(index))
                        .map(|p| p.code())
                        .unwrap_or("--"),
                    SlotKind::Bench => "  ",
                };
                let name = match slot {
                    Some(id) => pool
                        .player(id)
                        .map(|p| format!("{} ({})", p.display_name(language), p.position))
                        .unwrap_or_else(|| id.to_string()),
                    None => "(empty)".to_string(),
                };
                let marker = if kind == SlotKind::Field && self.fallback_slots.contains(&index) {
                    " *"
                } else {
                    ""
                };
                lines.push(format!("{:<10} {} {}{}", kind.slot_label(index), required, name, marker));
            }
        }
        lines
    }
}

/// What the image exporter needs to draw the team card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub width: u32,
    pub height: u32,
    pub viewport: ViewportClass,
    /// Formation layout for the viewport, if the dataset ships one
    pub template: Option<String>,
    pub watermark: String,
    pub file_name: String,
    pub language: Language,
    pub snapshot: RosterSnapshot,
    pub requested_at: DateTime<Utc>,
}

impl ExportRequest {
    pub fn new(
        snapshot: RosterSnapshot,
        pool: &RosterPool,
        viewport: ViewportClass,
        language: Language,
    ) -> Self {
        let template = snapshot
            .formation
            .as_deref()
            .and_then(|name| pool.formation(name))
            .and_then(|f| f.template_for(viewport))
            .map(str::to_string);

        Self {
            width: EXPORT_WIDTH,
            height: EXPORT_HEIGHT,
            viewport,
            template,
            watermark: DEFAULT_WATERMARK.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            language,
            snapshot,
            requested_at: Utc::now(),
        }
    }

    pub fn with_watermark(mut self, watermark: impl Into<String>) -> Self {
        self.watermark = watermark.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::selection::SelectionState;

    fn sample_snapshot() -> (RosterPool, RosterSnapshot) {
        let pool = fixtures::standard_pool();
        let mut state = SelectionState::new(2);
        state.set_formation(pool.formations[0].clone());
        state.set_coach(pool.coaches[0].clone());
        state.set_team_name("Raimon");
        state.commit_assignment(SlotKind::Field, 0, &"gk-1".into(), false).unwrap();
        state.commit_assignment(SlotKind::Field, 1, &"mf-2".into(), true).unwrap();
        state.commit_assignment(SlotKind::Bench, 1, &"fw-1".into(), false).unwrap();
        (pool, state.snapshot())
    }

    #[test]
    fn test_snapshot_completeness() {
        let (_, snapshot) = sample_snapshot();
        assert!(!snapshot.is_complete());
        assert_eq!(snapshot.unfilled_count(), 9 + 1);
        assert_eq!(snapshot.player_ids().count(), 3);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let (_, snapshot) = sample_snapshot();
        let json: serde_json::Value =
            serde_json::from_str(&snapshot.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["formation"], "4-4-2 (F-Basic)");
        assert_eq!(json["field"][0], "gk-1");
        assert!(json["field"][2].is_null());
        assert_eq!(json["fallback_slots"][0], 1);
        assert!(json.get("emblem").is_none());
    }

    #[test]
    fn test_render_lines_uses_language() {
        let (pool, snapshot) = sample_snapshot();
        let english = snapshot.render_lines(&pool, Language::Primary);
        let japanese = snapshot.render_lines(&pool, Language::Secondary);

        assert_eq!(english[0], "Team: Raimon");
        assert!(english.iter().any(|l| l.starts_with("Player #1") && l.contains("Keeper One (GK)")));
        assert!(english.iter().any(|l| l.starts_with("Player #2") && l.ends_with(" *")));
        assert!(english.iter().any(|l| l.starts_with("Sub #1") && l.contains("(empty)")));
        assert!(japanese.iter().any(|l| l.contains("キーパー1")));
    }

    #[test]
    fn test_export_request_picks_viewport_template() {
        let (pool, snapshot) = sample_snapshot();
        let request =
            ExportRequest::new(snapshot, &pool, ViewportClass::Phone, Language::Primary);

        assert_eq!(request.width, 1280);
        assert_eq!(request.height, 500);
        assert_eq!(request.template.as_deref(), Some("<div class=\"f442 phone\"></div>"));
        assert_eq!(request.with_watermark("my-site").watermark, "my-site");
    }
}
