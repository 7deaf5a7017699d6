//! Roster Pool
//!
//! Static formations, coaches and players (plus the teams and emblems the
//! picker groups them by). Loaded once, validated, then read by the
//! assembly engine. The only mutation is adding custom players.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, RosterError};
use crate::models::{
    Coach, CoachId, Emblem, EmblemId, Formation, Language, LocalizedName, Player, PlayerId,
    Position, Team, TeamId,
};

/// Team id given to players added through `add_custom_player`.
pub const CUSTOM_TEAM_ID: &str = "custom";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterPool {
    pub formations: Vec<Formation>,
    pub coaches: Vec<Coach>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub emblems: Vec<Emblem>,
}

impl RosterPool {
    pub fn new(formations: Vec<Formation>, coaches: Vec<Coach>, players: Vec<Player>) -> Self {
        Self { formations, coaches, players, teams: Vec::new(), emblems: Vec::new() }
    }

    pub fn with_teams(mut self, teams: Vec<Team>) -> Self {
        self.teams = teams;
        self
    }

    pub fn with_emblems(mut self, emblems: Vec<Emblem>) -> Self {
        self.emblems = emblems;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let pool: RosterPool = serde_json::from_str(json)?;
        debug!(
            formations = pool.formations.len(),
            coaches = pool.coaches.len(),
            players = pool.players.len(),
            "parsed roster pool"
        );
        Ok(pool)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let pool = Self::from_json_str(&content)?;
        info!(path = %path.display(), players = pool.players.len(), "loaded roster pool");
        Ok(pool)
    }

    /// Check the pool invariants the engine relies on.
    ///
    /// - formation names, coach ids and player ids are unique
    /// - every formation has exactly `field_slots` positions
    /// - every coach and player has a name in each language
    pub fn validate(&self, field_slots: usize) -> Result<()> {
        let mut names = HashSet::new();
        for formation in &self.formations {
            if !names.insert(formation.name.as_str()) {
                return Err(RosterError::InvalidPool(format!(
                    "duplicate formation name: {}",
                    formation.name
                )));
            }
            if formation.slot_count() != field_slots {
                return Err(RosterError::InvalidPool(format!(
                    "formation {} has {} positions, expected {}",
                    formation.name,
                    formation.slot_count(),
                    field_slots
                )));
            }
        }

        let mut coach_ids = HashSet::new();
        for coach in &self.coaches {
            if !coach_ids.insert(&coach.id) {
                return Err(RosterError::InvalidPool(format!("duplicate coach id: {}", coach.id)));
            }
            if !coach.name.is_complete() {
                return Err(RosterError::InvalidPool(format!(
                    "coach {} is missing a localized name",
                    coach.id
                )));
            }
        }

        let mut player_ids = HashSet::new();
        for player in &self.players {
            if !player_ids.insert(&player.id) {
                return Err(RosterError::InvalidPool(format!(
                    "duplicate player id: {}",
                    player.id
                )));
            }
            if !player.name.is_complete() {
                return Err(RosterError::InvalidPool(format!(
                    "player {} is missing a localized name",
                    player.id
                )));
            }
        }

        Ok(())
    }

    pub fn formation(&self, name: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.name == name)
    }

    pub fn coach(&self, id: &CoachId) -> Option<&Coach> {
        self.coaches.iter().find(|c| &c.id == id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    pub fn emblem(&self, id: &EmblemId) -> Option<&Emblem> {
        self.emblems.iter().find(|e| &e.id == id)
    }

    pub fn players_at(&self, position: Position) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.position == position)
    }

    /// Players grouped under their team, in dataset team order.
    ///
    /// With `game` set only teams (and players) from that game are listed.
    /// Teams without players are skipped.
    pub fn players_by_team(&self, game: Option<&str>) -> Vec<(&Team, Vec<&Player>)> {
        self.teams
            .iter()
            .filter(|team| game.map_or(true, |g| team.game == g))
            .filter_map(|team| {
                let members: Vec<&Player> = self
                    .players
                    .iter()
                    .filter(|p| p.team == team.id && p.game == team.game)
                    .collect();
                (!members.is_empty()).then_some((team, members))
            })
            .collect()
    }

    /// Emblems ordered by their team name in the given language.
    pub fn emblems_sorted(&self, language: Language) -> Vec<&Emblem> {
        let mut emblems: Vec<&Emblem> = self.emblems.iter().collect();
        emblems.sort_by(|a, b| a.team_name.get(language).cmp(b.team_name.get(language)));
        emblems
    }

    /// Add a user-made player and return its generated id.
    ///
    /// The id is `custom-<slug>` where the slug keeps only ASCII
    /// alphanumerics of the lowercased name; a numeric suffix resolves
    /// collisions.
    pub fn add_custom_player(
        &mut self,
        name: &str,
        position: Position,
        sprite: impl Into<String>,
    ) -> Result<PlayerId> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::InvalidPool("custom player name is empty".into()));
        }

        let slug: String = trimmed
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let base = if slug.is_empty() { "custom".to_string() } else { format!("custom-{}", slug) };

        let mut id = PlayerId::new(base.clone());
        let mut suffix = 2;
        while self.player(&id).is_some() {
            id = PlayerId::new(format!("{}-{}", base, suffix));
            suffix += 1;
        }

        let mut player = Player::new(id.clone(), LocalizedName::same(trimmed), position, CUSTOM_TEAM_ID);
        player.sprite = sprite.into();
        player.custom = true;
        self.players.push(player);

        info!(player = %id, "added custom player");
        Ok(id)
    }
}
