//! Scoreboard collaborator
//!
//! Team creation and membership as the spawn hook needs them. The in-memory
//! implementation backs the demo binary and the tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{EngineError, EngineResult};

/// Team display colors the engine understands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamColor {
    #[default]
    White,
    DarkAqua,
    Gold,
    Red,
}

impl TeamColor {
    /// Parse a config-file color name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "white" => Some(TeamColor::White),
            "dark_aqua" => Some(TeamColor::DarkAqua),
            "gold" => Some(TeamColor::Gold),
            "red" => Some(TeamColor::Red),
            _ => None,
        }
    }

    /// Legacy formatting prefix the engine prepends to member names
    pub fn prefix(&self) -> &'static str {
        match self {
            TeamColor::White => "\u{a7}f",
            TeamColor::DarkAqua => "\u{a7}3",
            TeamColor::Gold => "\u{a7}6",
            TeamColor::Red => "\u{a7}c",
        }
    }
}

/// Scoreboard operations the hooks rely on
pub trait Scoreboard: Send + Sync {
    fn team_exists(&self, name: &str) -> bool;

    /// Create a team with the given display color. Creating an existing team
    /// is a no-op.
    fn create_team(&self, name: &str, color: TeamColor);

    /// Add a member id to a team
    fn add_member(&self, team: &str, member_id: &str) -> EngineResult<()>;

    fn members(&self, team: &str) -> Vec<String>;
}

struct Team {
    color: TeamColor,
    members: Vec<String>,
}

/// In-memory scoreboard
#[derive(Default)]
pub struct InMemoryScoreboard {
    teams: Mutex<HashMap<String, Team>>,
}

impl InMemoryScoreboard {
    pub fn team_color(&self, name: &str) -> Option<TeamColor> {
        self.teams.lock().unwrap().get(name).map(|team| team.color)
    }
}

impl Scoreboard for InMemoryScoreboard {
    fn team_exists(&self, name: &str) -> bool {
        self.teams.lock().unwrap().contains_key(name)
    }

    fn create_team(&self, name: &str, color: TeamColor) {
        let mut teams = self.teams.lock().unwrap();
        teams.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!("created team '{}' with prefix '{}'", name, color.prefix());
            Team {
                color,
                members: Vec::new(),
            }
        });
    }

    fn add_member(&self, team: &str, member_id: &str) -> EngineResult<()> {
        let mut teams = self.teams.lock().unwrap();
        let team = teams
            .get_mut(team)
            .ok_or_else(|| EngineError::UnknownTeam(team.to_string()))?;
        team.members.push(member_id.to_string());
        Ok(())
    }

    fn members(&self, team: &str) -> Vec<String> {
        self.teams
            .lock()
            .unwrap()
            .get(team)
            .map(|team| team.members.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_team_is_idempotent() {
        let scoreboard = InMemoryScoreboard::default();
        scoreboard.create_team("mods", TeamColor::DarkAqua);
        scoreboard.create_team("mods", TeamColor::Red);
        assert_eq!(scoreboard.team_color("mods"), Some(TeamColor::DarkAqua));
    }

    #[test]
    fn test_add_member_to_missing_team_fails() {
        let scoreboard = InMemoryScoreboard::default();
        let result = scoreboard.add_member("nope", "some-id");
        assert!(matches!(result, Err(EngineError::UnknownTeam(_))));
    }

    #[test]
    fn test_membership() {
        let scoreboard = InMemoryScoreboard::default();
        scoreboard.create_team("mods", TeamColor::Gold);
        scoreboard.add_member("mods", "a").unwrap();
        scoreboard.add_member("mods", "b").unwrap();
        assert_eq!(scoreboard.members("mods"), vec!["a", "b"]);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(TeamColor::parse("dark_aqua"), Some(TeamColor::DarkAqua));
        assert_eq!(TeamColor::parse("chartreuse"), None);
    }
}
