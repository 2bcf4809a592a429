use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FixtureId, LeagueId, SeasonId, TeamId};

/// Lifecycle of a match as seen by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Live,
    Upcoming,
    Finished,
}

impl FixtureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Upcoming => "upcoming",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for FixtureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One side of a fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSide {
    pub team_id: TeamId,
    pub name: String,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub score: Option<u32>,
}

impl TeamSide {
    /// Short code, or the first three letters of the name upper-cased
    pub fn display_code(&self) -> String {
        match &self.short_code {
            Some(code) if !code.is_empty() => code.clone(),
            _ => self.name.chars().take(3).collect::<String>().to_uppercase(),
        }
    }
}

/// A scheduled, live or finished match. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub fixture_id: FixtureId,
    pub league_id: LeagueId,
    #[serde(default)]
    pub league_name: Option<String>,
    #[serde(default)]
    pub season_id: Option<SeasonId>,
    pub home: TeamSide,
    pub away: TeamSide,
    pub kickoff_at: DateTime<Utc>,
    #[serde(default)]
    pub minutes_elapsed: Option<u32>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

impl Fixture {
    /// Status derived from the timing fields: a recorded end wins, then a running clock.
    pub fn status(&self) -> FixtureStatus {
        if self.ended_at.is_some() {
            FixtureStatus::Finished
        } else if self.minutes_elapsed.is_some() {
            FixtureStatus::Live
        } else {
            FixtureStatus::Upcoming
        }
    }

    /// Elapsed minutes are only meaningful once the match has started
    pub fn visible_minutes(&self) -> Option<u32> {
        match self.status() {
            FixtureStatus::Upcoming => None,
            _ => self.minutes_elapsed,
        }
    }

    /// The other side of the match for `team_id`
    pub fn opponent_of(&self, team_id: TeamId) -> Option<&TeamSide> {
        if self.home.team_id == team_id {
            Some(&self.away)
        } else if self.away.team_id == team_id {
            Some(&self.home)
        } else {
            None
        }
    }
}

/// Auxiliary per-fixture documents served verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureDetailKind {
    Commentary,
    Weather,
    Statistics,
}

impl FixtureDetailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commentary => "commentary",
            Self::Weather => "weather",
            Self::Statistics => "statistics",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "commentary" => Some(Self::Commentary),
            "weather" => Some(Self::Weather),
            "statistics" => Some(Self::Statistics),
            _ => None,
        }
    }
}
