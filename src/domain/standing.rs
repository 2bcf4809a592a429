use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FixtureId, LeagueId, SeasonId, TeamId};

/// Longest form sequence carried per team
pub const FORM_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl FormResult {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "W" => Some(Self::Win),
            "D" => Some(Self::Draw),
            "L" => Some(Self::Loss),
            _ => None,
        }
    }
}

/// Most recent results, oldest first, never longer than [`FORM_LENGTH`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Form(Vec<FormResult>);

impl Form {
    pub fn from_results<I: IntoIterator<Item = FormResult>>(results: I) -> Self {
        let mut all: Vec<FormResult> = results.into_iter().collect();
        if all.len() > FORM_LENGTH {
            all.drain(..all.len() - FORM_LENGTH);
        }
        Self(all)
    }

    /// Unrecognised tokens are skipped
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Self {
        Self::from_results(raw.iter().filter_map(|r| FormResult::parse(r.as_ref())))
    }

    pub fn results(&self) -> &[FormResult] {
        &self.0
    }
}

/// One table row for a team in a league season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingItem {
    pub league_id: LeagueId,
    pub season_id: SeasonId,
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(default)]
    pub team_logo: Option<String>,
    pub position: u32,
    pub points: i32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goal_difference: i32,
    #[serde(default)]
    pub form: Form,
    /// Weak reference, resolved best-effort
    #[serde(default)]
    pub next_fixture_id: Option<FixtureId>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StandingItem {
    pub fn matches_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}
