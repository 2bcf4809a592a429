//! Response shapes
//!
//! Structural mapping only. Ordering and visibility are settled before records
//! reach these constructors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ComboId, Fixture, FixtureId, FixtureStatus, LeagueId, Prediction, SeasonId, SmartCombo,
    TeamSide,
};

/// Keep at most `cap` items
pub fn truncate<T>(mut items: Vec<T>, cap: usize) -> Vec<T> {
    items.truncate(cap);
    items
}

/// Prediction fields shown on a fixture card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimalPrediction {
    pub prediction_id: i64,
    pub prediction_display_name: String,
    pub pre_game_prediction: f64,
    pub prediction: Option<f64>,
    pub pct_change_value: Option<f64>,
    pub pct_change_interval: f64,
    pub locked: bool,
}

impl From<Prediction> for MinimalPrediction {
    fn from(p: Prediction) -> Self {
        Self {
            prediction_id: p.prediction_id,
            prediction_display_name: p.prediction_display_name,
            pre_game_prediction: p.pre_game_prediction,
            prediction: p.prediction,
            pct_change_value: p.pct_change_value,
            pct_change_interval: p.pct_change_interval,
            locked: p.locked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_id: i64,
    pub name: String,
    pub short_code: String,
    pub logo: Option<String>,
    pub score: Option<u32>,
}

impl From<TeamSide> for TeamSummary {
    fn from(side: TeamSide) -> Self {
        Self {
            short_code: side.display_code(),
            team_id: side.team_id,
            name: side.name,
            logo: side.logo,
            score: side.score,
        }
    }
}

/// Core fixture fields with the derived status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSummary {
    pub fixture_id: FixtureId,
    pub league_id: LeagueId,
    pub league_name: Option<String>,
    pub season_id: Option<SeasonId>,
    pub home: TeamSummary,
    pub away: TeamSummary,
    pub kickoff_at: DateTime<Utc>,
    pub status: FixtureStatus,
    pub minutes_elapsed: Option<u32>,
}

impl From<Fixture> for FixtureSummary {
    fn from(fixture: Fixture) -> Self {
        Self {
            status: fixture.status(),
            minutes_elapsed: fixture.visible_minutes(),
            fixture_id: fixture.fixture_id,
            league_id: fixture.league_id,
            league_name: fixture.league_name,
            season_id: fixture.season_id,
            home: fixture.home.into(),
            away: fixture.away.into(),
            kickoff_at: fixture.kickoff_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureCard {
    #[serde(flatten)]
    pub fixture: FixtureSummary,
    pub predictions: Vec<MinimalPrediction>,
}

impl FixtureCard {
    pub fn new(fixture: Fixture, predictions: Vec<Prediction>) -> Self {
        Self {
            fixture: fixture.into(),
            predictions: predictions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Fixture list payload. `fixture_ids` is only present for filter-driven lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixturesPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture_ids: Option<Vec<FixtureId>>,
    pub fixtures: Vec<FixtureCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboSummary {
    pub combo_id: ComboId,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub confidence: f64,
    pub total_odds: f64,
    pub fixture_ids: Vec<FixtureId>,
    pub is_active: bool,
    pub previous_week_combo_accuracy: Option<f64>,
}

impl From<SmartCombo> for ComboSummary {
    fn from(combo: SmartCombo) -> Self {
        Self {
            name: combo.display_name(),
            combo_id: combo.combo_id,
            description: combo.description,
            starts_at: combo.starts_at,
            expires_at: combo.expires_at,
            confidence: combo.confidence,
            total_odds: combo.total_odds,
            fixture_ids: combo.fixture_ids,
            is_active: combo.is_active,
            previous_week_combo_accuracy: combo.previous_week_combo_accuracy,
        }
    }
}

/// One member of a combo. `fixture` is absent when the document is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboFixture {
    pub fixture_id: FixtureId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<FixtureSummary>,
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboView {
    pub combo: ComboSummary,
    pub fixtures: Vec<ComboFixture>,
}
