use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{ComboId, FixtureId, PlayerId};

/// Interval (minutes) assumed when a document carries no `pct_change_interval`
pub const DEFAULT_PCT_CHANGE_INTERVAL: f64 = 5.0;

pub const FIXTURE_PREDICTION_TYPE: &str = "fixture";
pub const PLAYER_PREDICTION_TYPE: &str = "player_match";

fn default_pct_change_interval() -> f64 {
    DEFAULT_PCT_CHANGE_INTERVAL
}

/// What a prediction is about. Serialized inline as `fixture_id` or `player_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionSubject {
    Fixture { fixture_id: FixtureId },
    Player { player_id: PlayerId },
}

impl PredictionSubject {
    pub fn fixture(fixture_id: FixtureId) -> Self {
        Self::Fixture { fixture_id }
    }

    pub fn player(player_id: PlayerId) -> Self {
        Self::Player { player_id }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Self::Player { .. })
    }
}

/// A computed forecast. `pre_game_prediction` is frozen at kickoff; `prediction`
/// tracks the live value until the fixture finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(flatten)]
    pub subject: PredictionSubject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_id: Option<ComboId>,
    pub prediction_id: i64,
    pub prediction_type: String,
    pub prediction_display_name: String,
    pub pre_game_prediction: f64,
    #[serde(default)]
    pub pre_game_prediction_reasons: Vec<String>,
    #[serde(default)]
    pub prediction: Option<f64>,
    #[serde(default)]
    pub prediction_reasons: Option<Vec<String>>,
    #[serde(default)]
    pub pct_change_value: Option<f64>,
    #[serde(default = "default_pct_change_interval")]
    pub pct_change_interval: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the text fields have been replaced for a non-premium viewer
    #[serde(default)]
    pub locked: bool,
}

impl Prediction {
    pub fn fixture_id(&self) -> Option<FixtureId> {
        match self.subject {
            PredictionSubject::Fixture { fixture_id } => Some(fixture_id),
            PredictionSubject::Player { .. } => None,
        }
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        match self.subject {
            PredictionSubject::Player { player_id } => Some(player_id),
            PredictionSubject::Fixture { .. } => None,
        }
    }

    fn sort_key(&self, field: PredictionSortField) -> Option<f64> {
        match field {
            PredictionSortField::PctChange => self.pct_change_value,
            PredictionSortField::PreGame => Some(self.pre_game_prediction),
            PredictionSortField::Live => self.prediction,
            PredictionSortField::CreatedAt => Some(self.created_at.timestamp_millis() as f64),
        }
    }

    /// Ascending comparison on `field`. Missing values order before present ones,
    /// matching the document store's null ordering; ties break on `prediction_id`.
    pub fn compare_by(&self, other: &Self, field: PredictionSortField) -> Ordering {
        let by_field = match (self.sort_key(field), other.sort_key(field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.total_cmp(&b),
        };
        by_field.then_with(|| self.prediction_id.cmp(&other.prediction_id))
    }
}

/// Fields predictions may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionSortField {
    PctChange,
    PreGame,
    Live,
    CreatedAt,
}

impl PredictionSortField {
    /// Request key → field, as advertised to clients
    pub const KEYS: [(&'static str, PredictionSortField); 4] = [
        ("pct_change", Self::PctChange),
        ("prediction_pre_game", Self::PreGame),
        ("prediction", Self::Live),
        ("created_at", Self::CreatedAt),
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Self::PctChange => "pct_change_value",
            Self::PreGame => "pre_game_prediction",
            Self::Live => "prediction",
            Self::CreatedAt => "created_at",
        }
    }
}
