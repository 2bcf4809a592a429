use serde::{Deserialize, Serialize};

use crate::criteria::FixtureFilterParams;
use crate::services::PredictionQuery;

// ============================================================================
// Envelope
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub code: String,
    pub message: String,
}

/// Every response body, success or failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<ErrorItem>,
    pub warnings: Vec<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self::with_warnings(data, Vec::new())
    }

    pub fn with_warnings(data: T, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
            warnings,
        }
    }

    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors: vec![ErrorItem {
                code: code.to_string(),
                message: message.into(),
            }],
            warnings: Vec::new(),
        }
    }
}

// ============================================================================
// Query parameters
// ============================================================================
//
// Numeric parameters arrive as strings so malformed values produce the
// envelope's validation error instead of a framework rejection.

#[derive(Debug, Default, Deserialize)]
pub struct FixtureListQuery {
    pub fixture_ids: Option<String>,
    pub leagues: Option<String>,
    pub match_type: Option<String>,
    pub sort_by: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl FixtureListQuery {
    pub fn filters(&self) -> FixtureFilterParams<'_> {
        FixtureFilterParams {
            leagues: self.leagues.as_deref(),
            match_type: self.match_type.as_deref(),
            sort_by: self.sort_by.as_deref(),
            date_from: self.date_from.as_deref(),
            date_to: self.date_to.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub fixture_ids: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictionListQuery {
    pub fixture_id: Option<String>,
    pub fixture_ids: Option<String>,
    pub combo_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<String>,
}

impl PredictionListQuery {
    pub fn page(&self, limit: Option<i64>) -> PredictionQuery<'_> {
        PredictionQuery {
            sort_by: self.sort_by.as_deref(),
            sort_order: self.sort_order.as_deref(),
            limit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StandingsQuery {
    pub league_id: Option<String>,
    pub season_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    pub season_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WatchlistQuery {
    pub year: Option<String>,
    pub day: Option<String>,
    pub player_id: Option<String>,
    pub limit: Option<String>,
}
