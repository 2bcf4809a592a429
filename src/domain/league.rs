use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{LeagueId, SeasonId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub league_id: LeagueId,
    pub league_name: String,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub league_type: Option<String>,
    #[serde(default)]
    pub league_sub_type: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub is_prod: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub league_id: LeagueId,
    pub season_id: SeasonId,
    pub season_name: String,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub starting_at: Option<NaiveDate>,
    #[serde(default)]
    pub ending_at: Option<NaiveDate>,
}

impl Season {
    /// Flagged current, or `today` lies inside the season's dates
    pub fn is_current_on(&self, today: NaiveDate) -> bool {
        if self.is_current {
            return true;
        }
        match (self.starting_at, self.ending_at) {
            (Some(start), Some(end)) => start <= today && today <= end,
            _ => false,
        }
    }
}
