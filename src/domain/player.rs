use serde::{Deserialize, Serialize};

use super::{PlayerId, SeasonId, TeamId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub position_id: Option<i64>,
    #[serde(default)]
    pub nationality_id: Option<i64>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Aggregate statistics for a player; `season_id == None` is the career line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player_id: PlayerId,
    #[serde(default)]
    pub season_id: Option<SeasonId>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub position_id: Option<i64>,
    #[serde(default)]
    pub appearances: Option<u32>,
    #[serde(default)]
    pub minutes_played: Option<u32>,
    #[serde(default)]
    pub goals: Option<u32>,
    #[serde(default)]
    pub assists: Option<u32>,
    #[serde(default)]
    pub yellow_cards: Option<u32>,
    #[serde(default)]
    pub red_cards: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
}
