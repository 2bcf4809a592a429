use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;

use super::{optional_id, required_id};
use crate::api::{error::ApiResult, state::AppState, types::*};
use crate::domain::League;
use crate::engine::FixtureCard;
use crate::services::{LeagueOverview, StandingRow};

/// GET /api/leagues
pub async fn get_leagues(State(state): State<AppState>) -> ApiResult<Json<Envelope<Vec<League>>>> {
    let leagues = state.feed.leagues().await?;
    Ok(Json(Envelope::ok(leagues)))
}

/// GET /api/leagues/standings
pub async fn get_standings(
    State(state): State<AppState>,
    Query(query): Query<StandingsQuery>,
) -> ApiResult<Json<Envelope<Vec<StandingRow>>>> {
    let league_id = optional_id(query.league_id.as_deref(), "league_id")?;
    let season_id = optional_id(query.season_id.as_deref(), "season_id")?;
    let table = state.feed.standings(league_id, season_id).await?;
    Ok(Json(Envelope::ok(table)))
}

/// GET /api/leagues/:league_id/current
pub async fn get_league_current(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> ApiResult<Json<Envelope<LeagueOverview>>> {
    let league_id = required_id(Some(&league_id), "league_id")?;
    let overview = state
        .feed
        .league_current(league_id, Utc::now().date_naive())
        .await?;
    Ok(Json(Envelope::ok(overview)))
}

/// GET /api/leagues/:league_id/seasons/:season_id/fixtures
pub async fn get_league_fixtures(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((league_id, season_id)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<Vec<FixtureCard>>>> {
    let league_id = required_id(Some(&league_id), "league_id")?;
    let season_id = required_id(Some(&season_id), "season_id")?;
    let viewer = state.viewer(&headers);
    let cards = state
        .feed
        .league_fixtures(
            league_id,
            season_id,
            viewer.as_ref(),
            Utc::now().date_naive(),
        )
        .await?;
    Ok(Json(Envelope::ok(cards)))
}
