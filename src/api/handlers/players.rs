use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;

use super::{optional_id, required_id};
use crate::api::{error::ApiResult, state::AppState, types::*};
use crate::domain::PlayerStatLine;
use crate::error::FeedError;
use crate::services::{PlayerProfile, WatchlistPlayer, WatchlistView};

/// GET /api/players/:player_id
pub async fn get_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(player_id): Path<String>,
) -> ApiResult<Json<Envelope<PlayerProfile>>> {
    let player_id = required_id(Some(&player_id), "player_id")?;
    let viewer = state.viewer(&headers);
    let profile = state.feed.player(player_id, viewer.as_ref()).await?;
    Ok(Json(Envelope::ok(profile)))
}

/// GET /api/players/:player_id/statistics
pub async fn get_player_statistics(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Json<Envelope<PlayerStatLine>>> {
    let player_id = required_id(Some(&player_id), "player_id")?;
    let season_id = optional_id(query.season_id.as_deref(), "season_id")?;
    let stats = state.feed.player_statistics(player_id, season_id).await?;
    Ok(Json(Envelope::ok(stats)))
}

fn narrow<T: TryFrom<i64>>(value: Option<i64>, field_name: &str) -> Result<Option<T>, FeedError> {
    value
        .map(|v| {
            T::try_from(v)
                .map_err(|_| FeedError::validation(format!("{} is out of range", field_name)))
        })
        .transpose()
}

/// GET /api/watchlist
///
/// A stale or missing snapshot is still a success; the envelope carries the
/// warning.
pub async fn get_watchlist(
    State(state): State<AppState>,
    Query(query): Query<WatchlistQuery>,
) -> ApiResult<Json<Envelope<Option<WatchlistView>>>> {
    let year = narrow::<i32>(optional_id(query.year.as_deref(), "year")?, "year")?;
    let day = narrow::<u32>(optional_id(query.day.as_deref(), "day")?, "day")?;
    let player_id = optional_id(query.player_id.as_deref(), "player_id")?;
    let limit = optional_id(query.limit.as_deref(), "limit")?;

    let result = state
        .feed
        .watchlist(year, day, player_id, limit, Utc::now())
        .await?;
    Ok(Json(Envelope::with_warnings(result.data, result.warnings)))
}

/// GET /api/watchlist/players
pub async fn get_watchlist_players(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<WatchlistPlayer>>>> {
    let result = state.feed.watchlist_players(Utc::now()).await?;
    Ok(Json(Envelope::with_warnings(result.data, result.warnings)))
}
