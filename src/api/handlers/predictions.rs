use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};

use super::{optional_id, required_id};
use crate::api::{error::ApiResult, state::AppState, types::*};
use crate::domain::Prediction;

/// GET /api/predictions/fixtures
pub async fn get_fixture_predictions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PredictionListQuery>,
) -> ApiResult<Json<Envelope<Vec<Prediction>>>> {
    let fixture_id = optional_id(query.fixture_id.as_deref(), "fixture_id")?;
    let limit = optional_id(query.limit.as_deref(), "limit")?;
    let viewer = state.viewer(&headers);

    let predictions = state
        .feed
        .fixture_predictions(
            fixture_id,
            query.fixture_ids.as_deref(),
            query.page(limit),
            viewer.as_ref(),
        )
        .await?;
    Ok(Json(Envelope::ok(predictions)))
}

/// GET /api/predictions/players/:player_id
pub async fn get_player_predictions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(player_id): Path<String>,
    Query(query): Query<PredictionListQuery>,
) -> ApiResult<Json<Envelope<Vec<Prediction>>>> {
    let player_id = required_id(Some(&player_id), "player_id")?;
    let limit = optional_id(query.limit.as_deref(), "limit")?;
    let viewer = state.viewer(&headers);

    let predictions = state
        .feed
        .player_predictions(player_id, query.page(limit), viewer.as_ref())
        .await?;
    Ok(Json(Envelope::ok(predictions)))
}

/// GET /api/predictions/combos
pub async fn get_combo_predictions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PredictionListQuery>,
) -> ApiResult<Json<Envelope<Vec<Prediction>>>> {
    let combo_id = optional_id(query.combo_id.as_deref(), "combo_id")?;
    let fixture_id = optional_id(query.fixture_id.as_deref(), "fixture_id")?;
    let limit = optional_id(query.limit.as_deref(), "limit")?;
    let viewer = state.viewer(&headers);

    let predictions = state
        .feed
        .combo_predictions(combo_id, fixture_id, query.page(limit), viewer.as_ref())
        .await?;
    Ok(Json(Envelope::ok(predictions)))
}
