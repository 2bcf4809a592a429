use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;

use super::required_id;
use crate::api::{error::ApiResult, state::AppState, types::*};
use crate::domain::FixtureId;
use crate::engine::{FixtureCard, FixturesPage};
use crate::error::FeedError;

/// GET /api/fixtures
///
/// An explicit `fixture_ids` list wins over the filters.
pub async fn get_fixtures(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FixtureListQuery>,
) -> ApiResult<Json<Envelope<FixturesPage>>> {
    let viewer = state.viewer(&headers);
    let page = match query.fixture_ids.as_deref() {
        Some(raw) => state.feed.fixtures_by_ids(raw, viewer.as_ref()).await?,
        None => {
            state
                .feed
                .fixtures(&query.filters(), viewer.as_ref(), Utc::now())
                .await?
        }
    };
    Ok(Json(Envelope::ok(page)))
}

/// GET /api/fixtures/ids
pub async fn get_fixture_ids(
    State(state): State<AppState>,
    Query(query): Query<FixtureListQuery>,
) -> ApiResult<Json<Envelope<Vec<FixtureId>>>> {
    let ids = state.feed.fixture_ids(&query.filters(), Utc::now()).await?;
    Ok(Json(Envelope::ok(ids)))
}

/// GET /api/fixtures/featured
pub async fn get_featured_fixtures(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FeaturedQuery>,
) -> ApiResult<Json<Envelope<Vec<FixtureCard>>>> {
    let raw = query
        .fixture_ids
        .as_deref()
        .ok_or_else(|| FeedError::validation("fixture_ids is required"))?;
    let viewer = state.viewer(&headers);
    let cards = state.feed.featured_fixtures(raw, viewer.as_ref()).await?;
    Ok(Json(Envelope::ok(cards)))
}

/// GET /api/fixtures/:fixture_id/:kind
pub async fn get_fixture_detail(
    State(state): State<AppState>,
    Path((fixture_id, kind)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let fixture_id = required_id(Some(&fixture_id), "fixture_id")?;
    let detail = state.feed.fixture_detail(&kind, fixture_id).await?;
    Ok(Json(Envelope::ok(detail)))
}
