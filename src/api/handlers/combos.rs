use axum::{extract::State, http::HeaderMap, Json};

use crate::api::{error::ApiResult, state::AppState, types::Envelope};
use crate::engine::ComboView;

/// GET /api/combos/current
pub async fn get_current_combo(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Envelope<ComboView>>> {
    let viewer = state.viewer(&headers);
    let combo = state.feed.current_combo(viewer.as_ref()).await?;
    Ok(Json(Envelope::ok(combo)))
}
