use axum::{extract::State, http::StatusCode, Json};

use crate::api::state::AppState;
use crate::services::HealthResponse;

/// GET /health -- liveness/readiness probe
pub async fn health_handler(
    State(state): State<AppState>,
) -> std::result::Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let resp = state.feed.health(state.start_time).await;
    if resp.status.is_healthy() {
        Ok(Json(resp))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(resp)))
    }
}
