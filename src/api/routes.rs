use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_handler))
        // Fixture endpoints
        .route("/api/fixtures", get(handlers::get_fixtures))
        .route("/api/fixtures/ids", get(handlers::get_fixture_ids))
        .route("/api/fixtures/featured", get(handlers::get_featured_fixtures))
        .route(
            "/api/fixtures/:fixture_id/:kind",
            get(handlers::get_fixture_detail),
        )
        // Prediction endpoints
        .route(
            "/api/predictions/fixtures",
            get(handlers::get_fixture_predictions),
        )
        .route(
            "/api/predictions/players/:player_id",
            get(handlers::get_player_predictions),
        )
        .route(
            "/api/predictions/combos",
            get(handlers::get_combo_predictions),
        )
        // Smart combo endpoints
        .route("/api/combos/current", get(handlers::get_current_combo))
        // League endpoints
        .route("/api/leagues", get(handlers::get_leagues))
        .route("/api/leagues/standings", get(handlers::get_standings))
        .route(
            "/api/leagues/:league_id/current",
            get(handlers::get_league_current),
        )
        .route(
            "/api/leagues/:league_id/seasons/:season_id/fixtures",
            get(handlers::get_league_fixtures),
        )
        // Player endpoints
        .route("/api/players/:player_id", get(handlers::get_player))
        .route(
            "/api/players/:player_id/statistics",
            get(handlers::get_player_statistics),
        )
        .route("/api/watchlist", get(handlers::get_watchlist))
        .route("/api/watchlist/players", get(handlers::get_watchlist_players))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
