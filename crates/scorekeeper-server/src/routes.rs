//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(
            "/players",
            get(handlers::list_players).post(handlers::create_player),
        )
        .route(
            "/players/{id}",
            get(handlers::get_player)
                .put(handlers::update_player)
                .delete(handlers::delete_player),
        )
        .route(
            "/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(
            "/games/{id}",
            get(handlers::get_game)
                .put(handlers::update_game)
                .delete(handlers::delete_game),
        )
        .route(
            "/scores",
            get(handlers::list_scores).post(handlers::create_score),
        )
        .route(
            "/scores/{id}",
            get(handlers::get_score)
                .put(handlers::update_score)
                .delete(handlers::delete_score),
        )
        .route("/players-scores", get(handlers::player_scores))
        .route("/top-players", get(handlers::top_players))
        .route("/inactive-players", get(handlers::inactive_players))
        .route("/popular-genres", get(handlers::popular_genres))
        .route("/recent-players", get(handlers::recent_players))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
