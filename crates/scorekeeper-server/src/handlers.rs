//! Request handlers.
//!
//! Each handler validates its inputs, makes at most one store call, and maps
//! the outcome onto a status code. A validation failure returns before the
//! store is touched.

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use scorekeeper_core::{
    Entity, Game, GenrePopularityRow, Player, PlayerNameRow, PlayerScoreRow, RecentPlayerRow,
    RecordId, Score, TopPlayerRow,
};
use scorekeeper_validate::{self as validate, ValidationErrors};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Body returned by successful deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn deleted(entity: Entity, id: RecordId) -> Self {
        Self {
            message: format!("{} with ID {} deleted successfully.", entity, id),
        }
    }
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true, "service": "scorekeeper" }))
}

// =============================================================================
// Players
// =============================================================================

pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    Ok(Json(state.repo().list_players().await?))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let id = validate::record_id(&id)?;
    Ok(Json(state.repo().get_player(id).await?))
}

pub async fn create_player(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let input = validate::new_player(&body)?;
    let player = state.repo().create_player(input).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Player>, ApiError> {
    let (id, patch) =
        ValidationErrors::combine(validate::record_id(&id), validate::player_patch(&body))?;
    Ok(Json(state.repo().update_player(id, patch).await?))
}

pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate::record_id(&id)?;
    state.repo().delete_player(id).await?;
    Ok(Json(MessageResponse::deleted(Entity::Player, id)))
}

// =============================================================================
// Games
// =============================================================================

pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>, ApiError> {
    Ok(Json(state.repo().list_games().await?))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    let id = validate::record_id(&id)?;
    Ok(Json(state.repo().get_game(id).await?))
}

pub async fn create_game(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let input = validate::new_game(&body)?;
    let game = state.repo().create_game(input).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Game>, ApiError> {
    let (id, patch) =
        ValidationErrors::combine(validate::record_id(&id), validate::game_patch(&body))?;
    Ok(Json(state.repo().update_game(id, patch).await?))
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate::record_id(&id)?;
    state.repo().delete_game(id).await?;
    Ok(Json(MessageResponse::deleted(Entity::Game, id)))
}

// =============================================================================
// Scores
// =============================================================================

pub async fn list_scores(State(state): State<AppState>) -> Result<Json<Vec<Score>>, ApiError> {
    Ok(Json(state.repo().list_scores().await?))
}

pub async fn get_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Score>, ApiError> {
    let id = validate::record_id(&id)?;
    Ok(Json(state.repo().get_score(id).await?))
}

pub async fn create_score(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Score>), ApiError> {
    let input = validate::new_score(&body)?;
    let score = state.repo().create_score(input).await?;
    Ok((StatusCode::CREATED, Json(score)))
}

pub async fn update_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Score>, ApiError> {
    let (id, patch) =
        ValidationErrors::combine(validate::record_id(&id), validate::score_patch(&body))?;
    Ok(Json(state.repo().update_score(id, patch).await?))
}

pub async fn delete_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate::record_id(&id)?;
    state.repo().delete_score(id).await?;
    Ok(Json(MessageResponse::deleted(Entity::Score, id)))
}

// =============================================================================
// Reports
// =============================================================================

pub async fn player_scores(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<PlayerScoreRow>>, ApiError> {
    let query = validate::listing_query(&params)?;
    Ok(Json(state.repo().player_scores(query.limit).await?))
}

pub async fn top_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopPlayerRow>>, ApiError> {
    Ok(Json(state.repo().top_players().await?))
}

pub async fn inactive_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerNameRow>>, ApiError> {
    Ok(Json(state.repo().inactive_players().await?))
}

pub async fn popular_genres(
    State(state): State<AppState>,
) -> Result<Json<GenrePopularityRow>, ApiError> {
    state
        .repo()
        .popular_genre()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No scores have been recorded yet.".to_string()))
}

pub async fn recent_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecentPlayerRow>>, ApiError> {
    Ok(Json(state.repo().recent_players().await?))
}
