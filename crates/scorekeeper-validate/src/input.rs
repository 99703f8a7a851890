//! Typed inputs produced by validation.
//!
//! Create inputs carry every field; patches carry `Option<T>` per field where
//! `None` means "keep the stored value".

use crate::error::{FieldError, ValidationErrors};
use crate::shape::{GAME, Normalized, PLAYER, Presence, SCORE};
use chrono::NaiveDate;
use scorekeeper_core::RecordId;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub join_date: Option<NaiveDate>,
}

impl PlayerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.join_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub title: String,
    pub genre: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePatch {
    pub title: Option<String>,
    pub genre: Option<String>,
}

impl GamePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.genre.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub player_id: RecordId,
    pub game_id: RecordId,
    pub score: i32,
    pub date_played: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScorePatch {
    pub player_id: Option<RecordId>,
    pub game_id: Option<RecordId>,
    pub score: Option<i32>,
    pub date_played: Option<NaiveDate>,
}

impl ScorePatch {
    pub fn is_empty(&self) -> bool {
        self.player_id.is_none()
            && self.game_id.is_none()
            && self.score.is_none()
            && self.date_played.is_none()
    }
}

// Required fields are guaranteed by `Shape::check` with `Presence::Required`;
// the fallback error only fires if a shape and its typed input drift apart.
fn required<T>(value: Option<T>, field: &str) -> Result<T, ValidationErrors> {
    value.ok_or_else(|| FieldError::required(field).into())
}

/// Validate a player create body.
pub fn new_player(payload: &Value) -> Result<NewPlayer, ValidationErrors> {
    let mut n: Normalized = PLAYER.check(payload, Presence::Required)?;
    Ok(NewPlayer {
        name: required(n.take_text("name"), "name")?,
        join_date: required(n.take_date("join_date"), "join_date")?,
    })
}

/// Validate a player update body.
pub fn player_patch(payload: &Value) -> Result<PlayerPatch, ValidationErrors> {
    let mut n = PLAYER.check(payload, Presence::Optional)?;
    Ok(PlayerPatch {
        name: n.take_text("name"),
        join_date: n.take_date("join_date"),
    })
}

/// Validate a game create body.
pub fn new_game(payload: &Value) -> Result<NewGame, ValidationErrors> {
    let mut n = GAME.check(payload, Presence::Required)?;
    Ok(NewGame {
        title: required(n.take_text("title"), "title")?,
        genre: required(n.take_text("genre"), "genre")?,
    })
}

/// Validate a game update body.
pub fn game_patch(payload: &Value) -> Result<GamePatch, ValidationErrors> {
    let mut n = GAME.check(payload, Presence::Optional)?;
    Ok(GamePatch {
        title: n.take_text("title"),
        genre: n.take_text("genre"),
    })
}

/// Validate a score create body.
pub fn new_score(payload: &Value) -> Result<NewScore, ValidationErrors> {
    let mut n = SCORE.check(payload, Presence::Required)?;
    Ok(NewScore {
        player_id: required(n.take_int("player_id"), "player_id")?,
        game_id: required(n.take_int("game_id"), "game_id")?,
        score: required(n.take_int("score"), "score")?,
        date_played: required(n.take_date("date_played"), "date_played")?,
    })
}

/// Validate a score update body.
pub fn score_patch(payload: &Value) -> Result<ScorePatch, ValidationErrors> {
    let mut n = SCORE.check(payload, Presence::Optional)?;
    Ok(ScorePatch {
        player_id: n.take_int("player_id"),
        game_id: n.take_int("game_id"),
        score: n.take_int("score"),
        date_played: n.take_date("date_played"),
    })
}
