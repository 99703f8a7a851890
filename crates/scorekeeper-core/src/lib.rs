//! # scorekeeper-core
//!
//! Domain model and configuration shared by every Scorekeeper crate.
//!
//! The three persisted entities are [`Player`], [`Game`] and [`Score`]. A score
//! references exactly one player and one game; deleting either one removes the
//! score through the store's cascade rule. The remaining row types are the
//! read-only projections returned by the reporting routes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// Configuration types shared across all Scorekeeper crates
pub mod config;

pub use config::{
    ConfigError, ConnectionPoolConfig, DatabaseConfig, ScorekeeperConfig, ServerConfig,
};

/// Store-assigned row identifier.
pub type RecordId = i32;

/// The persisted entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Player,
    Game,
    Score,
}

impl Entity {
    /// Name of the backing table.
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Player => "players",
            Entity::Game => "games",
            Entity::Score => "scores",
        }
    }

    /// Human-readable name used in response messages.
    pub fn label(&self) -> &'static str {
        match self {
            Entity::Player => "Player",
            Entity::Game => "Game",
            Entity::Score => "Score",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Entities
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: RecordId,
    pub name: String,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: RecordId,
    pub title: String,
    pub genre: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub id: RecordId,
    pub player_id: RecordId,
    pub game_id: RecordId,
    pub score: i32,
    pub date_played: NaiveDate,
}

// =============================================================================
// Report rows
// =============================================================================

/// One row of the player/game/score listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScoreRow {
    pub name: String,
    pub title: String,
    pub score: i32,
}

/// A player ranked by the sum of all their scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPlayerRow {
    pub name: String,
    pub total_score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNameRow {
    pub name: String,
}

/// The genre with the most recorded scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenrePopularityRow {
    pub genre: String,
    pub times_played: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPlayerRow {
    pub name: String,
    pub join_date: NaiveDate,
}

/// Number of trailing days a player counts as recently joined.
pub const RECENT_PLAYER_WINDOW_DAYS: i32 = 30;

/// Number of entries returned by the top-players ranking.
pub const TOP_PLAYERS_LIMIT: i64 = 3;
