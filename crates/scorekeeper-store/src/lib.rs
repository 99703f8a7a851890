//! PostgreSQL query builder and executor for Scorekeeper.
//!
//! Every operation builds exactly one parameterized statement and runs it
//! once against the pool; nothing is retried and no statement spans tables
//! except the cascading delete the database performs itself.
//!
//! The operations are grouped into repository traits so the HTTP layer can be
//! exercised against an in-memory implementation. [`PgStore`] is the
//! production implementation.

use async_trait::async_trait;
use scorekeeper_core::{
    DatabaseConfig, Game, GenrePopularityRow, Player, PlayerNameRow, PlayerScoreRow, RecentPlayerRow,
    RecordId, Score, TopPlayerRow,
};
use scorekeeper_validate::{GamePatch, NewGame, NewPlayer, NewScore, PlayerPatch, ScorePatch};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

pub mod error;
mod games;
mod players;
mod reports;
mod scores;
mod sql;

pub use error::StoreError;

/// Create, read, update and delete players.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn list_players(&self) -> Result<Vec<Player>, StoreError>;
    async fn get_player(&self, id: RecordId) -> Result<Player, StoreError>;
    async fn create_player(&self, input: NewPlayer) -> Result<Player, StoreError>;
    async fn update_player(&self, id: RecordId, patch: PlayerPatch) -> Result<Player, StoreError>;
    async fn delete_player(&self, id: RecordId) -> Result<(), StoreError>;
}

/// Create, read, update and delete games.
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn list_games(&self) -> Result<Vec<Game>, StoreError>;
    async fn get_game(&self, id: RecordId) -> Result<Game, StoreError>;
    async fn create_game(&self, input: NewGame) -> Result<Game, StoreError>;
    async fn update_game(&self, id: RecordId, patch: GamePatch) -> Result<Game, StoreError>;
    async fn delete_game(&self, id: RecordId) -> Result<(), StoreError>;
}

/// Create, read, update and delete scores.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn list_scores(&self) -> Result<Vec<Score>, StoreError>;
    async fn get_score(&self, id: RecordId) -> Result<Score, StoreError>;
    async fn create_score(&self, input: NewScore) -> Result<Score, StoreError>;
    async fn update_score(&self, id: RecordId, patch: ScorePatch) -> Result<Score, StoreError>;
    async fn delete_score(&self, id: RecordId) -> Result<(), StoreError>;
}

/// Read-only cross-entity reports.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Every score joined with its player name and game title, oldest first.
    async fn player_scores(&self, limit: Option<i64>) -> Result<Vec<PlayerScoreRow>, StoreError>;
    /// Players ranked by summed score, highest first.
    async fn top_players(&self) -> Result<Vec<TopPlayerRow>, StoreError>;
    /// Players with no recorded score.
    async fn inactive_players(&self) -> Result<Vec<PlayerNameRow>, StoreError>;
    /// The genre with the most recorded scores, if any score exists.
    async fn popular_genre(&self) -> Result<Option<GenrePopularityRow>, StoreError>;
    /// Players who joined within the trailing window.
    async fn recent_players(&self) -> Result<Vec<RecentPlayerRow>, StoreError>;
}

/// Everything the HTTP layer needs from a backing store.
pub trait Repository: PlayerRepository + GameRepository + ScoreRepository + ReportRepository {}

impl<T> Repository for T where T: PlayerRepository + GameRepository + ScoreRepository + ReportRepository {}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool sized by `config.pool`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.pool.idle_timeout_seconds))
            .connect(&config.connection_string())
            .await?;
        tracing::info!(
            max_connections = config.pool.max_connections,
            "Connected to PostgreSQL"
        );
        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}
