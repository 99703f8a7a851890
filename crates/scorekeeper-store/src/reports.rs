//! Fixed join/aggregate statements behind the reporting routes.
//!
//! Ties in summed score or genre frequency fall back to whatever order the
//! database produces for equal aggregates.

use crate::{PgStore, ReportRepository, StoreError};
use async_trait::async_trait;
use scorekeeper_core::{
    GenrePopularityRow, PlayerNameRow, PlayerScoreRow, RECENT_PLAYER_WINDOW_DAYS, RecentPlayerRow,
    TOP_PLAYERS_LIMIT, TopPlayerRow,
};
use sqlx::Row;

const PLAYER_SCORES_SQL: &str = "\
SELECT p.name, g.title, s.score
FROM scores s
JOIN players p ON p.id = s.player_id
JOIN games g ON g.id = s.game_id
ORDER BY s.id ASC
LIMIT $1";

const TOP_PLAYERS_SQL: &str = "\
SELECT p.name, SUM(s.score)::bigint AS total_score
FROM players p
JOIN scores s ON s.player_id = p.id
GROUP BY p.id, p.name
ORDER BY total_score DESC
LIMIT $1";

const INACTIVE_PLAYERS_SQL: &str = "\
SELECT p.name
FROM players p
LEFT JOIN scores s ON s.player_id = p.id
WHERE s.id IS NULL
ORDER BY p.id ASC";

const POPULAR_GENRE_SQL: &str = "\
SELECT g.genre, COUNT(*)::bigint AS times_played
FROM scores s
JOIN games g ON g.id = s.game_id
GROUP BY g.genre
ORDER BY times_played DESC
LIMIT 1";

const RECENT_PLAYERS_SQL: &str = "\
SELECT name, join_date
FROM players
WHERE join_date >= CURRENT_DATE - $1::integer
ORDER BY join_date DESC, id ASC";

#[async_trait]
impl ReportRepository for PgStore {
    async fn player_scores(&self, limit: Option<i64>) -> Result<Vec<PlayerScoreRow>, StoreError> {
        // LIMIT NULL is LIMIT ALL in PostgreSQL.
        let rows = sqlx::query(PLAYER_SCORES_SQL)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(PlayerScoreRow {
                name: row.try_get("name")?,
                title: row.try_get("title")?,
                score: row.try_get("score")?,
            });
        }
        Ok(out)
    }

    async fn top_players(&self) -> Result<Vec<TopPlayerRow>, StoreError> {
        let rows = sqlx::query(TOP_PLAYERS_SQL)
            .bind(TOP_PLAYERS_LIMIT)
            .fetch_all(&self.pool)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(TopPlayerRow {
                name: row.try_get("name")?,
                total_score: row.try_get("total_score")?,
            });
        }
        Ok(out)
    }

    async fn inactive_players(&self) -> Result<Vec<PlayerNameRow>, StoreError> {
        let rows = sqlx::query(INACTIVE_PLAYERS_SQL)
            .fetch_all(&self.pool)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(PlayerNameRow {
                name: row.try_get("name")?,
            });
        }
        Ok(out)
    }

    async fn popular_genre(&self) -> Result<Option<GenrePopularityRow>, StoreError> {
        let row = sqlx::query(POPULAR_GENRE_SQL)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(GenrePopularityRow {
                genre: row.try_get("genre")?,
                times_played: row.try_get("times_played")?,
            })),
            None => Ok(None),
        }
    }

    async fn recent_players(&self) -> Result<Vec<RecentPlayerRow>, StoreError> {
        let rows = sqlx::query(RECENT_PLAYERS_SQL)
            .bind(RECENT_PLAYER_WINDOW_DAYS)
            .fetch_all(&self.pool)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(RecentPlayerRow {
                name: row.try_get("name")?,
                join_date: row.try_get("join_date")?,
            });
        }
        Ok(out)
    }
}
