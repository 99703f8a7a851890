use crate::sql::{SCORE_COLUMNS, UpdateStatement};
use crate::{PgStore, ScoreRepository, StoreError};
use async_trait::async_trait;
use scorekeeper_core::{Entity, RecordId, Score};
use scorekeeper_validate::{NewScore, ScorePatch};
use sqlx::Row;
use sqlx::postgres::PgRow;

fn score_from_row(row: &PgRow) -> Result<Score, sqlx::Error> {
    Ok(Score {
        id: row.try_get("id")?,
        player_id: row.try_get("player_id")?,
        game_id: row.try_get("game_id")?,
        score: row.try_get("score")?,
        date_played: row.try_get("date_played")?,
    })
}

#[async_trait]
impl ScoreRepository for PgStore {
    async fn list_scores(&self) -> Result<Vec<Score>, StoreError> {
        let sql = format!("SELECT {} FROM scores ORDER BY id ASC", SCORE_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(score_from_row).collect::<Result<Vec<_>, _>>()?)
    }

    async fn get_score(&self, id: RecordId) -> Result<Score, StoreError> {
        let sql = format!("SELECT {} FROM scores WHERE id = $1", SCORE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::not_found(Entity::Score, id))?;
        Ok(score_from_row(&row)?)
    }

    // A dangling player_id or game_id is rejected by the foreign keys and
    // surfaces as StoreError::Database.
    async fn create_score(&self, input: NewScore) -> Result<Score, StoreError> {
        let sql = format!(
            "INSERT INTO scores (player_id, game_id, score, date_played) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            SCORE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(input.player_id)
            .bind(input.game_id)
            .bind(input.score)
            .bind(input.date_played)
            .fetch_one(&self.pool)
            .await?;
        let score = score_from_row(&row)?;
        tracing::debug!(
            id = score.id,
            player_id = score.player_id,
            game_id = score.game_id,
            "Score recorded"
        );
        Ok(score)
    }

    async fn update_score(&self, id: RecordId, patch: ScorePatch) -> Result<Score, StoreError> {
        let mut update = UpdateStatement::new(Entity::Score.table());
        update.set("player_id", patch.player_id)?;
        update.set("game_id", patch.game_id)?;
        update.set("score", patch.score)?;
        update.set("date_played", patch.date_played)?;

        if update.is_empty() {
            return self.get_score(id).await;
        }

        let (sql, args) = update.finish(id, SCORE_COLUMNS)?;
        let row = sqlx::query_with(&sql, args)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::not_found(Entity::Score, id))?;
        Ok(score_from_row(&row)?)
    }

    async fn delete_score(&self, id: RecordId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM scores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(Entity::Score, id));
        }
        Ok(())
    }
}
