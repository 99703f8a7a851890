use crate::sql::{GAME_COLUMNS, UpdateStatement};
use crate::{GameRepository, PgStore, StoreError};
use async_trait::async_trait;
use scorekeeper_core::{Entity, Game, RecordId};
use scorekeeper_validate::{GamePatch, NewGame};
use sqlx::Row;
use sqlx::postgres::PgRow;

fn game_from_row(row: &PgRow) -> Result<Game, sqlx::Error> {
    Ok(Game {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        genre: row.try_get("genre")?,
    })
}

#[async_trait]
impl GameRepository for PgStore {
    async fn list_games(&self) -> Result<Vec<Game>, StoreError> {
        let sql = format!("SELECT {} FROM games ORDER BY id ASC", GAME_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(game_from_row).collect::<Result<Vec<_>, _>>()?)
    }

    async fn get_game(&self, id: RecordId) -> Result<Game, StoreError> {
        let sql = format!("SELECT {} FROM games WHERE id = $1", GAME_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::not_found(Entity::Game, id))?;
        Ok(game_from_row(&row)?)
    }

    async fn create_game(&self, input: NewGame) -> Result<Game, StoreError> {
        let sql = format!(
            "INSERT INTO games (title, genre) VALUES ($1, $2) RETURNING {}",
            GAME_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(input.title)
            .bind(input.genre)
            .fetch_one(&self.pool)
            .await?;
        let game = game_from_row(&row)?;
        tracing::debug!(id = game.id, "Game created");
        Ok(game)
    }

    async fn update_game(&self, id: RecordId, patch: GamePatch) -> Result<Game, StoreError> {
        let mut update = UpdateStatement::new(Entity::Game.table());
        update.set("title", patch.title)?;
        update.set("genre", patch.genre)?;

        if update.is_empty() {
            return self.get_game(id).await;
        }

        let (sql, args) = update.finish(id, GAME_COLUMNS)?;
        let row = sqlx::query_with(&sql, args)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::not_found(Entity::Game, id))?;
        Ok(game_from_row(&row)?)
    }

    async fn delete_game(&self, id: RecordId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(Entity::Game, id));
        }
        tracing::debug!(id, "Game deleted");
        Ok(())
    }
}
