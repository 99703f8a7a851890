use crate::sql::{PLAYER_COLUMNS, UpdateStatement};
use crate::{PgStore, PlayerRepository, StoreError};
use async_trait::async_trait;
use scorekeeper_core::{Entity, Player, RecordId};
use scorekeeper_validate::{NewPlayer, PlayerPatch};
use sqlx::Row;
use sqlx::postgres::PgRow;

fn player_from_row(row: &PgRow) -> Result<Player, sqlx::Error> {
    Ok(Player {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        join_date: row.try_get("join_date")?,
    })
}

#[async_trait]
impl PlayerRepository for PgStore {
    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let sql = format!("SELECT {} FROM players ORDER BY id ASC", PLAYER_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let players = rows
            .iter()
            .map(player_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(players)
    }

    async fn get_player(&self, id: RecordId) -> Result<Player, StoreError> {
        let sql = format!("SELECT {} FROM players WHERE id = $1", PLAYER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::not_found(Entity::Player, id))?;
        Ok(player_from_row(&row)?)
    }

    async fn create_player(&self, input: NewPlayer) -> Result<Player, StoreError> {
        let sql = format!(
            "INSERT INTO players (name, join_date) VALUES ($1, $2) RETURNING {}",
            PLAYER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(input.name)
            .bind(input.join_date)
            .fetch_one(&self.pool)
            .await?;
        let player = player_from_row(&row)?;
        tracing::debug!(id = player.id, "Player created");
        Ok(player)
    }

    async fn update_player(&self, id: RecordId, patch: PlayerPatch) -> Result<Player, StoreError> {
        let mut update = UpdateStatement::new(Entity::Player.table());
        update.set("name", patch.name)?;
        update.set("join_date", patch.join_date)?;

        if update.is_empty() {
            return self.get_player(id).await;
        }

        let (sql, args) = update.finish(id, PLAYER_COLUMNS)?;
        let row = sqlx::query_with(&sql, args)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::not_found(Entity::Player, id))?;
        Ok(player_from_row(&row)?)
    }

    async fn delete_player(&self, id: RecordId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(Entity::Player, id));
        }
        tracing::debug!(id, "Player deleted");
        Ok(())
    }
}
