//! Statement construction helpers.

use crate::error::StoreError;
use scorekeeper_core::RecordId;
use sqlx::postgres::PgArguments;
use sqlx::{Arguments, Postgres};

pub(crate) const PLAYER_COLUMNS: &str = "id, name, join_date";
pub(crate) const GAME_COLUMNS: &str = "id, title, genre";
pub(crate) const SCORE_COLUMNS: &str = "id, player_id, game_id, score, date_played";

fn args_add<T>(args: &mut PgArguments, v: T) -> Result<(), StoreError>
where
    T: Send + Sync + 'static,
    for<'q> T: sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres>,
{
    args.add(v).map_err(|e| StoreError::Database {
        message: e.to_string(),
        code: None,
    })
}

/// An `UPDATE … SET` that only touches the columns actually supplied.
///
/// Absent fields never appear in the statement, so the stored value is kept.
pub(crate) struct UpdateStatement {
    table: &'static str,
    columns: Vec<&'static str>,
    args: PgArguments,
}

impl UpdateStatement {
    pub(crate) fn new(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            args: PgArguments::default(),
        }
    }

    /// Add `column = $n` when `value` is present.
    pub(crate) fn set<T>(&mut self, column: &'static str, value: Option<T>) -> Result<(), StoreError>
    where
        T: Send + Sync + 'static,
        for<'q> T: sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres>,
    {
        if let Some(v) = value {
            args_add(&mut self.args, v)?;
            self.columns.push(column);
        }
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Bind the identifier last and render the statement.
    pub(crate) fn finish(
        mut self,
        id: RecordId,
        returning: &str,
    ) -> Result<(String, PgArguments), StoreError> {
        args_add(&mut self.args, id)?;
        let sql = update_sql(self.table, &self.columns, returning);
        Ok((sql, self.args))
    }
}

fn update_sql(table: &str, columns: &[&str], returning: &str) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", c, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        table,
        assignments.join(", "),
        columns.len() + 1,
        returning
    )
}
