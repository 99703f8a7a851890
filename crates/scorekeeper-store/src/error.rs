//! Error types for the store crate.

use scorekeeper_core::{Entity, RecordId};
use thiserror::Error;

/// Errors returned by the executor.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The statement matched no row for the given identifier.
    #[error("{entity} with ID {id} not found.")]
    NotFound { entity: Entity, id: RecordId },

    /// Any failure reported by the database or the driver: constraint
    /// violations, connectivity loss, malformed statements.
    #[error("{message}")]
    Database {
        message: String,
        /// SQLSTATE code when the server reported one.
        code: Option<String>,
    },

    /// Schema migrations could not be applied.
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn not_found(entity: Entity, id: RecordId) -> Self {
        StoreError::NotFound { entity, id }
    }

    /// SQLSTATE code for database failures.
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Database { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => StoreError::Database {
                message: db.message().to_string(),
                code: db.code().map(|c| c.into_owned()),
            },
            other => StoreError::Database {
                message: other.to_string(),
                code: None,
            },
        }
    }
}
