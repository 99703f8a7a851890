//! Shared application state.

use scorekeeper_store::Repository;
use std::sync::Arc;

/// State handed to every handler.
///
/// The repository (and the pool inside it) is created once at startup and
/// passed in explicitly; handlers never reach for a global.
#[derive(Clone)]
pub struct AppState {
    repo: Arc<dyn Repository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &dyn Repository {
        self.repo.as_ref()
    }
}
