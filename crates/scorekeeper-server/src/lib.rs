//! # scorekeeper-server
//!
//! HTTP dispatcher for the Scorekeeper record service.
//!
//! ```text
//! request ──▶ router ──▶ validator ──(invalid)──▶ 400 + field errors
//!                            │
//!                            ▼
//!                     one SQL statement ──▶ 200 / 201 / 404 / 500
//! ```
//!
//! The router is built from an [`AppState`] holding the repository, so the
//! same routes run against PostgreSQL in production and an in-memory
//! repository in tests.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod testing;

pub use error::ApiError;
pub use routes::create_router;
pub use server::Server;
pub use state::AppState;
