//! Request shape validation for Scorekeeper.
//!
//! Every inbound payload is checked here before any statement reaches the
//! store. Validation is pure and synchronous: it returns either a typed input
//! ready for the executor or a [`ValidationErrors`] listing each failing field.
//!
//! | Operation | Entry point | Shape |
//! |-----------|-------------|-------|
//! | create player / game / score | [`new_player`], [`new_game`], [`new_score`] | every field required |
//! | update player / game / score | [`player_patch`], [`game_patch`], [`score_patch`] | every field optional |
//! | any `/{id}` route | [`record_id`] | digits only, fits in `i32` |
//! | `GET /players-scores` | [`listing_query`] | optional positive `limit` |

pub mod error;
pub mod input;
pub mod params;
pub mod shape;

pub use error::{FieldError, FieldErrorKind, ValidationErrors};
pub use input::{
    GamePatch, NewGame, NewPlayer, NewScore, PlayerPatch, ScorePatch, game_patch, new_game,
    new_player, new_score, player_patch, score_patch,
};
pub use params::{ListingQuery, listing_query, record_id};
pub use shape::{FieldKind, FieldSpec, Presence, Shape};
