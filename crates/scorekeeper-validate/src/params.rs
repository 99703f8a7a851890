//! Path and query parameter validation.
//!
//! Parameters arrive as text; the only transform applied is parsing a
//! digits-only string into an integer.

use crate::error::{FieldError, ValidationErrors};
use regex::Regex;
use scorekeeper_core::RecordId;
use std::collections::HashMap;
use std::sync::LazyLock;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern compiles"));

/// Query parameters accepted by the `/players-scores` report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Maximum number of rows to return; `None` returns every row.
    pub limit: Option<i64>,
}

/// Validate the `id` path segment.
pub fn record_id(raw: &str) -> Result<RecordId, ValidationErrors> {
    if !DIGITS.is_match(raw) {
        return Err(FieldError::pattern_mismatch("id", "a non-negative integer").into());
    }
    raw.parse::<RecordId>()
        .map_err(|_| FieldError::out_of_range("id", "less than or equal to 2147483647").into())
}

/// Validate the query string of the `/players-scores` report.
pub fn listing_query(params: &HashMap<String, String>) -> Result<ListingQuery, ValidationErrors> {
    let mut errors = Vec::new();
    let mut query = ListingQuery::default();

    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();
    for key in keys {
        if key != "limit" {
            errors.push(FieldError::not_allowed(key));
        }
    }

    if let Some(raw) = params.get("limit") {
        match parse_limit(raw) {
            Ok(limit) => query.limit = Some(limit),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(query)
    } else {
        Err(ValidationErrors::new(errors))
    }
}

fn parse_limit(raw: &str) -> Result<i64, FieldError> {
    if !DIGITS.is_match(raw) {
        return Err(FieldError::pattern_mismatch("limit", "a positive integer"));
    }
    match raw.parse::<i64>() {
        Ok(0) => Err(FieldError::out_of_range("limit", "greater than or equal to 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(FieldError::out_of_range("limit", "a safe integer")),
    }
}
