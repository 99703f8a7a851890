//! Static shape declarations and the generic body checker.
//!
//! A [`Shape`] lists the fields an entity body may carry and the predicate each
//! one must satisfy. The same shape serves both create (every field required)
//! and update (every field optional); the caller picks the [`Presence`].

use crate::error::{FieldError, ValidationErrors};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::collections::BTreeMap;

/// Predicate applied to one body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string whose character count lies in `min..=max`.
    Text { min: usize, max: usize },
    /// JSON string holding a calendar date or an RFC 3339 timestamp.
    Date,
    /// JSON integer in `0..=i32::MAX`.
    NonNegativeInt,
}

/// One named field of a shape.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Whether the fields of a shape must all be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// The full set of fields accepted in an entity body.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub fields: &'static [FieldSpec],
}

pub const PLAYER: Shape = Shape {
    fields: &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text { min: 1, max: 100 },
        },
        FieldSpec {
            name: "join_date",
            kind: FieldKind::Date,
        },
    ],
};

pub const GAME: Shape = Shape {
    fields: &[
        FieldSpec {
            name: "title",
            kind: FieldKind::Text { min: 1, max: 100 },
        },
        FieldSpec {
            name: "genre",
            kind: FieldKind::Text { min: 1, max: 50 },
        },
    ],
};

pub const SCORE: Shape = Shape {
    fields: &[
        FieldSpec {
            name: "player_id",
            kind: FieldKind::NonNegativeInt,
        },
        FieldSpec {
            name: "game_id",
            kind: FieldKind::NonNegativeInt,
        },
        FieldSpec {
            name: "score",
            kind: FieldKind::NonNegativeInt,
        },
        FieldSpec {
            name: "date_played",
            kind: FieldKind::Date,
        },
    ],
};

/// A field value after its predicate passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Int(i32),
}

/// Fields that passed validation, keyed by name.
#[derive(Debug, Default)]
pub struct Normalized {
    values: BTreeMap<&'static str, FieldValue>,
}

impl Normalized {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.values.remove(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn take_date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.values.remove(name) {
            Some(FieldValue::Date(d)) => Some(d),
            _ => None,
        }
    }

    pub fn take_int(&mut self, name: &str) -> Option<i32> {
        match self.values.remove(name) {
            Some(FieldValue::Int(n)) => Some(n),
            _ => None,
        }
    }
}

impl Shape {
    /// Check `payload` against this shape.
    ///
    /// All failing fields are collected; the payload is rejected if any
    /// field fails, if it carries a field the shape does not declare, or if
    /// it is not a JSON object at all.
    pub fn check(&self, payload: &Value, presence: Presence) -> Result<Normalized, ValidationErrors> {
        let Some(object) = payload.as_object() else {
            return Err(FieldError::wrong_type("body", "an object").into());
        };

        let mut errors = Vec::new();
        let mut normalized = Normalized::default();

        for key in object.keys() {
            if !self.fields.iter().any(|f| f.name == key) {
                errors.push(FieldError::not_allowed(key));
            }
        }

        for spec in self.fields {
            match object.get(spec.name) {
                None => {
                    if presence == Presence::Required {
                        errors.push(FieldError::required(spec.name));
                    }
                }
                Some(raw) => match check_field(spec, raw) {
                    Ok(value) => {
                        normalized.values.insert(spec.name, value);
                    }
                    Err(e) => errors.push(e),
                },
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(ValidationErrors::new(errors))
        }
    }
}

fn check_field(spec: &FieldSpec, raw: &Value) -> Result<FieldValue, FieldError> {
    match spec.kind {
        FieldKind::Text { min, max } => {
            let s = raw
                .as_str()
                .ok_or_else(|| FieldError::wrong_type(spec.name, "a string"))?;
            let len = s.chars().count();
            if len < min {
                return Err(FieldError::too_short(spec.name, min));
            }
            if len > max {
                return Err(FieldError::too_long(spec.name, max));
            }
            Ok(FieldValue::Text(s.to_string()))
        }
        FieldKind::Date => {
            let s = raw
                .as_str()
                .ok_or_else(|| FieldError::wrong_type(spec.name, "a date string"))?;
            parse_date(s)
                .map(FieldValue::Date)
                .ok_or_else(|| FieldError::invalid_date(spec.name))
        }
        FieldKind::NonNegativeInt => {
            if !raw.is_number() {
                return Err(FieldError::wrong_type(spec.name, "a number"));
            }
            let n = match raw.as_i64() {
                Some(n) => n,
                None if raw.is_u64() => {
                    return Err(FieldError::out_of_range(
                        spec.name,
                        "less than or equal to 2147483647",
                    ));
                }
                None => return Err(FieldError::wrong_type(spec.name, "an integer")),
            };
            if n < 0 {
                return Err(FieldError::out_of_range(
                    spec.name,
                    "greater than or equal to 0",
                ));
            }
            i32::try_from(n)
                .map(FieldValue::Int)
                .map_err(|_| FieldError::out_of_range(spec.name, "less than or equal to 2147483647"))
        }
    }
}

/// Parse a calendar date, accepting `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}
