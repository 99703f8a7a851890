//! Validation error types.

use serde::Serialize;
use thiserror::Error;

/// Categories of field-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required field was absent.
    Required,
    /// The field is not part of the operation's shape.
    NotAllowed,
    /// The value has the wrong JSON type.
    WrongType,
    /// Text is shorter than the declared minimum.
    TooShort,
    /// Text is longer than the declared maximum.
    TooLong,
    /// Text could not be parsed as a calendar date.
    InvalidDate,
    /// Numeric value is outside the accepted range.
    OutOfRange,
    /// Text does not match the declared pattern.
    PatternMismatch,
}

/// A single failing field and the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct FieldError {
    /// Name of the offending field (`body` for whole-payload failures).
    pub field: String,
    #[serde(skip)]
    pub kind: FieldErrorKind,
    /// Human-readable error message.
    pub message: String,
}

impl FieldError {
    pub fn new(kind: FieldErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(FieldErrorKind::Required, field, format!("\"{}\" is required", field))
    }

    pub fn not_allowed(field: &str) -> Self {
        Self::new(
            FieldErrorKind::NotAllowed,
            field,
            format!("\"{}\" is not allowed", field),
        )
    }

    pub fn wrong_type(field: &str, expected: &str) -> Self {
        Self::new(
            FieldErrorKind::WrongType,
            field,
            format!("\"{}\" must be {}", field, expected),
        )
    }

    pub fn too_short(field: &str, min: usize) -> Self {
        let message = if min <= 1 {
            format!("\"{}\" is not allowed to be empty", field)
        } else {
            format!("\"{}\" must be at least {} characters long", field, min)
        };
        Self::new(FieldErrorKind::TooShort, field, message)
    }

    pub fn too_long(field: &str, max: usize) -> Self {
        Self::new(
            FieldErrorKind::TooLong,
            field,
            format!(
                "\"{}\" length must be less than or equal to {} characters long",
                field, max
            ),
        )
    }

    pub fn invalid_date(field: &str) -> Self {
        Self::new(
            FieldErrorKind::InvalidDate,
            field,
            format!("\"{}\" must be a valid date (YYYY-MM-DD)", field),
        )
    }

    pub fn out_of_range(field: &str, description: &str) -> Self {
        Self::new(
            FieldErrorKind::OutOfRange,
            field,
            format!("\"{}\" must be {}", field, description),
        )
    }

    pub fn pattern_mismatch(field: &str, description: &str) -> Self {
        Self::new(
            FieldErrorKind::PatternMismatch,
            field,
            format!("\"{}\" must be {}", field, description),
        )
    }
}

/// Every field failure found in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", join_messages(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any failure is attributed to `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append every failure from `other`.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Combine two independent checks, reporting the failures of both.
    pub fn combine<A, B>(
        a: Result<A, ValidationErrors>,
        b: Result<B, ValidationErrors>,
    ) -> Result<(A, B), ValidationErrors> {
        match (a, b) {
            (Ok(a), Ok(b)) => Ok((a, b)),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Err(mut e), Err(other)) => {
                e.extend(other);
                Err(e)
            }
        }
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self::single(error)
    }
}
