//! Request extractors.

use crate::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use scorekeeper_validate::{FieldError, FieldErrorKind, ValidationErrors};
use serde_json::Value;

/// An untyped JSON body.
///
/// Unlike `Json<Value>`, a missing content type or a syntax error is reported
/// as a validation failure on the `body` field so every 400 has the same shape.
/// A body over the size limit keeps axum's 413.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(JsonRejection::BytesRejection(rejection))
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                Err(ApiError::PayloadTooLarge(rejection.body_text()))
            }
            Err(rejection) => Err(ApiError::Validation(ValidationErrors::single(
                FieldError::new(FieldErrorKind::WrongType, "body", rejection.body_text()),
            ))),
        }
    }
}
