//! Extractors for request bodies and path ids.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use bodyfit_core::types::DbId;
use bodyfit_core::validation::Fields;
use serde_json::Value;

use crate::error::{AppError, JSON_REQUIRED_MESSAGE};

/// A non-empty JSON object request body.
///
/// The content type is not checked. A missing body, a body that is not valid
/// JSON, a JSON value other than an object, and an empty object are all
/// rejected with the same 400.
#[derive(Debug)]
pub struct JsonObject(pub Fields);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| json_required())?;
        parse_object(&bytes).map(JsonObject)
    }
}

fn json_required() -> AppError {
    AppError::BadRequest(JSON_REQUIRED_MESSAGE.to_string())
}

fn parse_object(bytes: &[u8]) -> Result<Fields, AppError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(json_required()),
    }
}

/// Record id taken from the `{id}` path segment.
///
/// An id that is not an integer is answered with a JSON 400 instead of
/// axum's plain-text path rejection.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub DbId);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_id(""))?;
        parse_id(&raw).map(PathId)
    }
}

fn invalid_id(raw: &str) -> AppError {
    AppError::BadRequest(format!("Некорректный идентификатор: '{raw}'"))
}

fn parse_id(raw: &str) -> Result<DbId, AppError> {
    raw.parse::<DbId>().map_err(|_| invalid_id(raw))
}
