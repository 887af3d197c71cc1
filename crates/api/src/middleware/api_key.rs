//! API-key gate extractors.
//!
//! The key is read from the `api_key` header, falling back to the `api_key`
//! query parameter when the header is absent or empty. Handlers list these
//! extractors first so a rejected request never has its body parsed.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use bodyfit_core::access::{AccessLevel, Role};
use bodyfit_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Header and query parameter carrying the client key.
pub const API_KEY_PARAM: &str = "api_key";

#[derive(Debug, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Pull the client key out of the request, header first.
fn extract_key(parts: &Parts) -> Option<String> {
    let from_header = parts
        .headers
        .get(API_KEY_PARAM)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned);

    from_header.or_else(|| {
        Query::<ApiKeyQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.api_key)
    })
}

fn check(parts: &Parts, state: &AppState, level: AccessLevel) -> Result<Role, AppError> {
    let key = extract_key(parts);
    state
        .api_keys
        .authorize(key.as_deref(), level)
        .map_err(|denied| AppError::Core(CoreError::Forbidden(denied)))
}

/// Requires any valid API key. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn list(RequireRead(_role): RequireRead) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireRead(pub Role);

impl FromRequestParts<AppState> for RequireRead {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check(parts, state, AccessLevel::Read).map(RequireRead)
    }
}

/// Requires an API key with the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireWrite(pub Role);

impl FromRequestParts<AppState> for RequireWrite {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check(parts, state, AccessLevel::Write).map(RequireWrite)
    }
}
