use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bodyfit_core::error::CoreError;
use bodyfit_db::StoreError;
use serde_json::json;

/// Message returned when an appointment references a trainer that does not exist.
pub const UNKNOWN_TRAINER_MESSAGE: &str = "Тренер с указанным ID не найден";

/// Message returned when a write request has no usable JSON object body.
pub const JSON_REQUIRED_MESSAGE: &str = "Требуются данные в формате JSON";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(%entity, id, "Lookup by id found nothing");
                    (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        entity.not_found_message().to_string(),
                    )
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Forbidden(denied) => {
                    tracing::debug!(reason = denied.code(), "Request rejected at access gate");
                    (StatusCode::FORBIDDEN, denied.code(), denied.to_string())
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - A foreign key violation means the trainer reference stopped resolving
///   between the handler's check and the write: 400.
/// - Everything else is a 500 carrying the underlying cause.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::ForeignKey(detail) => {
            tracing::warn!(detail = %detail, "Trainer reference rejected by store");
            (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                UNKNOWN_TRAINER_MESSAGE.to_string(),
            )
        }
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                format!("Внутренняя ошибка сервера: {db_err}"),
            )
        }
    }
}
