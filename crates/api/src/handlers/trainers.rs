//! Handlers for trainer records.
//!
//! Reads need any valid API key, writes need an admin key. Create and update
//! validate the complete record before touching the store.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bodyfit_core::error::{CoreError, Entity};
use bodyfit_core::types::DbId;
use bodyfit_core::validation::validate_trainer;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonObject, PathId};
use crate::middleware::api_key::{RequireRead, RequireWrite};
use crate::response::TrainerListResponse;
use crate::state::AppState;
use crate::views::trainer_to_view;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Entity::Trainer,
        id,
    })
}

/// GET /trainers
pub async fn list_trainers(
    RequireRead(_role): RequireRead,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let trainers = state.trainers.list().await?;
    tracing::debug!(count = trainers.len(), "Listed trainers");

    Ok(Json(TrainerListResponse {
        trainers: trainers.into_iter().map(trainer_to_view).collect(),
    }))
}

/// GET /trainers/{id}
pub async fn get_trainer(
    RequireRead(_role): RequireRead,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<impl IntoResponse> {
    let trainer = state
        .trainers
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(trainer_to_view(trainer)))
}

/// POST /trainers
///
/// Returns 201 with the stored record, including its assigned id.
pub async fn create_trainer(
    RequireWrite(_role): RequireWrite,
    State(state): State<AppState>,
    JsonObject(data): JsonObject,
) -> AppResult<impl IntoResponse> {
    let input = validate_trainer(&data)?;
    let trainer = state.trainers.create(&input).await?;

    tracing::info!(
        trainer_id = trainer.id,
        last_name = %trainer.last_name,
        "Trainer created",
    );

    Ok((StatusCode::CREATED, Json(trainer_to_view(trainer))))
}

/// PUT /trainers/{id}
///
/// Replaces every writable field. A missing trainer is reported before the
/// body is looked at.
pub async fn update_trainer(
    RequireWrite(_role): RequireWrite,
    State(state): State<AppState>,
    PathId(id): PathId,
    body: Result<JsonObject, AppError>,
) -> AppResult<impl IntoResponse> {
    if !state.trainers.exists(id).await? {
        return Err(not_found(id));
    }
    let JsonObject(data) = body?;
    let input = validate_trainer(&data)?;

    let trainer = state
        .trainers
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(trainer_id = id, "Trainer updated");

    Ok(Json(trainer_to_view(trainer)))
}

/// DELETE /trainers/{id}
///
/// Appointments that referenced the trainer are kept with no trainer.
pub async fn delete_trainer(
    RequireWrite(_role): RequireWrite,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<StatusCode> {
    if !state.trainers.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(trainer_id = id, "Trainer deleted");

    Ok(StatusCode::NO_CONTENT)
}
