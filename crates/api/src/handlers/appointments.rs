//! Handlers for appointment records.
//!
//! An appointment may name a trainer by id. The reference is checked against
//! the trainer store before every write; the store enforces it again, so a
//! trainer deleted in between still yields a 400 rather than a dangling id.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bodyfit_core::appointment::AppointmentFields;
use bodyfit_core::error::{CoreError, Entity};
use bodyfit_core::types::DbId;
use bodyfit_core::validation::validate_appointment;

use crate::error::{AppError, AppResult, UNKNOWN_TRAINER_MESSAGE};
use crate::extract::{JsonObject, PathId};
use crate::middleware::api_key::{RequireRead, RequireWrite};
use crate::query::AppointmentListParams;
use crate::response::{AppointmentListResponse, AppointmentResponse};
use crate::state::AppState;
use crate::views::appointment_to_view;

fn not_found(entity: Entity, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Reject a write whose trainer reference does not resolve.
async fn ensure_trainer_exists(state: &AppState, input: &AppointmentFields) -> AppResult<()> {
    if let Some(trainer_id) = input.trainer_id {
        if !state.trainers.exists(trainer_id).await? {
            tracing::debug!(trainer_id, "Appointment references unknown trainer");
            return Err(AppError::Core(CoreError::Validation(
                UNKNOWN_TRAINER_MESSAGE.to_string(),
            )));
        }
    }
    Ok(())
}

/// GET /appointments?sort_by=&direction=
///
/// Unknown `sort_by` values fall back to the default order (created_at
/// ascending) instead of failing.
pub async fn list_appointments(
    RequireRead(_role): RequireRead,
    State(state): State<AppState>,
    params: AppointmentListParams,
) -> AppResult<impl IntoResponse> {
    let order = params.order();
    let appointments = state.appointments.list(order).await?;

    tracing::debug!(
        count = appointments.len(),
        sort_by = order.field.as_str(),
        direction = order.direction.as_sql(),
        "Listed appointments",
    );

    Ok(Json(AppointmentListResponse {
        appointments: appointments.into_iter().map(appointment_to_view).collect(),
    }))
}

/// GET /appointments/{id}
pub async fn get_appointment(
    RequireRead(_role): RequireRead,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<impl IntoResponse> {
    let appointment = state
        .appointments
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(Entity::Appointment, id))?;

    Ok(Json(AppointmentResponse {
        appointment: appointment_to_view(appointment),
    }))
}

/// GET /appointments/trainers/{id}
pub async fn list_trainer_appointments(
    RequireRead(_role): RequireRead,
    State(state): State<AppState>,
    PathId(trainer_id): PathId,
) -> AppResult<impl IntoResponse> {
    if !state.trainers.exists(trainer_id).await? {
        return Err(not_found(Entity::Trainer, trainer_id));
    }
    let appointments = state.appointments.list_by_trainer(trainer_id).await?;

    tracing::debug!(trainer_id, count = appointments.len(), "Listed trainer appointments");

    Ok(Json(AppointmentListResponse {
        appointments: appointments.into_iter().map(appointment_to_view).collect(),
    }))
}

/// POST /appointments
pub async fn create_appointment(
    RequireWrite(_role): RequireWrite,
    State(state): State<AppState>,
    JsonObject(data): JsonObject,
) -> AppResult<impl IntoResponse> {
    let input = validate_appointment(&data)?;
    ensure_trainer_exists(&state, &input).await?;

    let appointment = state.appointments.create(&input).await?;

    tracing::info!(
        appointment_id = appointment.id,
        trainer_id = ?appointment.trainer_id(),
        status = %appointment.status,
        "Appointment created",
    );

    Ok((StatusCode::CREATED, Json(appointment_to_view(appointment))))
}

/// PUT /appointments/{id}
///
/// Replaces every writable field, including the trainer reference.
pub async fn update_appointment(
    RequireWrite(_role): RequireWrite,
    State(state): State<AppState>,
    PathId(id): PathId,
    body: Result<JsonObject, AppError>,
) -> AppResult<impl IntoResponse> {
    if state.appointments.find_by_id(id).await?.is_none() {
        return Err(not_found(Entity::Appointment, id));
    }
    let JsonObject(data) = body?;
    let input = validate_appointment(&data)?;
    ensure_trainer_exists(&state, &input).await?;

    let appointment = state
        .appointments
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(Entity::Appointment, id))?;

    tracing::info!(
        appointment_id = id,
        trainer_id = ?appointment.trainer_id(),
        status = %appointment.status,
        "Appointment updated",
    );

    Ok(Json(appointment_to_view(appointment)))
}

/// DELETE /appointments/{id}
pub async fn delete_appointment(
    RequireWrite(_role): RequireWrite,
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<StatusCode> {
    if !state.appointments.delete(id).await? {
        return Err(not_found(Entity::Appointment, id));
    }

    tracing::info!(appointment_id = id, "Appointment deleted");

    Ok(StatusCode::NO_CONTENT)
}
