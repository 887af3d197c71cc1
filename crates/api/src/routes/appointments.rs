use axum::routing::get;
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Appointment routes mounted at `/appointments`.
///
/// ```text
/// GET    /                 -> list_appointments
/// POST   /                 -> create_appointment
/// GET    /{id}             -> get_appointment
/// PUT    /{id}             -> update_appointment
/// DELETE /{id}             -> delete_appointment
/// GET    /trainers/{id}    -> list_trainer_appointments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/{id}",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route(
            "/trainers/{id}",
            get(appointments::list_trainer_appointments),
        )
}
