pub mod appointments;
pub mod health;
pub mod trainers;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /trainers                          list, create
/// /trainers/{id}                     get, update, delete
///
/// /appointments                      list (?sort_by=&direction=), create
/// /appointments/{id}                 get, update, delete
/// /appointments/trainers/{id}        appointments of one trainer
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/trainers", trainers::router())
        .nest("/appointments", appointments::router())
}
