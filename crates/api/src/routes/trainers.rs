use axum::routing::get;
use axum::Router;

use crate::handlers::trainers;
use crate::state::AppState;

/// Trainer routes mounted at `/trainers`.
///
/// ```text
/// GET    /       -> list_trainers
/// POST   /       -> create_trainer
/// GET    /{id}   -> get_trainer
/// PUT    /{id}   -> update_trainer
/// DELETE /{id}   -> delete_trainer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(trainers::list_trainers).post(trainers::create_trainer),
        )
        .route(
            "/{id}",
            get(trainers::get_trainer)
                .put(trainers::update_trainer)
                .delete(trainers::delete_trainer),
        )
}
