use std::sync::Arc;

use bodyfit_core::access::ApiKeyRegistry;
use bodyfit_db::repositories::{
    AppointmentRepository, MemoryStore, PgAppointmentRepo, PgTrainerRepo, StoreHealth,
    TrainerRepository,
};
use bodyfit_db::DbPool;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every member is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub trainers: Arc<dyn TrainerRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    /// Liveness check for whichever store backs the repositories.
    pub store_health: Arc<dyn StoreHealth>,
    /// Keys accepted by the access gate, fixed at startup.
    pub api_keys: Arc<ApiKeyRegistry>,
}

impl AppState {
    /// State backed by PostgreSQL through a shared connection pool.
    pub fn postgres(pool: DbPool, api_keys: ApiKeyRegistry) -> Self {
        Self {
            trainers: Arc::new(PgTrainerRepo::new(pool.clone())),
            appointments: Arc::new(PgAppointmentRepo::new(pool.clone())),
            store_health: Arc::new(pool),
            api_keys: Arc::new(api_keys),
        }
    }

    /// State backed by an in-process store. Clones of `store` share data.
    pub fn memory(store: MemoryStore, api_keys: ApiKeyRegistry) -> Self {
        Self {
            trainers: Arc::new(store.clone()),
            appointments: Arc::new(store.clone()),
            store_health: Arc::new(store),
            api_keys: Arc::new(api_keys),
        }
    }
}
