//! Repository interfaces and their implementations.
//!
//! Handlers hold these traits as `Arc<dyn ...>` so the store can be swapped
//! (PostgreSQL in production, [`MemoryStore`] in tests). Every method is a
//! single store operation: one SQL statement, or one lock acquisition.

pub mod appointment_repo;
pub mod memory;
pub mod trainer_repo;

use async_trait::async_trait;
use bodyfit_core::appointment::{AppointmentFields, AppointmentOrder};
use bodyfit_core::trainer::TrainerFields;
use bodyfit_core::types::DbId;

use crate::error::StoreError;
use crate::models::appointment::Appointment;
use crate::models::trainer::Trainer;

pub use appointment_repo::PgAppointmentRepo;
pub use memory::MemoryStore;
pub use trainer_repo::PgTrainerRepo;

#[async_trait]
pub trait TrainerRepository: Send + Sync {
    /// All trainers, ordered by id.
    async fn list(&self) -> Result<Vec<Trainer>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Trainer>, StoreError>;

    async fn exists(&self, id: DbId) -> Result<bool, StoreError>;

    async fn create(&self, input: &TrainerFields) -> Result<Trainer, StoreError>;

    /// Replace every writable field. Returns `None` if the trainer does not exist.
    async fn update(&self, id: DbId, input: &TrainerFields) -> Result<Option<Trainer>, StoreError>;

    /// Delete a trainer; appointments referencing it keep existing with no
    /// trainer. Returns `true` if a row was deleted.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn list(&self, order: AppointmentOrder) -> Result<Vec<Appointment>, StoreError>;

    /// Appointments referencing `trainer_id`, oldest first.
    async fn list_by_trainer(&self, trainer_id: DbId) -> Result<Vec<Appointment>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Appointment>, StoreError>;

    /// Fails with [`StoreError::ForeignKey`] if `input.trainer_id` does not resolve.
    async fn create(&self, input: &AppointmentFields) -> Result<Appointment, StoreError>;

    /// Replace every writable field. Returns `None` if the appointment does not exist.
    async fn update(
        &self,
        id: DbId,
        input: &AppointmentFields,
    ) -> Result<Option<Appointment>, StoreError>;

    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Liveness check for the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl StoreHealth for crate::DbPool {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(self).await.map_err(StoreError::from)
    }
}
