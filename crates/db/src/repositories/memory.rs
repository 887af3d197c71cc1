//! In-process store implementing every repository trait.
//!
//! Mirrors the PostgreSQL schema rules that matter to callers: ids are
//! assigned sequentially, an appointment may only reference an existing
//! trainer, and deleting a trainer clears the reference on its
//! appointments instead of deleting them. Each trait method takes the lock
//! once, so every operation is atomic with respect to the others.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use bodyfit_core::appointment::{
    AppointmentFields, AppointmentOrder, AppointmentSortField, SortDirection,
};
use bodyfit_core::trainer::TrainerFields;
use bodyfit_core::types::{DbId, Timestamp};
use chrono::Utc;
use tokio::sync::RwLock;

use super::{AppointmentRepository, StoreHealth, TrainerRepository};
use crate::error::StoreError;
use crate::models::appointment::Appointment;
use crate::models::trainer::{Trainer, TrainerSummary};

/// Appointment as stored: the trainer is kept as a bare id and resolved on read.
#[derive(Debug, Clone)]
struct StoredAppointment {
    id: DbId,
    last_name: String,
    first_name: String,
    phone: String,
    name_of_training_session: String,
    trainer_id: Option<DbId>,
    comment: Option<String>,
    status: String,
    appointment_date: Option<Timestamp>,
    date: Option<Timestamp>,
    created_at: Timestamp,
}

impl StoredAppointment {
    fn apply(&mut self, input: &AppointmentFields) {
        self.last_name = input.last_name.clone();
        self.first_name = input.first_name.clone();
        self.phone = input.phone.clone();
        self.name_of_training_session = input.name_of_training_session.clone();
        self.trainer_id = input.trainer_id;
        self.comment = input.comment.clone();
        self.status = input.status.as_str().to_string();
        self.appointment_date = input.appointment_date;
    }
}

#[derive(Debug, Default)]
struct Tables {
    trainers: BTreeMap<DbId, Trainer>,
    appointments: BTreeMap<DbId, StoredAppointment>,
    last_trainer_id: DbId,
    last_appointment_id: DbId,
}

impl Tables {
    fn resolve(&self, stored: &StoredAppointment) -> Appointment {
        let trainer = stored
            .trainer_id
            .and_then(|id| self.trainers.get(&id))
            .map(TrainerSummary::from);

        Appointment {
            id: stored.id,
            last_name: stored.last_name.clone(),
            first_name: stored.first_name.clone(),
            phone: stored.phone.clone(),
            name_of_training_session: stored.name_of_training_session.clone(),
            trainer,
            comment: stored.comment.clone(),
            status: stored.status.clone(),
            appointment_date: stored.appointment_date,
            date: stored.date,
            created_at: stored.created_at,
        }
    }

    fn check_trainer_ref(&self, trainer_id: Option<DbId>) -> Result<(), StoreError> {
        match trainer_id {
            Some(id) if !self.trainers.contains_key(&id) => Err(StoreError::missing_trainer(id)),
            _ => Ok(()),
        }
    }
}

/// Cheaply cloneable handle to a shared in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Nulls sort last in both directions, matching `NULLS LAST` in SQL.
fn nullable<T: Ord>(a: &Option<T>, b: &Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => directed(x.cmp(y), direction),
    }
}

fn compare(a: &Appointment, b: &Appointment, order: AppointmentOrder) -> Ordering {
    let dir = order.direction;
    let primary = match order.field {
        AppointmentSortField::Id => directed(a.id.cmp(&b.id), dir),
        AppointmentSortField::LastName => directed(a.last_name.cmp(&b.last_name), dir),
        AppointmentSortField::FirstName => directed(a.first_name.cmp(&b.first_name), dir),
        AppointmentSortField::Phone => directed(a.phone.cmp(&b.phone), dir),
        AppointmentSortField::Date => nullable(&a.date, &b.date, dir),
        AppointmentSortField::AppointmentDate => {
            nullable(&a.appointment_date, &b.appointment_date, dir)
        }
        AppointmentSortField::CreatedAt => directed(a.created_at.cmp(&b.created_at), dir),
        AppointmentSortField::Status => directed(a.status.cmp(&b.status), dir),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

// ---------------------------------------------------------------------------
// Trainers
// ---------------------------------------------------------------------------

#[async_trait]
impl TrainerRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Trainer>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.trainers.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Trainer>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.trainers.get(&id).cloned())
    }

    async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.trainers.contains_key(&id))
    }

    async fn create(&self, input: &TrainerFields) -> Result<Trainer, StoreError> {
        let mut tables = self.tables.write().await;
        tables.last_trainer_id += 1;
        let trainer = Trainer {
            id: tables.last_trainer_id,
            last_name: input.last_name.clone(),
            first_name: input.first_name.clone(),
            middle_name: input.middle_name.clone(),
            name_of_training_session: input.name_of_training_session.clone(),
            phone: input.phone.clone(),
            email: input.email.clone(),
            specialization: input.specialization.clone(),
            experience_years: input.experience_years,
            created_at: Utc::now(),
        };
        tables.trainers.insert(trainer.id, trainer.clone());
        Ok(trainer)
    }

    async fn update(&self, id: DbId, input: &TrainerFields) -> Result<Option<Trainer>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(trainer) = tables.trainers.get_mut(&id) else {
            return Ok(None);
        };
        trainer.last_name = input.last_name.clone();
        trainer.first_name = input.first_name.clone();
        trainer.middle_name = input.middle_name.clone();
        trainer.name_of_training_session = input.name_of_training_session.clone();
        trainer.phone = input.phone.clone();
        trainer.email = input.email.clone();
        trainer.specialization = input.specialization.clone();
        trainer.experience_years = input.experience_years;
        Ok(Some(trainer.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.trainers.remove(&id).is_none() {
            return Ok(false);
        }
        let mut detached = 0usize;
        for appointment in tables.appointments.values_mut() {
            if appointment.trainer_id == Some(id) {
                appointment.trainer_id = None;
                detached += 1;
            }
        }
        tracing::debug!(trainer_id = id, detached, "Cleared trainer reference on appointments");
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn list(&self, order: AppointmentOrder) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.tables.read().await;
        let mut items: Vec<Appointment> = tables
            .appointments
            .values()
            .map(|a| tables.resolve(a))
            .collect();
        items.sort_by(|a, b| compare(a, b, order));
        Ok(items)
    }

    async fn list_by_trainer(&self, trainer_id: DbId) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.tables.read().await;
        let mut items: Vec<Appointment> = tables
            .appointments
            .values()
            .filter(|a| a.trainer_id == Some(trainer_id))
            .map(|a| tables.resolve(a))
            .collect();
        items.sort_by(|a, b| compare(a, b, AppointmentOrder::default()));
        Ok(items)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Appointment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.appointments.get(&id).map(|a| tables.resolve(a)))
    }

    async fn create(&self, input: &AppointmentFields) -> Result<Appointment, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_trainer_ref(input.trainer_id)?;

        tables.last_appointment_id += 1;
        let now = Utc::now();
        let mut stored = StoredAppointment {
            id: tables.last_appointment_id,
            last_name: String::new(),
            first_name: String::new(),
            phone: String::new(),
            name_of_training_session: String::new(),
            trainer_id: None,
            comment: None,
            status: String::new(),
            appointment_date: None,
            date: Some(now),
            created_at: now,
        };
        stored.apply(input);

        let appointment = tables.resolve(&stored);
        tables.appointments.insert(stored.id, stored);
        Ok(appointment)
    }

    async fn update(
        &self,
        id: DbId,
        input: &AppointmentFields,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.appointments.contains_key(&id) {
            return Ok(None);
        }
        tables.check_trainer_ref(input.trainer_id)?;

        let Some(stored) = tables.appointments.get_mut(&id) else {
            return Ok(None);
        };
        stored.apply(input);
        let stored = stored.clone();
        Ok(Some(tables.resolve(&stored)))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.appointments.remove(&id).is_some())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
