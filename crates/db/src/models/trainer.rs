//! Trainer rows.

use bodyfit_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `trainers` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Trainer {
    pub id: DbId,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub name_of_training_session: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: i32,
    pub created_at: Timestamp,
}

/// The slice of a trainer embedded in an appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
}

impl From<&Trainer> for TrainerSummary {
    fn from(t: &Trainer) -> Self {
        Self {
            id: t.id,
            first_name: t.first_name.clone(),
            last_name: t.last_name.clone(),
            middle_name: t.middle_name.clone(),
        }
    }
}
