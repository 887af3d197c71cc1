//! Appointment rows, joined with the referenced trainer.

use bodyfit_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::trainer::TrainerSummary;

/// An `appointments` row left-joined with `trainers`.
///
/// The `trainer_*` columns are `NULL` when the appointment has no trainer.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentRow {
    pub id: DbId,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub name_of_training_session: String,
    pub trainer_id: Option<DbId>,
    pub comment: Option<String>,
    pub status: String,
    pub appointment_date: Option<Timestamp>,
    pub date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub trainer_first_name: Option<String>,
    pub trainer_last_name: Option<String>,
    pub trainer_middle_name: Option<String>,
}

/// An appointment with its trainer (if any) resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: DbId,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub name_of_training_session: String,
    pub trainer: Option<TrainerSummary>,
    pub comment: Option<String>,
    pub status: String,
    pub appointment_date: Option<Timestamp>,
    pub date: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Appointment {
    pub fn trainer_id(&self) -> Option<DbId> {
        self.trainer.as_ref().map(|t| t.id)
    }
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        let trainer = match (
            row.trainer_id,
            row.trainer_first_name,
            row.trainer_last_name,
            row.trainer_middle_name,
        ) {
            (Some(id), Some(first_name), Some(last_name), Some(middle_name)) => {
                Some(TrainerSummary {
                    id,
                    first_name,
                    last_name,
                    middle_name,
                })
            }
            _ => None,
        };

        Self {
            id: row.id,
            last_name: row.last_name,
            first_name: row.first_name,
            phone: row.phone,
            name_of_training_session: row.name_of_training_session,
            trainer,
            comment: row.comment,
            status: row.status,
            appointment_date: row.appointment_date,
            date: row.date,
            created_at: row.created_at,
        }
    }
}
