//! JSON payloads returned by the API.
//!
//! Stored records never go over the wire directly; handlers convert them
//! with [`trainer_to_view`] and [`appointment_to_view`]. Timestamps are
//! serialized as ISO-8601 strings, or `null` when absent.

use bodyfit_core::types::{DbId, Timestamp};
use bodyfit_db::models::appointment::Appointment;
use bodyfit_db::models::trainer::{Trainer, TrainerSummary};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerView {
    pub id: DbId,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub name_of_training_session: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: i32,
    pub created_at: Option<Timestamp>,
}

/// Trainer as embedded in an appointment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerSummaryView {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentView {
    pub id: DbId,
    /// `"{last_name} {first_name}"` of the client.
    pub client_name: String,
    pub client_phone: String,
    pub date: Option<Timestamp>,
    pub appointment_date: Option<Timestamp>,
    pub created_at: Option<Timestamp>,
    pub name_of_training_session: String,
    pub comment: Option<String>,
    pub status: String,
    pub trainer: Option<TrainerSummaryView>,
}

pub fn trainer_to_view(trainer: Trainer) -> TrainerView {
    TrainerView {
        id: trainer.id,
        last_name: trainer.last_name,
        first_name: trainer.first_name,
        middle_name: trainer.middle_name,
        name_of_training_session: trainer.name_of_training_session,
        phone: trainer.phone,
        email: trainer.email,
        specialization: trainer.specialization,
        experience_years: trainer.experience_years,
        created_at: Some(trainer.created_at),
    }
}

fn summary_to_view(summary: TrainerSummary) -> TrainerSummaryView {
    TrainerSummaryView {
        id: summary.id,
        first_name: summary.first_name,
        last_name: summary.last_name,
        middle_name: summary.middle_name,
    }
}

pub fn appointment_to_view(appointment: Appointment) -> AppointmentView {
    AppointmentView {
        id: appointment.id,
        client_name: format!("{} {}", appointment.last_name, appointment.first_name),
        client_phone: appointment.phone,
        date: appointment.date,
        appointment_date: appointment.appointment_date,
        created_at: Some(appointment.created_at),
        name_of_training_session: appointment.name_of_training_session,
        comment: appointment.comment,
        status: appointment.status,
        trainer: appointment.trainer.map(summary_to_view),
    }
}
