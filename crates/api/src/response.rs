//! Response envelopes for list and single-record endpoints.
//!
//! Lists are wrapped in a field named after the entity (`{"trainers": [...]}`).

use serde::Serialize;

use crate::views::{AppointmentView, TrainerView};

#[derive(Debug, Serialize)]
pub struct TrainerListResponse {
    pub trainers: Vec<TrainerView>,
}

#[derive(Debug, Serialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<AppointmentView>,
}

/// `GET /appointments/{id}` wraps the single record.
#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub appointment: AppointmentView,
}
