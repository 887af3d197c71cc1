use crate::access::AccessDenied;
use crate::types::DbId;

/// Entities addressable by id through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Trainer,
    Appointment,
}

impl Entity {
    /// Message returned to clients when a lookup by id comes back empty.
    pub fn not_found_message(self) -> &'static str {
        match self {
            Entity::Trainer => "Тренер не найден",
            Entity::Appointment => "Запись не найдена",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Trainer => f.write_str("Trainer"),
            Entity::Appointment => f.write_str("Appointment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: Entity, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(AccessDenied),
}
