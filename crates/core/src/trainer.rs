//! Trainer write record and column limits.

/// Maximum length of a trainer's last, first and middle name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of the training session label.
pub const MAX_SESSION_NAME_LEN: usize = 200;

pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_SPECIALIZATION_LEN: usize = 200;

/// Validated set of writable trainer fields.
///
/// Produced by [`crate::validation::validate_trainer`] and used unchanged for
/// both create and update, so an update always replaces every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerFields {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub name_of_training_session: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: i32,
}
