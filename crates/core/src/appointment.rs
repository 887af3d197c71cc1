//! Appointment write record, status labels and list ordering.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Column limits
// ---------------------------------------------------------------------------

/// Maximum length of the client's last and first name.
pub const MAX_CLIENT_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_SESSION_NAME_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_PLANNED: &str = "Запланировано";
pub const STATUS_COMPLETED: &str = "Проведено";
pub const STATUS_CANCELLED: &str = "Отменено";

/// All valid appointment status labels, as stored.
pub const VALID_STATUSES: &[&str] = &[STATUS_PLANNED, STATUS_COMPLETED, STATUS_CANCELLED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppointmentStatus {
    #[default]
    Planned,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Planned => STATUS_PLANNED,
            AppointmentStatus::Completed => STATUS_COMPLETED,
            AppointmentStatus::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PLANNED => Ok(AppointmentStatus::Planned),
            STATUS_COMPLETED => Ok(AppointmentStatus::Completed),
            STATUS_CANCELLED => Ok(AppointmentStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Недопустимый статус '{}'. Допустимые значения: {}",
                other,
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Write record
// ---------------------------------------------------------------------------

/// Validated set of writable appointment fields.
///
/// `trainer_id` has only been checked for shape here; whether the trainer
/// exists is checked against the store right before the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentFields {
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub name_of_training_session: String,
    pub trainer_id: Option<DbId>,
    pub comment: Option<String>,
    pub appointment_date: Option<Timestamp>,
    pub status: AppointmentStatus,
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Columns an appointment listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentSortField {
    Id,
    LastName,
    FirstName,
    Phone,
    Date,
    AppointmentDate,
    CreatedAt,
    Status,
}

impl AppointmentSortField {
    pub const ALL: [AppointmentSortField; 8] = [
        AppointmentSortField::Id,
        AppointmentSortField::LastName,
        AppointmentSortField::FirstName,
        AppointmentSortField::Phone,
        AppointmentSortField::Date,
        AppointmentSortField::AppointmentDate,
        AppointmentSortField::CreatedAt,
        AppointmentSortField::Status,
    ];

    /// Query-parameter name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentSortField::Id => "id",
            AppointmentSortField::LastName => "last_name",
            AppointmentSortField::FirstName => "first_name",
            AppointmentSortField::Phone => "phone",
            AppointmentSortField::Date => "date",
            AppointmentSortField::AppointmentDate => "appointment_date",
            AppointmentSortField::CreatedAt => "created_at",
            AppointmentSortField::Status => "status",
        }
    }

    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` (any case) sorts descending, anything else ascending.
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Resolved ordering for an appointment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentOrder {
    pub field: AppointmentSortField,
    pub direction: SortDirection,
}

impl Default for AppointmentOrder {
    fn default() -> Self {
        Self {
            field: AppointmentSortField::CreatedAt,
            direction: SortDirection::Asc,
        }
    }
}

impl AppointmentOrder {
    /// Resolve `sort_by` / `direction` query parameters.
    ///
    /// Never fails: a missing or unknown `sort_by` yields the default
    /// ordering (created_at ascending) and ignores `direction`.
    pub fn from_params(sort_by: Option<&str>, direction: Option<&str>) -> Self {
        match sort_by.and_then(AppointmentSortField::from_param) {
            Some(field) => Self {
                field,
                direction: direction.map(SortDirection::from_param).unwrap_or_default(),
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn status_round_trips_through_labels() {
        for label in VALID_STATUSES {
            let status: AppointmentStatus = label.parse().unwrap();
            assert_eq!(status.as_str(), *label);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_matches!(
            "Done".parse::<AppointmentStatus>(),
            Err(CoreError::Validation(msg)) if msg.contains("Done")
        );
    }

    #[test]
    fn default_status_is_planned() {
        assert_eq!(AppointmentStatus::default().as_str(), STATUS_PLANNED);
    }

    #[test]
    fn every_sort_field_resolves_from_its_name() {
        for field in AppointmentSortField::ALL {
            assert_eq!(AppointmentSortField::from_param(field.as_str()), Some(field));
        }
    }

    #[test]
    fn order_defaults_to_created_at_ascending() {
        assert_eq!(AppointmentOrder::from_params(None, None), AppointmentOrder::default());
    }

    #[test]
    fn unknown_sort_field_ignores_direction() {
        let order = AppointmentOrder::from_params(Some("password"), Some("desc"));
        assert_eq!(order.field, AppointmentSortField::CreatedAt);
        assert_eq!(order.direction, SortDirection::Asc);
    }

    #[test]
    fn known_field_with_desc() {
        let order = AppointmentOrder::from_params(Some("last_name"), Some("desc"));
        assert_eq!(order.field, AppointmentSortField::LastName);
        assert_eq!(order.direction, SortDirection::Desc);
    }

    #[test]
    fn unknown_direction_is_ascending() {
        let order = AppointmentOrder::from_params(Some("phone"), Some("sideways"));
        assert_eq!(order.direction, SortDirection::Asc);
    }

    #[test]
    fn sort_field_names_are_case_sensitive() {
        assert_eq!(AppointmentSortField::from_param("ID"), None);
    }
}
