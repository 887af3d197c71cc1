//! Full-record validation of trainer and appointment payloads.
//!
//! Both validators take the raw JSON object of a request body and return the
//! typed write record, so a payload is checked in full on every create and
//! every update. Checks run in a fixed order (required fields, then lengths,
//! then optional fields) and the first failure is reported with a message
//! naming the offending field. No store access happens here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::appointment::{self, AppointmentFields, AppointmentStatus};
use crate::error::CoreError;
use crate::trainer::{self, TrainerFields};
use crate::types::{DbId, Timestamp};

/// Raw JSON object of a request body.
pub type Fields = Map<String, Value>;

const TRAINER_REQUIRED: [&str; 4] = [
    "first_name",
    "last_name",
    "middle_name",
    "name_of_training_session",
];

const APPOINTMENT_REQUIRED: [&str; 4] = [
    "first_name",
    "last_name",
    "phone",
    "name_of_training_session",
];

// ---------------------------------------------------------------------------
// Trainers
// ---------------------------------------------------------------------------

/// Validate a trainer payload.
pub fn validate_trainer(data: &Fields) -> Result<TrainerFields, CoreError> {
    for field in TRAINER_REQUIRED {
        required_str(data, field)?;
    }

    let first_name = required_str(data, "first_name")?;
    let last_name = required_str(data, "last_name")?;
    let middle_name = required_str(data, "middle_name")?;
    let session = required_str(data, "name_of_training_session")?;

    check_len("first_name", first_name, trainer::MAX_NAME_LEN)?;
    check_len("last_name", last_name, trainer::MAX_NAME_LEN)?;
    check_len("middle_name", middle_name, trainer::MAX_NAME_LEN)?;
    check_len("name_of_training_session", session, trainer::MAX_SESSION_NAME_LEN)?;

    let phone = optional_str(data, "phone")?;
    if let Some(phone) = phone {
        check_len("phone", phone, trainer::MAX_PHONE_LEN)?;
    }
    let email = optional_str(data, "email")?;
    if let Some(email) = email {
        check_len("email", email, trainer::MAX_EMAIL_LEN)?;
    }
    let specialization = optional_str(data, "specialization")?;
    if let Some(spec) = specialization {
        check_len("specialization", spec, trainer::MAX_SPECIALIZATION_LEN)?;
    }
    let experience_years = experience_years(data)?;

    Ok(TrainerFields {
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        middle_name: middle_name.to_string(),
        name_of_training_session: session.to_string(),
        phone: phone.map(str::to_string),
        email: email.map(str::to_string),
        specialization: specialization.map(str::to_string),
        experience_years,
    })
}

fn experience_years(data: &Fields) -> Result<i32, CoreError> {
    match data.get("experience_years") {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .filter(|v| *v >= 0)
            .ok_or_else(|| not_a_non_negative_integer("experience_years")),
        Some(_) => Err(not_a_non_negative_integer("experience_years")),
    }
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

/// Validate an appointment payload.
///
/// A supplied `trainer_id` must be an integer (or a string holding one); the
/// caller still has to confirm the trainer exists before writing.
pub fn validate_appointment(data: &Fields) -> Result<AppointmentFields, CoreError> {
    for field in APPOINTMENT_REQUIRED {
        required_str(data, field)?;
    }

    let first_name = required_str(data, "first_name")?;
    let last_name = required_str(data, "last_name")?;
    let phone = required_str(data, "phone")?;
    let session = required_str(data, "name_of_training_session")?;

    check_len("first_name", first_name, appointment::MAX_CLIENT_NAME_LEN)?;
    check_len("last_name", last_name, appointment::MAX_CLIENT_NAME_LEN)?;
    check_len("phone", phone, appointment::MAX_PHONE_LEN)?;
    check_len(
        "name_of_training_session",
        session,
        appointment::MAX_SESSION_NAME_LEN,
    )?;

    let trainer_id = parse_trainer_id(data.get("trainer_id"))?;
    let comment = optional_str(data, "comment")?;

    let appointment_date = match optional_str(data, "appointment_date")? {
        None | Some("") => None,
        Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
            CoreError::Validation(
                "Поле 'appointment_date' должно содержать дату в формате ISO-8601".into(),
            )
        })?),
    };

    let status = match optional_str(data, "status")? {
        None | Some("") => AppointmentStatus::default(),
        Some(raw) => raw.parse()?,
    };

    Ok(AppointmentFields {
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        phone: phone.to_string(),
        name_of_training_session: session.to_string(),
        trainer_id,
        comment: comment.map(str::to_string),
        appointment_date,
        status,
    })
}

/// Interpret a supplied `trainer_id`.
///
/// Absent, `null` and the empty string mean "no trainer". Integers and
/// strings holding an integer are accepted; anything else is rejected.
pub fn parse_trainer_id(value: Option<&Value>) -> Result<Option<DbId>, CoreError> {
    let invalid = || CoreError::Validation("Поле 'trainer_id' должно быть целым числом".into());
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<DbId>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, naive date-times (`T` or space
/// separated, with or without seconds) read as UTC, and bare dates at
/// midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn required_str<'a>(data: &'a Fields, field: &str) -> Result<&'a str, CoreError> {
    match data.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
        None | Some(Value::Null) | Some(Value::String(_)) => Err(CoreError::Validation(
            format!("Поле '{field}' обязательно для заполнения"),
        )),
        Some(_) => Err(not_a_string(field)),
    }
}

fn optional_str<'a>(data: &'a Fields, field: &str) -> Result<Option<&'a str>, CoreError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(not_a_string(field)),
    }
}

/// Lengths are counted in characters: names are mostly Cyrillic.
fn check_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "Поле '{field}' не должно превышать {max} символов"
        )));
    }
    Ok(())
}

fn not_a_string(field: &str) -> CoreError {
    CoreError::Validation(format!("Поле '{field}' должно быть строкой"))
}

fn not_a_non_negative_integer(field: &str) -> CoreError {
    CoreError::Validation(format!(
        "Поле '{field}' должно быть неотрицательным целым числом"
    ))
}
