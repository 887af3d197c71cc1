//! Domain core for the BodyFit club backend.
//!
//! Holds everything that does not need a database or an HTTP stack:
//! shared id/timestamp types, the error taxonomy, write-record types for
//! trainers and appointments, field validation, appointment ordering, and
//! API-key access control.

pub mod access;
pub mod appointment;
pub mod error;
pub mod trainer;
pub mod types;
pub mod validation;
