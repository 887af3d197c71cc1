pub mod appointments;
pub mod trainers;
