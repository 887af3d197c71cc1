pub mod appointment;
pub mod trainer;
