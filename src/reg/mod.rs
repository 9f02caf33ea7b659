//! Types which model the architectural registers of a core.

mod file;
mod register;

pub use file::{RegisterFile, REGISTER_COUNT};
pub use register::Register;
