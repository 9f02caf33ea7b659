//! Project file structures

mod program;
mod repr;

pub use program::{Program, ProgramPath};
pub use repr::Project;
