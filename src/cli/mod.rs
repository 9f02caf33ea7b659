//! CLI commands

mod common;
mod dis;
mod link;
mod main;
mod run;
mod trace;

pub use common::{resolve_program, Command};
pub use dis::dis;
pub use link::link;
pub use main::main;
pub use run::run;
pub use trace::trace;
