//! A 32-bit register machine with 16-bit word-addressed memory and
//! variable-length instructions

mod console;
mod dis;
mod enc;
mod exec;
mod instr;
mod layout;
mod machine;
mod object;
mod types;

pub use console::{BufferConsole, Console, StdConsole};
pub use dis::{decode, disassemble, translate_instruction};
pub use instr::*;
pub use machine::Core;
pub use object::{link, link_capacity, read_records, write_records, Record, RECORD_SIZE};
pub use types::*;

#[cfg(test)]
mod tests;
