//! Emulator core for the cisc0 virtual CPU architecture.
//!
//! A cisc0 core has sixteen 32-bit registers, a power-of-two sized memory of
//! 16-bit words, and a variable-length instruction encoding of one to three
//! words per instruction. The `arch::cisc0` module holds the core itself;
//! the remaining modules provide the bit-level maths, register and memory
//! models it is built from, plus the command line front end.

pub mod arch;
pub mod cli;
pub mod error;
pub mod input;
pub mod maths;
pub mod memory;
pub mod project;
pub mod reg;

pub use error::{Error, Result};
