//! Error type for the cisc0 core

use crate::arch::cisc0::{Address, OperationCode};
use std::{io, result};
use thiserror::Error;

/// Everything that can stop the core.
///
/// Every variant is fatal at the point where it occurs: the core performs no
/// local recovery, and `Core::run` returns the first error it encounters.
#[derive(Error, Debug)]
pub enum Error {
    /// A load or store fell outside of `[0, capacity)`.
    #[error("Illegal address ${0:06X}")]
    IllegalAddress(Address),

    /// `Div` or `Rem` was executed with a zero denominator.
    #[error("Divide by zero")]
    DivideByZero,

    /// The group field of an instruction does not name any instruction group.
    #[error("Illegal opcode {0:#X}")]
    IllegalOpcode(u8),

    /// The style field of an instruction is not defined for its group.
    #[error("Illegal style {style:#X} for {group} instruction")]
    IllegalStyle { group: OperationCode, style: u8 },

    /// A bitmask nibble outside of `0..=15`.
    ///
    /// The decoder only ever extracts four-bit fields, so this indicates a
    /// programming error in whoever constructed the bitmask.
    #[error("Bad bitmask index {0:#X}")]
    BadBitmaskIndex(u8),

    /// Memory capacity must be a nonzero power of two.
    #[error("Illegal memory capacity {0:#X}, must be a power of two")]
    IllegalCapacity(Address),

    /// An instruction operand is too wide for the field that encodes it.
    #[error("Operand {operand} value {value:#X} does not fit its encoding")]
    OperandOutOfRange {
        operand: &'static str,
        value: Address,
    },

    /// A host asked for a register that does not exist.
    #[error("Illegal register index {0}")]
    IllegalRegisterIndex(i64),

    /// An object file contained a record with an unknown section tag.
    #[error("Illegal object section {0}")]
    IllegalSection(u16),

    /// An object file ended in the middle of a record.
    #[error("Unaligned object file, {0} trailing bytes")]
    UnalignedObject(usize),

    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(e) => e,
            _ => io::Error::new(io::ErrorKind::Other, format!("{}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
