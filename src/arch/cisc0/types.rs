//! Types used in modeling cisc0

use crate::error::{Error, Result};
use crate::memory::Memory;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

/// The type of a memory address, and of an unsigned register value.
pub type Address = u32;

/// The signed view of a register value.
pub type Integer = i32;

/// The smallest addressable unit of memory.
pub type MemoryWord = u16;

/// A four-bit register number.
pub type RegisterIndex = u8;

/// The memory a cisc0 core executes out of.
pub type Bus = Memory<MemoryWord>;

/// Memory capacity of a core when nobody asks for anything else.
pub const DEFAULT_CAPACITY: Address = 0x0100_0000;

pub const INSTRUCTION_POINTER: RegisterIndex = 15;
pub const STACK_POINTER: RegisterIndex = 14;
pub const CALL_STACK_POINTER: RegisterIndex = 13;
pub const ADDRESS_REGISTER: RegisterIndex = 12;
pub const VALUE_REGISTER: RegisterIndex = 11;

/// Registers whose mask is narrowed to the memory capacity.
pub const ADDRESS_REGISTERS: [RegisterIndex; 4] = [
    INSTRUCTION_POINTER,
    ADDRESS_REGISTER,
    STACK_POINTER,
    CALL_STACK_POINTER,
];

/// Canonical names of every register, as printed by the disassembler.
pub static REGISTER_NAMES: [&str; 16] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "value", "addr", "csp",
    "sp", "ip",
];

lazy_static! {
    static ref REGISTER_LOOKUP: HashMap<&'static str, RegisterIndex> = {
        let mut lookup = HashMap::new();
        let generic = [
            "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12",
            "r13", "r14", "r15",
        ];

        for (index, name) in generic.iter().enumerate() {
            lookup.insert(*name, index as RegisterIndex);
        }

        for (index, name) in REGISTER_NAMES.iter().enumerate() {
            lookup.insert(*name, index as RegisterIndex);
        }

        lookup
    };
}

/// Print name of a register.
pub fn register_name(index: RegisterIndex) -> &'static str {
    REGISTER_NAMES[(index & 0x0F) as usize]
}

/// Look up a register by either its generic (`r12`) or its special (`addr`)
/// name. Case insensitive.
pub fn parse_register(name: &str) -> Option<RegisterIndex> {
    REGISTER_LOOKUP
        .get(name.to_ascii_lowercase().as_str())
        .copied()
}

/// The instruction group, selected by the low four bits of the first word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperationCode {
    Memory,
    Arithmetic,
    Shift,
    Logical,
    Compare,
    Branch,
    Move,
    Set,
    Swap,
    Misc,
}

impl OperationCode {
    pub fn from_bits(bits: u8) -> Result<Self> {
        use OperationCode::*;

        Ok(match bits {
            0 => Memory,
            1 => Arithmetic,
            2 => Shift,
            3 => Logical,
            4 => Compare,
            5 => Branch,
            6 => Move,
            7 => Set,
            8 => Swap,
            9 => Misc,
            _ => return Err(Error::IllegalOpcode(bits)),
        })
    }

    pub fn into_bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for OperationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use OperationCode::*;

        match self {
            Memory => write!(f, "memory"),
            Arithmetic => write!(f, "arithmetic"),
            Shift => write!(f, "shift"),
            Logical => write!(f, "logical"),
            Compare => write!(f, "compare"),
            Branch => write!(f, "branch"),
            Move => write!(f, "move"),
            Set => write!(f, "set"),
            Swap => write!(f, "swap"),
            Misc => write!(f, "misc"),
        }
    }
}
