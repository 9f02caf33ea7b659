//! Bit layout of the first word of every instruction

use crate::maths::Field;

pub const GROUP: Field = Field::new(0x000F, 0);

/// Immediate flag shared by the arithmetic, shift, logical, compare and
/// branch groups.
pub const IMMEDIATE: Field = Field::new(0x0010, 4);

/// Style of arithmetic, logical and compare instructions.
pub const STYLE: Field = Field::new(0x00E0, 5);

/// Source register, or bitmask of an immediate.
pub const SOURCE: Field = Field::new(0x0F00, 8);
pub const BITMASK: Field = SOURCE;

pub const DESTINATION: Field = Field::new(0xF000, 12);

pub const MEMORY_STYLE: Field = Field::new(0x0030, 4);
pub const MEMORY_BITMASK: Field = Field::new(0x0F00, 8);

/// Offset from the address register (load, store) or the register being
/// moved (push, pop).
pub const MEMORY_OFFSET: Field = Field::new(0xF000, 12);

pub const SHIFT_LEFT: Field = Field::new(0x0020, 5);
pub const SHIFT_AMOUNT: Field = Field::new(0x0F80, 7);

pub const BRANCH_CALL: Field = Field::new(0x0020, 5);
pub const BRANCH_CONDITIONAL: Field = Field::new(0x0040, 6);

pub const MOVE_BITMASK: Field = Field::new(0x00F0, 4);

pub const MISC_STYLE: Field = Field::new(0x00F0, 4);
