//! Instruction enumeration

use crate::arch::cisc0::{register_name, Address, OperationCode, RegisterIndex};
use crate::error::{Error, Result};
use crate::maths::Bitmask;
use std::fmt;

/// Declare a style enumeration along with its conversions to and from the
/// raw style field of its instruction group.
macro_rules! style_enum {
    ($(#[$meta:meta])* $name:ident, $group:expr, { $($variant:ident = $bits:literal => $mnemonic:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub fn from_bits(bits: u16) -> Result<Self> {
                match bits {
                    $($bits => Ok($name::$variant),)*
                    style => Err(Error::IllegalStyle {
                        group: $group,
                        style: style as u8,
                    }),
                }
            }

            pub fn into_bits(self) -> u16 {
                match self {
                    $($name::$variant => $bits),*
                }
            }

            pub fn mnemonic(self) -> &'static str {
                match self {
                    $($name::$variant => $mnemonic),*
                }
            }
        }
    };
}

style_enum!(MemoryStyle, OperationCode::Memory, {
    Load = 0 => "load",
    Store = 1 => "store",
    Push = 2 => "push",
    Pop = 3 => "pop",
});

style_enum!(ArithmeticStyle, OperationCode::Arithmetic, {
    Add = 0 => "add",
    Sub = 1 => "sub",
    Mul = 2 => "mul",
    Div = 3 => "div",
    Rem = 4 => "rem",
    Min = 5 => "min",
    Max = 6 => "max",
});

style_enum!(LogicalStyle, OperationCode::Logical, {
    And = 0 => "and",
    Or = 1 => "or",
    Xor = 2 => "xor",
    Nand = 3 => "nand",
    Not = 4 => "not",
});

style_enum!(
    /// Unsigned comparisons that write the condition flag.
    CompareStyle, OperationCode::Compare, {
    Equals = 0 => "eq",
    NotEquals = 1 => "ne",
    LessThan = 2 => "lt",
    GreaterThan = 3 => "gt",
    LessThanOrEqualTo = 4 => "le",
    GreaterThanOrEqualTo = 5 => "ge",
});

/// Compare style values that move the condition flag rather than compute it.
pub const MOVE_FROM_CONDITION: u16 = 6;
pub const MOVE_TO_CONDITION: u16 = 7;

/// Second operand of a two-operand ALU instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Register(RegisterIndex),

    /// An immediate value, already narrowed to the bytes its mask selects.
    Immediate { mask: Bitmask, value: Address },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShiftAmount {
    Register(RegisterIndex),
    Immediate(u8),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Register(RegisterIndex),
    Immediate(Address),
}

/// Transfers between the value register or a stack and memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryAccess {
    /// Load `value` from `addr + offset`.
    Load { mask: Bitmask, offset: u8 },

    /// Store `value` to `addr + offset`.
    Store { mask: Bitmask, offset: u8 },

    Push { mask: Bitmask, register: RegisterIndex },
    Pop { mask: Bitmask, register: RegisterIndex },
}

impl MemoryAccess {
    pub fn style(self) -> MemoryStyle {
        match self {
            MemoryAccess::Load { .. } => MemoryStyle::Load,
            MemoryAccess::Store { .. } => MemoryStyle::Store,
            MemoryAccess::Push { .. } => MemoryStyle::Push,
            MemoryAccess::Pop { .. } => MemoryStyle::Pop,
        }
    }

    pub fn mask(self) -> Bitmask {
        match self {
            MemoryAccess::Load { mask, .. }
            | MemoryAccess::Store { mask, .. }
            | MemoryAccess::Push { mask, .. }
            | MemoryAccess::Pop { mask, .. } => mask,
        }
    }

    /// The four-bit operand field, which is an offset or a register
    /// depending on the style.
    pub fn operand(self) -> u8 {
        match self {
            MemoryAccess::Load { offset, .. } | MemoryAccess::Store { offset, .. } => offset,
            MemoryAccess::Push { register, .. } | MemoryAccess::Pop { register, .. } => register,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    Test {
        style: CompareStyle,
        destination: RegisterIndex,
        source: Source,
    },

    /// Set the register to all ones if the condition flag is set, else zero.
    MoveFromCondition(RegisterIndex),

    /// Set the condition flag to the truth of the register.
    MoveToCondition(RegisterIndex),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Misc {
    Return,
    Terminate,
    GetChar(RegisterIndex),
    PutChar(RegisterIndex),
}

/// A single decoded cisc0 instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Memory(MemoryAccess),
    Arithmetic {
        style: ArithmeticStyle,
        destination: RegisterIndex,
        source: Source,
    },
    Shift {
        left: bool,
        destination: RegisterIndex,
        amount: ShiftAmount,
    },
    Logical {
        style: LogicalStyle,
        destination: RegisterIndex,
        source: Source,
    },
    Compare(Comparison),
    Branch {
        call: bool,
        conditional: bool,
        target: Target,
    },
    Move {
        mask: Bitmask,
        destination: RegisterIndex,
        source: RegisterIndex,
    },
    Set {
        mask: Bitmask,
        destination: RegisterIndex,
        value: Address,
    },
    Swap {
        destination: RegisterIndex,
        source: RegisterIndex,
    },
    Misc(Misc),
}

impl Operation {
    pub fn group(&self) -> OperationCode {
        match self {
            Operation::Memory(_) => OperationCode::Memory,
            Operation::Arithmetic { .. } => OperationCode::Arithmetic,
            Operation::Shift { .. } => OperationCode::Shift,
            Operation::Logical { .. } => OperationCode::Logical,
            Operation::Compare(_) => OperationCode::Compare,
            Operation::Branch { .. } => OperationCode::Branch,
            Operation::Move { .. } => OperationCode::Move,
            Operation::Set { .. } => OperationCode::Set,
            Operation::Swap { .. } => OperationCode::Swap,
            Operation::Misc(_) => OperationCode::Misc,
        }
    }

    /// Number of words this instruction occupies in memory.
    pub fn word_count(&self) -> usize {
        let immediate = |source: &Source| match source {
            Source::Register(_) => 0,
            Source::Immediate { mask, .. } => mask.word_count(),
        };

        1 + match self {
            Operation::Arithmetic { source, .. } | Operation::Logical { source, .. } => {
                immediate(source)
            }
            Operation::Compare(Comparison::Test { source, .. }) => immediate(source),
            Operation::Branch {
                target: Target::Immediate(_),
                ..
            } => 2,
            Operation::Set { mask, .. } => mask.word_count(),
            _ => 0,
        }
    }
}

struct SourceDisplay(Source);

impl fmt::Display for SourceDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Source::Register(r) => write!(f, "{}", register_name(r)),
            Source::Immediate { mask, value } => write!(f, "0x{:08X} [{}]", value, mask),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Operation::Memory(access) => match access {
                MemoryAccess::Load { mask, offset } | MemoryAccess::Store { mask, offset } => {
                    write!(f, "{} 0x{:X} [{}]", access.style().mnemonic(), offset, mask)
                }
                MemoryAccess::Push { mask, register } | MemoryAccess::Pop { mask, register } => {
                    write!(
                        f,
                        "{} {} [{}]",
                        access.style().mnemonic(),
                        register_name(register),
                        mask
                    )
                }
            },
            Operation::Arithmetic {
                style,
                destination,
                source,
            } => write!(
                f,
                "{} {}, {}",
                style.mnemonic(),
                register_name(destination),
                SourceDisplay(source)
            ),
            Operation::Shift {
                left,
                destination,
                amount,
            } => {
                let mnemonic = if left { "shl" } else { "shr" };
                match amount {
                    ShiftAmount::Register(r) => write!(
                        f,
                        "{} {}, {}",
                        mnemonic,
                        register_name(destination),
                        register_name(r)
                    ),
                    ShiftAmount::Immediate(n) => {
                        write!(f, "{} {}, {}", mnemonic, register_name(destination), n)
                    }
                }
            }
            Operation::Logical {
                style,
                destination,
                source,
            } => write!(
                f,
                "{} {}, {}",
                style.mnemonic(),
                register_name(destination),
                SourceDisplay(source)
            ),
            Operation::Compare(Comparison::Test {
                style,
                destination,
                source,
            }) => write!(
                f,
                "{} {}, {}",
                style.mnemonic(),
                register_name(destination),
                SourceDisplay(source)
            ),
            Operation::Compare(Comparison::MoveFromCondition(r)) => {
                write!(f, "mfc {}", register_name(r))
            }
            Operation::Compare(Comparison::MoveToCondition(r)) => {
                write!(f, "mtc {}", register_name(r))
            }
            Operation::Branch {
                call,
                conditional,
                target,
            } => {
                let mnemonic = match (call, conditional) {
                    (true, _) => "call",
                    (false, true) => "jc",
                    (false, false) => "jmp",
                };
                match target {
                    Target::Register(r) => write!(f, "{} {}", mnemonic, register_name(r)),
                    Target::Immediate(a) => write!(f, "{} 0x{:06X}", mnemonic, a),
                }
            }
            Operation::Move {
                mask,
                destination,
                source,
            } => write!(
                f,
                "move {}, {} [{}]",
                register_name(destination),
                register_name(source),
                mask
            ),
            Operation::Set {
                mask,
                destination,
                value,
            } => write!(
                f,
                "set {}, 0x{:08X} [{}]",
                register_name(destination),
                value,
                mask
            ),
            Operation::Swap {
                destination,
                source,
            } => write!(
                f,
                "swap {}, {}",
                register_name(destination),
                register_name(source)
            ),
            Operation::Misc(Misc::Return) => write!(f, "return"),
            Operation::Misc(Misc::Terminate) => write!(f, "terminate"),
            Operation::Misc(Misc::GetChar(r)) => write!(f, "getc {}", register_name(r)),
            Operation::Misc(Misc::PutChar(r)) => write!(f, "putc {}", register_name(r)),
        }
    }
}
