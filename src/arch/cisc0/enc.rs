//! Instruction encoder

use crate::arch::cisc0::layout::*;
use crate::arch::cisc0::{
    Address, Comparison, MemoryAccess, MemoryWord, Misc, Operation, RegisterIndex, ShiftAmount,
    Source, Target, MOVE_FROM_CONDITION, MOVE_TO_CONDITION,
};
use crate::error::{Error, Result};
use crate::maths::{Bitmask, Halves};

/// Largest immediate shift amount the shift field holds.
const MAX_SHIFT: u8 = 0x1F;

/// Largest value of a four-bit register or offset field.
const MAX_NIBBLE: u8 = 0x0F;

fn bounded(operand: &'static str, value: u8, limit: u8) -> Result<u16> {
    if value > limit {
        return Err(Error::OperandOutOfRange {
            operand,
            value: value.into(),
        });
    }

    Ok(value.into())
}

fn register(r: RegisterIndex) -> Result<u16> {
    bounded("register", r, MAX_NIBBLE)
}

/// Append the immediate halves selected by `mask`, low half first.
///
/// Bits of `value` that the mask does not select would be lost, so they are
/// rejected.
fn push_immediate(words: &mut Vec<MemoryWord>, mask: Bitmask, value: Address) -> Result<()> {
    if value & !mask.expand() != 0 {
        return Err(Error::OperandOutOfRange {
            operand: "immediate",
            value,
        });
    }

    if mask.reads_lower() {
        words.push(value.lower_half());
    }

    if mask.reads_upper() {
        words.push(value.upper_half());
    }

    Ok(())
}

/// Encode the operand of an ALU instruction into the first word, returning
/// the updated first word.
fn encode_source(
    first: MemoryWord,
    source: Source,
    tail: &mut Vec<MemoryWord>,
) -> Result<MemoryWord> {
    match source {
        Source::Register(r) => {
            let first = IMMEDIATE.encode_flag(first, false);
            Ok(SOURCE.encode(first, register(r)?))
        }
        Source::Immediate { mask, value } => {
            push_immediate(tail, mask, value)?;
            Ok(BITMASK.encode(IMMEDIATE.encode_flag(first, true), mask.bits().into()))
        }
    }
}

impl Operation {
    /// Produce the machine words for this instruction.
    ///
    /// Decoding the result yields the same operation back. Operands too wide
    /// for their fields fail with `OperandOutOfRange`.
    pub fn encode(&self) -> Result<Vec<MemoryWord>> {
        let mut tail = Vec::with_capacity(2);
        let mut first = GROUP.encode(0, self.group().into_bits().into());

        match *self {
            Operation::Memory(access) => {
                let operand = match access {
                    MemoryAccess::Load { offset, .. } | MemoryAccess::Store { offset, .. } => {
                        bounded("offset", offset, MAX_NIBBLE)?
                    }
                    MemoryAccess::Push { register: r, .. }
                    | MemoryAccess::Pop { register: r, .. } => register(r)?,
                };

                first = MEMORY_STYLE.encode(first, access.style().into_bits());
                first = MEMORY_BITMASK.encode(first, access.mask().bits().into());
                first = MEMORY_OFFSET.encode(first, operand);
            }
            Operation::Arithmetic {
                style,
                destination,
                source,
            } => {
                first = STYLE.encode(first, style.into_bits());
                first = DESTINATION.encode(first, register(destination)?);
                first = encode_source(first, source, &mut tail)?;
            }
            Operation::Shift {
                left,
                destination,
                amount,
            } => {
                first = SHIFT_LEFT.encode_flag(first, left);
                first = DESTINATION.encode(first, register(destination)?);
                first = match amount {
                    ShiftAmount::Register(r) => SOURCE.encode(first, register(r)?),
                    ShiftAmount::Immediate(n) => SHIFT_AMOUNT.encode(
                        IMMEDIATE.encode_flag(first, true),
                        bounded("shift amount", n, MAX_SHIFT)?,
                    ),
                };
            }
            Operation::Logical {
                style,
                destination,
                source,
            } => {
                first = STYLE.encode(first, style.into_bits());
                first = DESTINATION.encode(first, register(destination)?);
                first = encode_source(first, source, &mut tail)?;
            }
            Operation::Compare(Comparison::Test {
                style,
                destination,
                source,
            }) => {
                first = STYLE.encode(first, style.into_bits());
                first = DESTINATION.encode(first, register(destination)?);
                first = encode_source(first, source, &mut tail)?;
            }
            Operation::Compare(Comparison::MoveFromCondition(r)) => {
                first = STYLE.encode(first, MOVE_FROM_CONDITION);
                first = DESTINATION.encode(first, register(r)?);
            }
            Operation::Compare(Comparison::MoveToCondition(r)) => {
                first = STYLE.encode(first, MOVE_TO_CONDITION);
                first = DESTINATION.encode(first, register(r)?);
            }
            Operation::Branch {
                call,
                conditional,
                target,
            } => {
                first = BRANCH_CALL.encode_flag(first, call);
                first = BRANCH_CONDITIONAL.encode_flag(first, conditional);
                match target {
                    Target::Register(r) => first = DESTINATION.encode(first, register(r)?),
                    Target::Immediate(address) => {
                        first = IMMEDIATE.encode_flag(first, true);
                        tail.push(address.lower_half());
                        tail.push(address.upper_half());
                    }
                }
            }
            Operation::Move {
                mask,
                destination,
                source,
            } => {
                first = MOVE_BITMASK.encode(first, mask.bits().into());
                first = SOURCE.encode(first, register(source)?);
                first = DESTINATION.encode(first, register(destination)?);
            }
            Operation::Set {
                mask,
                destination,
                value,
            } => {
                first = BITMASK.encode(first, mask.bits().into());
                first = DESTINATION.encode(first, register(destination)?);
                push_immediate(&mut tail, mask, value)?;
            }
            Operation::Swap {
                destination,
                source,
            } => {
                first = SOURCE.encode(first, register(source)?);
                first = DESTINATION.encode(first, register(destination)?);
            }
            Operation::Misc(misc) => {
                let (style, reg) = match misc {
                    Misc::Return => (0, 0),
                    Misc::Terminate => (1, 0),
                    Misc::GetChar(r) => (2, r),
                    Misc::PutChar(r) => (3, r),
                };

                first = MISC_STYLE.encode(first, style);
                first = DESTINATION.encode(first, register(reg)?);
            }
        }

        let mut words = Vec::with_capacity(1 + tail.len());
        words.push(first);
        words.extend(tail);

        Ok(words)
    }
}
