//! Instruction decoder

use crate::arch::cisc0::layout::*;
use crate::arch::cisc0::{
    Address, ArithmeticStyle, CompareStyle, Comparison, LogicalStyle, MemoryAccess, MemoryStyle,
    MemoryWord, Misc, Operation, OperationCode, ShiftAmount, Source, Target,
    MOVE_FROM_CONDITION, MOVE_TO_CONDITION,
};
use crate::error::{Error, Result};
use crate::maths::{Bitmask, Halves};

fn register(field: u16) -> u8 {
    field as u8 & 0x0F
}

fn destination(first: MemoryWord) -> u8 {
    register(DESTINATION.decode(first))
}

/// Read the immediate words selected by `mask`, low half first.
///
/// Halves the mask doesn't select are not present in the instruction stream
/// and read as zero.
fn masked_immediate<F>(mask: Bitmask, next: &mut F) -> Result<Address>
where
    F: FnMut() -> Result<MemoryWord>,
{
    let lower = if mask.reads_lower() { next()? } else { 0 };
    let upper = if mask.reads_upper() { next()? } else { 0 };

    Ok(Address::combine(lower, upper) & mask.expand())
}

/// Decode the second operand of an ALU instruction, fetching an immediate if
/// the immediate flag is set.
fn source<F>(first: MemoryWord, next: &mut F) -> Result<Source>
where
    F: FnMut() -> Result<MemoryWord>,
{
    if IMMEDIATE.is_set(first) {
        let mask = Bitmask::from_nibble(BITMASK.decode(first));
        let value = masked_immediate(mask, next)?;

        Ok(Source::Immediate { mask, value })
    } else {
        Ok(Source::Register(register(SOURCE.decode(first))))
    }
}

fn memory(first: MemoryWord) -> Result<Operation> {
    let mask = Bitmask::from_nibble(MEMORY_BITMASK.decode(first));
    let operand = register(MEMORY_OFFSET.decode(first));

    Ok(Operation::Memory(
        match MemoryStyle::from_bits(MEMORY_STYLE.decode(first))? {
            MemoryStyle::Load => MemoryAccess::Load {
                mask,
                offset: operand,
            },
            MemoryStyle::Store => MemoryAccess::Store {
                mask,
                offset: operand,
            },
            MemoryStyle::Push => MemoryAccess::Push {
                mask,
                register: operand,
            },
            MemoryStyle::Pop => MemoryAccess::Pop {
                mask,
                register: operand,
            },
        },
    ))
}

fn compare<F>(first: MemoryWord, next: &mut F) -> Result<Operation>
where
    F: FnMut() -> Result<MemoryWord>,
{
    let destination = destination(first);
    let style = STYLE.decode(first);

    if style == MOVE_FROM_CONDITION || style == MOVE_TO_CONDITION {
        if IMMEDIATE.is_set(first) {
            return Err(Error::IllegalStyle {
                group: OperationCode::Compare,
                style: style as u8,
            });
        }

        return Ok(Operation::Compare(if style == MOVE_FROM_CONDITION {
            Comparison::MoveFromCondition(destination)
        } else {
            Comparison::MoveToCondition(destination)
        }));
    }

    let style = CompareStyle::from_bits(style)?;

    Ok(Operation::Compare(Comparison::Test {
        style,
        destination,
        source: source(first, next)?,
    }))
}

fn misc(first: MemoryWord) -> Result<Operation> {
    Ok(Operation::Misc(match MISC_STYLE.decode(first) {
        0 => Misc::Return,
        1 => Misc::Terminate,
        2 => Misc::GetChar(destination(first)),
        3 => Misc::PutChar(destination(first)),
        style => {
            return Err(Error::IllegalStyle {
                group: OperationCode::Misc,
                style: style as u8,
            })
        }
    }))
}

/// Decode one instruction from a stream of words.
///
/// `next` is called once for every word the instruction occupies, and never
/// more. Immediates are fetched only once the first word says how many of
/// their halves are present, so the instruction length depends on its data.
pub fn decode<F>(mut next: F) -> Result<Operation>
where
    F: FnMut() -> Result<MemoryWord>,
{
    let first = next()?;

    match OperationCode::from_bits(GROUP.decode(first) as u8)? {
        OperationCode::Memory => memory(first),
        OperationCode::Arithmetic => {
            let style = ArithmeticStyle::from_bits(STYLE.decode(first))?;

            Ok(Operation::Arithmetic {
                style,
                destination: destination(first),
                source: source(first, &mut next)?,
            })
        }
        OperationCode::Shift => Ok(Operation::Shift {
            left: SHIFT_LEFT.is_set(first),
            destination: destination(first),
            amount: if IMMEDIATE.is_set(first) {
                ShiftAmount::Immediate(SHIFT_AMOUNT.decode(first) as u8)
            } else {
                ShiftAmount::Register(register(SOURCE.decode(first)))
            },
        }),
        OperationCode::Logical => {
            let style = LogicalStyle::from_bits(STYLE.decode(first))?;

            Ok(Operation::Logical {
                style,
                destination: destination(first),
                source: source(first, &mut next)?,
            })
        }
        OperationCode::Compare => compare(first, &mut next),
        OperationCode::Branch => Ok(Operation::Branch {
            call: BRANCH_CALL.is_set(first),
            conditional: BRANCH_CONDITIONAL.is_set(first),
            target: if IMMEDIATE.is_set(first) {
                let lower = next()?;
                let upper = next()?;

                Target::Immediate(Address::combine(lower, upper))
            } else {
                Target::Register(destination(first))
            },
        }),
        OperationCode::Move => Ok(Operation::Move {
            mask: Bitmask::from_nibble(MOVE_BITMASK.decode(first)),
            destination: destination(first),
            source: register(SOURCE.decode(first)),
        }),
        OperationCode::Set => {
            let mask = Bitmask::from_nibble(BITMASK.decode(first));

            Ok(Operation::Set {
                mask,
                destination: destination(first),
                value: masked_immediate(mask, &mut next)?,
            })
        }
        OperationCode::Swap => Ok(Operation::Swap {
            destination: destination(first),
            source: register(SOURCE.decode(first)),
        }),
        OperationCode::Misc => misc(first),
    }
}

/// Decode the instruction at the start of `words`.
///
/// Returns the operation together with the number of words it occupied.
/// Running off the end of the slice fails with `IllegalAddress` at the
/// offset of the missing word.
pub fn disassemble(words: &[MemoryWord]) -> Result<(Operation, usize)> {
    let mut offset = 0;
    let op = decode(|| {
        let word = words
            .get(offset)
            .copied()
            .ok_or(Error::IllegalAddress(offset as Address))?;
        offset += 1;

        Ok(word)
    })?;

    Ok((op, offset))
}

/// Render up to three raw words as assembly text.
///
/// Trailing words the instruction doesn't need are ignored. Words that do not
/// form a valid instruction render as the reason they don't.
pub fn translate_instruction(w0: MemoryWord, w1: MemoryWord, w2: MemoryWord) -> String {
    match disassemble(&[w0, w1, w2]) {
        Ok((op, _)) => format!("{}", op),
        Err(e) => format!("<{}>", e),
    }
}
