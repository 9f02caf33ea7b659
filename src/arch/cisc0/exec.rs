//! Instruction semantics

use crate::arch::cisc0::{
    Address, ArithmeticStyle, CompareStyle, Comparison, Console, Core, LogicalStyle,
    MemoryAccess, MemoryWord, Misc, Operation, RegisterIndex, ShiftAmount, Source, Target,
    ADDRESS_REGISTER, CALL_STACK_POINTER, INSTRUCTION_POINTER, STACK_POINTER, VALUE_REGISTER,
};
use crate::error::{Error, Result};
use crate::maths::{Bitmask, Halves};

impl<C> Core<C>
where
    C: Console,
{
    /// Carry out the effects of one decoded operation.
    pub fn execute(&mut self, op: Operation) -> Result<()> {
        match op {
            Operation::Memory(access) => self.memory_access(access)?,
            Operation::Arithmetic {
                style,
                destination,
                source,
            } => self.arithmetic(style, destination, source)?,
            Operation::Shift {
                left,
                destination,
                amount,
            } => {
                let value = self.register(destination).address();
                let amount = match amount {
                    ShiftAmount::Register(r) => self.register(r).address(),
                    ShiftAmount::Immediate(n) => n.into(),
                };
                let shifted = if left {
                    value.checked_shl(amount)
                } else {
                    value.checked_shr(amount)
                };

                self.register_mut(destination)
                    .set_address(shifted.unwrap_or(0));
            }
            Operation::Logical {
                style,
                destination,
                source,
            } => {
                let dest = self.register(destination).address();
                let src = self.source_value(source);

                self.register_mut(destination).set_address(match style {
                    LogicalStyle::And => dest & src,
                    LogicalStyle::Or => dest | src,
                    LogicalStyle::Xor => dest ^ src,
                    LogicalStyle::Nand => !(dest & src),
                    LogicalStyle::Not => !dest,
                });
            }
            Operation::Compare(comparison) => self.compare(comparison),
            Operation::Branch {
                call,
                conditional,
                target,
            } => {
                let target = match target {
                    Target::Register(r) => self.register(r).address(),
                    Target::Immediate(address) => address,
                };

                if call {
                    let ip = self.register(INSTRUCTION_POINTER).address();
                    self.push_address(CALL_STACK_POINTER, ip)?;
                }

                if call || !conditional || self.condition() {
                    self.register_mut(INSTRUCTION_POINTER).set_address(target);
                }
            }
            Operation::Move {
                mask,
                destination,
                source,
            } => {
                let value = self.register(source).address() & mask.expand();
                self.register_mut(destination).set_address(value);
            }
            Operation::Set {
                destination, value, ..
            } => self.register_mut(destination).set_address(value),
            Operation::Swap {
                destination,
                source,
            } => self.registers_mut().swap(destination, source),
            Operation::Misc(misc) => self.misc(misc)?,
        }

        Ok(())
    }

    fn source_value(&self, source: Source) -> Address {
        match source {
            Source::Register(r) => self.register(r).address(),
            Source::Immediate { value, .. } => value,
        }
    }

    fn arithmetic(
        &mut self,
        style: ArithmeticStyle,
        destination: RegisterIndex,
        source: Source,
    ) -> Result<()> {
        let dest = self.register(destination).address();
        let src = self.source_value(source);

        let (target, value) = match style {
            ArithmeticStyle::Add => (destination, dest.wrapping_add(src)),
            ArithmeticStyle::Sub => (destination, dest.wrapping_sub(src)),
            ArithmeticStyle::Mul => (destination, dest.wrapping_mul(src)),
            ArithmeticStyle::Div => {
                let quotient = dest.checked_div(src).ok_or(Error::DivideByZero)?;
                (destination, quotient)
            }
            ArithmeticStyle::Rem => {
                let remainder = dest.checked_rem(src).ok_or(Error::DivideByZero)?;
                (destination, remainder)
            }
            ArithmeticStyle::Min => (VALUE_REGISTER, dest.min(src)),
            ArithmeticStyle::Max => (VALUE_REGISTER, dest.max(src)),
        };

        self.register_mut(target).set_address(value);

        Ok(())
    }

    fn compare(&mut self, comparison: Comparison) {
        match comparison {
            Comparison::Test {
                style,
                destination,
                source,
            } => {
                let dest = self.register(destination).address();
                let src = self.source_value(source);

                self.set_condition(match style {
                    CompareStyle::Equals => dest == src,
                    CompareStyle::NotEquals => dest != src,
                    CompareStyle::LessThan => dest < src,
                    CompareStyle::GreaterThan => dest > src,
                    CompareStyle::LessThanOrEqualTo => dest <= src,
                    CompareStyle::GreaterThanOrEqualTo => dest >= src,
                });
            }
            Comparison::MoveFromCondition(r) => {
                let value = if self.condition() { -1 } else { 0 };
                self.register_mut(r).set_integer(value);
            }
            Comparison::MoveToCondition(r) => {
                let truth = self.register(r).truth();
                self.set_condition(truth);
            }
        }
    }

    fn misc(&mut self, misc: Misc) -> Result<()> {
        match misc {
            Misc::Return => {
                let address = self.pop_address(CALL_STACK_POINTER)?;
                self.register_mut(INSTRUCTION_POINTER).set_address(address);
            }
            Misc::Terminate => self.halt(),
            Misc::GetChar(r) => match self.console_mut().get_char()? {
                Some(byte) => self.register_mut(r).set_address(byte.into()),
                None => self.register_mut(r).set_integer(-1),
            },
            Misc::PutChar(r) => {
                let byte = self.register(r).address() as u8;
                self.console_mut().put_char(byte)?;
            }
        }

        Ok(())
    }

    fn memory_access(&mut self, access: MemoryAccess) -> Result<()> {
        match access {
            MemoryAccess::Load { mask, offset } => {
                let address = self.effective_address(offset);
                let lower = if mask.reads_lower() {
                    self.read_memory(address)?
                } else {
                    0
                };
                let upper = if mask.reads_upper() {
                    self.read_memory(address.wrapping_add(1))?
                } else {
                    0
                };

                self.register_mut(VALUE_REGISTER)
                    .set_address(Address::combine(lower, upper) & mask.expand());
            }
            MemoryAccess::Store { mask, offset } => self.store(mask, offset)?,
            MemoryAccess::Push { mask, register } => {
                let value = *self.register(register);

                if mask.reads_upper() {
                    self.push_word(STACK_POINTER, value.upper_half() & mask.upper_mask())?;
                }

                if mask.reads_lower() {
                    self.push_word(STACK_POINTER, value.lower_half() & mask.lower_mask())?;
                }
            }
            MemoryAccess::Pop { mask, register } => {
                if mask.reads_lower() {
                    let word = self.pop_word(STACK_POINTER)?;
                    self.register_mut(register)
                        .set_lower_half(word & mask.lower_mask());
                }

                if mask.reads_upper() {
                    let word = self.pop_word(STACK_POINTER)?;
                    self.register_mut(register)
                        .set_upper_half(word & mask.upper_mask());
                }
            }
        }

        Ok(())
    }

    fn effective_address(&self, offset: u8) -> Address {
        self.register(ADDRESS_REGISTER)
            .address()
            .wrapping_add(offset.into())
    }

    /// Store the value register, touching only the bytes `mask` selects.
    fn store(&mut self, mask: Bitmask, offset: u8) -> Result<()> {
        let address = self.effective_address(offset);
        let upper_address = address.wrapping_add(1);
        let value = *self.register(VALUE_REGISTER);

        match (mask.lower_mask(), mask.upper_mask()) {
            (0x0000, 0x0000) => {}
            (0xFFFF, 0x0000) => self.write_memory(address, value.lower_half())?,
            (0x0000, 0xFFFF) => self.write_memory(upper_address, value.upper_half())?,
            (0xFFFF, 0xFFFF) => {
                self.write_memory(address, value.lower_half())?;
                self.write_memory(upper_address, value.upper_half())?;
            }
            (lower_mask, upper_mask) => {
                if lower_mask != 0 {
                    let merged = merge(self.read_memory(address)?, value.lower_half(), lower_mask);
                    self.write_memory(address, merged)?;
                }

                if upper_mask != 0 {
                    let merged = merge(
                        self.read_memory(upper_address)?,
                        value.upper_half(),
                        upper_mask,
                    );
                    self.write_memory(upper_address, merged)?;
                }
            }
        }

        Ok(())
    }

    fn push_word(&mut self, stack: RegisterIndex, word: MemoryWord) -> Result<()> {
        self.register_mut(stack).decrement(1);
        let address = self.register(stack).address();

        self.write_memory(address, word)
    }

    fn pop_word(&mut self, stack: RegisterIndex) -> Result<MemoryWord> {
        let address = self.register(stack).address();
        let word = self.read_memory(address)?;
        self.register_mut(stack).increment(1);

        Ok(word)
    }

    /// Push a full address, upper half first so the lower half ends up on top.
    fn push_address(&mut self, stack: RegisterIndex, address: Address) -> Result<()> {
        self.push_word(stack, address.upper_half())?;
        self.push_word(stack, address.lower_half())
    }

    fn pop_address(&mut self, stack: RegisterIndex) -> Result<Address> {
        let lower = self.pop_word(stack)?;
        let upper = self.pop_word(stack)?;

        Ok(Address::combine(lower, upper))
    }
}

/// Replace the bits of `old` selected by `mask` with those of `new`.
fn merge(old: MemoryWord, new: MemoryWord, mask: MemoryWord) -> MemoryWord {
    (old & !mask) | (new & mask)
}
