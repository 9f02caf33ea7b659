//! The cisc0 core: machine state, the run loop and the host interface

use crate::arch::cisc0::{
    decode, Address, Bus, Console, MemoryWord, Operation, RegisterIndex, StdConsole,
    ADDRESS_REGISTERS, INSTRUCTION_POINTER,
};
use crate::error::{Error, Result};
use crate::memory::LittleEndian;
use crate::reg::{Register, RegisterFile, REGISTER_COUNT};
use std::io;

/// A single cisc0 processor and the memory it owns.
///
/// The core executes until it runs a `terminate` instruction or faults. Any
/// fault stops execution, and the address of the instruction that caused it
/// remains available from `instruction_address`.
pub struct Core<C = StdConsole> {
    registers: RegisterFile,
    memory: Bus,
    condition: bool,
    keep_executing: bool,
    console: C,
    instruction_address: Address,
}

impl Core<StdConsole> {
    /// Construct a core attached to standard input and output.
    pub fn new(capacity: Address) -> Result<Self> {
        Self::with_console(capacity, StdConsole)
    }
}

impl<C> Core<C>
where
    C: Console,
{
    pub fn with_console(capacity: Address, console: C) -> Result<Self> {
        let memory = Bus::new(capacity)?;
        let mut registers = RegisterFile::new();

        for index in ADDRESS_REGISTERS.iter() {
            registers.get_mut(*index).set_mask(memory.mask());
        }

        Ok(Core {
            registers,
            memory,
            condition: false,
            keep_executing: true,
            console,
            instruction_address: 0,
        })
    }

    pub fn capacity(&self) -> Address {
        self.memory.capacity()
    }

    pub fn keep_executing(&self) -> bool {
        self.keep_executing
    }

    pub(super) fn halt(&mut self) {
        self.keep_executing = false;
    }

    pub fn condition(&self) -> bool {
        self.condition
    }

    pub(super) fn set_condition(&mut self, condition: bool) {
        self.condition = condition;
    }

    /// Address of the instruction most recently fetched by `step`.
    pub fn instruction_address(&self) -> Address {
        self.instruction_address
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn register(&self, index: RegisterIndex) -> &Register {
        self.registers.get(index)
    }

    pub fn register_mut(&mut self, index: RegisterIndex) -> &mut Register {
        self.registers.get_mut(index)
    }

    pub(super) fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn memory(&self) -> &Bus {
        &self.memory
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Fetch the word at the instruction pointer and advance past it.
    pub fn next_word(&mut self) -> Result<MemoryWord> {
        let ip = self.registers.get_mut(INSTRUCTION_POINTER);
        let word = self.memory.load_word(ip.address())?;
        ip.increment(1);

        Ok(word)
    }

    /// Fetch, decode and execute exactly one instruction.
    ///
    /// Returns the operation that was executed. On failure the core stops
    /// executing and the error is handed back to the caller.
    pub fn step(&mut self) -> Result<Operation> {
        self.instruction_address = self.registers.get(INSTRUCTION_POINTER).address();

        let result = decode(|| self.next_word()).and_then(|op| {
            log::trace!("{:06X}: {}", self.instruction_address, op);
            self.execute(op).map(|_| op)
        });

        if let Err(ref e) = result {
            self.keep_executing = false;
            log::error!("Core fault at ${:06X}: {}", self.instruction_address, e);
        }

        result
    }

    /// Execute until the core terminates or faults.
    pub fn run(&mut self) -> Result<()> {
        while self.keep_executing {
            self.step()?;
        }

        Ok(())
    }

    /// Write a sequence of operations into memory starting at `start`.
    ///
    /// Returns the address immediately following the last instruction.
    pub fn write_operations(&mut self, start: Address, ops: &[Operation]) -> Result<Address> {
        let mut address = start;

        for op in ops {
            for word in op.encode()? {
                self.memory.store_word(address, word)?;
                address = address.wrapping_add(1);
            }
        }

        Ok(address)
    }

    pub fn read_memory(&self, address: Address) -> Result<MemoryWord> {
        self.memory.load_word(address)
    }

    pub fn write_memory(&mut self, address: Address, value: MemoryWord) -> Result<()> {
        self.memory.store_word(address, value)
    }

    fn checked_index(index: i64) -> Result<RegisterIndex> {
        if index < 0 || index >= REGISTER_COUNT as i64 {
            return Err(Error::IllegalRegisterIndex(index));
        }

        Ok(index as RegisterIndex)
    }

    /// Read a register by a host-supplied index, which must be in `0..16`.
    pub fn get_register(&self, index: i64) -> Result<Address> {
        Ok(self.register(Self::checked_index(index)?).address())
    }

    /// Write a register by a host-supplied index, which must be in `0..16`.
    pub fn set_register(&mut self, index: i64, value: Address) -> Result<()> {
        self.register_mut(Self::checked_index(index)?)
            .set_address(value);

        Ok(())
    }

    /// Replace the registers and memory with a binary image.
    ///
    /// The image is every register as a little-endian `u32`, then every word
    /// of memory as a little-endian `u16`. Register values are masked as they
    /// are installed.
    pub fn install<R: io::Read>(&mut self, source: &mut R) -> Result<()> {
        for index in 0..REGISTER_COUNT {
            let value = u32::read_le(source)?;
            self.registers.get_mut(index as RegisterIndex).set_address(value);
        }

        self.memory.install(source)?;
        log::debug!("Installed image of {} words", self.capacity());

        Ok(())
    }

    /// Write the registers and memory out as a binary image.
    pub fn dump<W: io::Write>(&self, sink: &mut W) -> Result<()> {
        for register in self.registers.iter() {
            register.address().write_le(sink)?;
        }

        self.memory.dump(sink)?;
        log::debug!("Dumped image of {} words", self.capacity());

        Ok(())
    }
}
