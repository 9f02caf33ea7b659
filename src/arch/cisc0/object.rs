//! Relocatable object records and the linker that turns them into a core

use crate::arch::cisc0::{Address, Console, Core, MemoryWord, RegisterIndex};
use crate::error::{Error, Result};
use crate::memory::LittleEndian;
use std::io;

/// Size of one record on disk.
pub const RECORD_SIZE: usize = 8;

/// One entry of an object file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Record {
    /// Request a memory of at least this many words.
    Capacity(Address),

    /// Install a value into a register.
    Register {
        index: RegisterIndex,
        value: Address,
    },

    /// Install a word into memory.
    Memory {
        address: Address,
        value: MemoryWord,
    },
}

impl Record {
    /// Decode one record from its on-disk `(section, address, value)` form.
    ///
    /// Register records are stored backwards: the register number lives in
    /// the low nibble of `value` and the register contents in `address`.
    pub fn from_parts(section: u16, address: u32, value: u16) -> Result<Self> {
        match section {
            0 => Ok(Record::Capacity(address)),
            1 => Ok(Record::Register {
                index: (value & 0x0F) as RegisterIndex,
                value: address,
            }),
            2 => Ok(Record::Memory { address, value }),
            section => Err(Error::IllegalSection(section)),
        }
    }

    pub fn into_parts(self) -> (u16, u32, u16) {
        match self {
            Record::Capacity(capacity) => (0, capacity, 0),
            Record::Register { index, value } => (1, value, (index & 0x0F).into()),
            Record::Memory { address, value } => (2, address, value),
        }
    }

    pub fn write<W: io::Write>(self, sink: &mut W) -> io::Result<()> {
        let (section, address, value) = self.into_parts();

        section.write_le(sink)?;
        address.write_le(sink)?;
        value.write_le(sink)
    }
}

/// Read every record out of an object file.
///
/// The file must be a whole number of records long.
pub fn read_records<R: io::Read>(source: &mut R) -> Result<Vec<Record>> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;

    let trailing = bytes.len() % RECORD_SIZE;
    if trailing != 0 {
        return Err(Error::UnalignedObject(trailing));
    }

    let mut records = Vec::with_capacity(bytes.len() / RECORD_SIZE);
    for mut chunk in bytes.chunks(RECORD_SIZE) {
        let section = u16::read_le(&mut chunk)?;
        let address = u32::read_le(&mut chunk)?;
        let value = u16::read_le(&mut chunk)?;

        records.push(Record::from_parts(section, address, value)?);
    }

    Ok(records)
}

pub fn write_records<W: io::Write>(sink: &mut W, records: &[Record]) -> Result<()> {
    for record in records {
        record.write(sink)?;
    }

    Ok(())
}

/// The memory capacity a set of records asks for.
///
/// This is the largest of `requested` and every capacity hint, rounded up to
/// a power of two.
pub fn link_capacity(records: &[Record], requested: Address) -> Result<Address> {
    let wanted = records
        .iter()
        .filter_map(|record| match record {
            Record::Capacity(capacity) => Some(*capacity),
            _ => None,
        })
        .fold(requested, Address::max);

    wanted
        .checked_next_power_of_two()
        .ok_or(Error::IllegalCapacity(wanted))
}

/// Build a core from a set of object records.
///
/// Installs are applied in order, so a later record overrides an earlier one
/// for the same register or address.
pub fn link<C: Console>(records: &[Record], requested: Address, console: C) -> Result<Core<C>> {
    let capacity = link_capacity(records, requested)?;
    let mut core = Core::with_console(capacity, console)?;

    for record in records {
        match *record {
            Record::Capacity(_) => {}
            Record::Register { index, value } => core.register_mut(index).set_address(value),
            Record::Memory { address, value } => core.write_memory(address, value)?,
        }
    }

    log::debug!(
        "Linked {} records into a core of {} words",
        records.len(),
        capacity
    );

    Ok(core)
}
