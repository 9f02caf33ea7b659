//! Byte-granular masks

use crate::error::Error;
use crate::maths::Halves;
use std::convert::TryFrom;
use std::fmt;

/// Expansion of every nibble into a 32-bit byte mask.
///
/// Bit `n` of the nibble selects byte `n` of the value.
const EXPANDED: [u32; 16] = [
    0x0000_0000,
    0x0000_00FF,
    0x0000_FF00,
    0x0000_FFFF,
    0x00FF_0000,
    0x00FF_00FF,
    0x00FF_FF00,
    0x00FF_FFFF,
    0xFF00_0000,
    0xFF00_00FF,
    0xFF00_FF00,
    0xFF00_FFFF,
    0xFFFF_0000,
    0xFFFF_00FF,
    0xFFFF_FF00,
    0xFFFF_FFFF,
];

/// A four-bit mask where each bit gates one byte of a 32-bit value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bitmask(u8);

impl Bitmask {
    pub const NONE: Bitmask = Bitmask(0b0000);
    pub const LOWER: Bitmask = Bitmask(0b0011);
    pub const UPPER: Bitmask = Bitmask(0b1100);
    pub const FULL: Bitmask = Bitmask(0b1111);

    /// Construct a bitmask from the low four bits of an instruction field.
    pub fn from_nibble(nibble: u16) -> Self {
        Bitmask((nibble & 0x0F) as u8)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn expand(self) -> u32 {
        EXPANDED[self.0 as usize]
    }

    pub fn lower_mask(self) -> u16 {
        self.expand().lower_half()
    }

    pub fn upper_mask(self) -> u16 {
        self.expand().upper_half()
    }

    /// True if any byte of the lower half is selected.
    pub fn reads_lower(self) -> bool {
        self.lower_mask() != 0
    }

    /// True if any byte of the upper half is selected.
    pub fn reads_upper(self) -> bool {
        self.upper_mask() != 0
    }

    /// Number of immediate words an instruction with this mask carries.
    pub fn word_count(self) -> usize {
        self.reads_lower() as usize + self.reads_upper() as usize
    }
}

impl TryFrom<u8> for Bitmask {
    type Error = Error;

    fn try_from(nibble: u8) -> Result<Self, Self::Error> {
        if nibble > 0x0F {
            Err(Error::BadBitmaskIndex(nibble))
        } else {
            Ok(Bitmask(nibble))
        }
    }
}

impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}
