//! Sixteen-entry register file

use crate::reg::Register;

/// Number of registers in a register file.
pub const REGISTER_COUNT: usize = 16;

/// A bank of sixteen registers.
///
/// Register indices are four-bit fields pulled out of instruction words, so
/// lookups reduce the index modulo 16 and can never fail.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile([Register; REGISTER_COUNT]);

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: u8) -> &Register {
        &self.0[(index & 0x0F) as usize]
    }

    pub fn get_mut(&mut self, index: u8) -> &mut Register {
        &mut self.0[(index & 0x0F) as usize]
    }

    /// Exchange the contents of two registers.
    ///
    /// Masks stay with their slots, so a value moved into a masked register
    /// is narrowed on the way in.
    pub fn swap(&mut self, a: u8, b: u8) {
        let (a, b) = (a & 0x0F, b & 0x0F);
        if a == b {
            return;
        }

        let va = self.get(a).address();
        let vb = self.get(b).address();

        self.get_mut(a).set_address(vb);
        self.get_mut(b).set_address(va);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Register> {
        self.0.iter()
    }
}
