//! A single 32-bit register with an address mask

use crate::maths::Halves;

/// A 32-bit register readable either as an address or as a signed integer.
///
/// Every register carries a mask which is applied after each write. General
/// purpose registers keep the default all-ones mask; registers that hold
/// memory addresses are narrowed to the capacity of the memory they address,
/// so that they wrap instead of ever pointing outside of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Register {
    value: u32,
    mask: u32,
}

impl Default for Register {
    fn default() -> Self {
        Register {
            value: 0,
            mask: 0xFFFF_FFFF,
        }
    }
}

impl Register {
    pub fn address(&self) -> u32 {
        self.value
    }

    pub fn integer(&self) -> i32 {
        self.value as i32
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn set_address(&mut self, value: u32) {
        self.value = value & self.mask;
    }

    pub fn set_integer(&mut self, value: i32) {
        self.set_address(value as u32);
    }

    pub fn increment(&mut self, amount: u32) {
        self.set_address(self.value.wrapping_add(amount));
    }

    pub fn decrement(&mut self, amount: u32) {
        self.set_address(self.value.wrapping_sub(amount));
    }

    pub fn lower_half(&self) -> u16 {
        self.value.lower_half()
    }

    pub fn upper_half(&self) -> u16 {
        self.value.upper_half()
    }

    pub fn set_lower_half(&mut self, half: u16) {
        self.set_address(self.value.with_lower_half(half));
    }

    pub fn set_upper_half(&mut self, half: u16) {
        self.set_address(self.value.with_upper_half(half));
    }

    /// True if the register holds any nonzero value.
    pub fn truth(&self) -> bool {
        self.value != 0
    }

    /// Change the mask, reapplying it to the current value.
    pub fn set_mask(&mut self, mask: u32) {
        self.mask = mask;
        self.value &= mask;
    }
}
