//! Masked bit-field extraction and insertion

use num_traits::PrimInt;
use std::mem::size_of;

/// The number of bits in a primitive integer type.
fn bit_width<T>() -> u32 {
    (size_of::<T>() * 8) as u32
}

/// Shift left, saturating to zero when the shift overflows the type.
fn shl_or_zero<T: PrimInt>(value: T, shift: u32) -> T {
    if shift == 0 {
        value
    } else if shift >= bit_width::<T>() {
        T::zero()
    } else {
        value << shift as usize
    }
}

/// Shift right, saturating to zero when the shift overflows the type.
///
/// Signed types are shifted logically so that a field never picks up the sign
/// bit of the word it was extracted from.
fn shr_or_zero<T: PrimInt>(value: T, shift: u32) -> T {
    if shift == 0 {
        value
    } else if shift >= bit_width::<T>() {
        T::zero()
    } else {
        value.unsigned_shr(shift)
    }
}

/// Extract a field from `value`: `(value & mask) >> shift`.
///
/// A zero mask always decodes to zero, and an all-ones mask with no shift
/// passes `value` through untouched.
pub fn decode_bits<T: PrimInt>(value: T, mask: T, shift: u32) -> T {
    if mask == T::zero() {
        T::zero()
    } else if mask == !T::zero() && shift == 0 {
        value
    } else {
        shr_or_zero(value & mask, shift)
    }
}

/// Insert `field` into `value`: `(value & !mask) | ((field << shift) & mask)`.
///
/// Bits of `field` that do not fit inside `mask` are discarded. A zero mask
/// returns `value` unchanged.
pub fn encode_bits<T: PrimInt>(value: T, field: T, mask: T, shift: u32) -> T {
    if mask == T::zero() {
        value
    } else if mask == !T::zero() && shift == 0 {
        field
    } else {
        (value & !mask) | (shl_or_zero(field, shift) & mask)
    }
}

/// One field of an instruction word.
///
/// Instruction layouts are written as tables of `Field` constants, so all the
/// constructors here are `const`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    mask: u16,
    shift: u32,
}

impl Field {
    pub const fn new(mask: u16, shift: u32) -> Self {
        Field { mask, shift }
    }

    pub fn mask(self) -> u16 {
        self.mask
    }

    pub fn shift(self) -> u32 {
        self.shift
    }

    pub fn decode(self, word: u16) -> u16 {
        decode_bits(word, self.mask, self.shift)
    }

    pub fn encode(self, word: u16, field: u16) -> u16 {
        encode_bits(word, field, self.mask, self.shift)
    }

    /// Decode a single-bit field as a flag.
    pub fn is_set(self, word: u16) -> bool {
        self.decode(word) != 0
    }

    pub fn encode_flag(self, word: u16, flag: bool) -> u16 {
        self.encode(word, flag as u16)
    }
}
