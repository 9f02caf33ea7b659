//! Bit-level maths shared by the register bank, memory and instruction codec

mod bitmask;
mod bits;
mod halves;

pub use bitmask::Bitmask;
pub use bits::{decode_bits, encode_bits, Field};
pub use halves::Halves;
