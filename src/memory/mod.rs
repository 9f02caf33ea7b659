//! Word-addressed memory and its binary image format.

mod endianness;
mod image;
mod region;

pub use endianness::LittleEndian;
pub use region::Memory;
