//! Raw memory images

use crate::memory::{LittleEndian, Memory};
use num::Zero;
use std::io;

impl<W> Memory<W>
where
    W: Copy + Zero + LittleEndian,
{
    /// Overwrite the whole of memory from a little-endian word stream.
    ///
    /// Exactly `capacity` words are read. A stream that ends early fails with
    /// `UnexpectedEof`, leaving memory partially overwritten.
    pub fn install<R: io::Read>(&mut self, source: &mut R) -> io::Result<()> {
        for word in self.words_mut() {
            *word = W::read_le(source)?;
        }

        Ok(())
    }

    /// Write the whole of memory as a little-endian word stream.
    pub fn dump<O: io::Write>(&self, sink: &mut O) -> io::Result<()> {
        for word in self.words() {
            word.write_le(sink)?;
        }

        Ok(())
    }
}
