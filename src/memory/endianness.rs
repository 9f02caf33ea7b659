//! Little-endian serialization of words

use std::io;

/// A word type with a fixed little-endian byte representation.
///
/// Binary images and object files store every multi-byte quantity this way.
pub trait LittleEndian: Sized {
    fn read_le<R: io::Read>(source: &mut R) -> io::Result<Self>;

    fn write_le<W: io::Write>(&self, sink: &mut W) -> io::Result<()>;
}

macro_rules! little_endian_impl {
    ($type:ty, $size:expr) => {
        impl LittleEndian for $type {
            fn read_le<R: io::Read>(source: &mut R) -> io::Result<Self> {
                let mut bytes = [0; $size];
                source.read_exact(&mut bytes)?;

                Ok(<$type>::from_le_bytes(bytes))
            }

            fn write_le<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
                sink.write_all(&self.to_le_bytes())
            }
        }
    };
}

little_endian_impl!(u16, 2);
little_endian_impl!(u32, 4);
