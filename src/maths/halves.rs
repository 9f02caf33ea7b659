//! Little-endian assembly of wide values from narrower halves

/// A type which can be split into, and joined from, two halves of half its
/// width.
///
/// The lower half is the little end: `combine(lo, hi) == lo | hi << HALF`.
/// Wide types are built recursively, so a `u64` is two `u32`s, each of which
/// is two `u16`s, and so on down to bytes.
pub trait Halves: Sized {
    type Half;

    fn combine(lower: Self::Half, upper: Self::Half) -> Self;

    fn lower_half(self) -> Self::Half;

    fn upper_half(self) -> Self::Half;

    /// Replace the lower half, keeping the upper half.
    fn with_lower_half(self, lower: Self::Half) -> Self {
        let upper = self.upper_half();
        Self::combine(lower, upper)
    }

    /// Replace the upper half, keeping the lower half.
    fn with_upper_half(self, upper: Self::Half) -> Self {
        let lower = self.lower_half();
        Self::combine(lower, upper)
    }
}

macro_rules! halves_impl {
    ($whole:ty, $half:ty, $width:expr) => {
        impl Halves for $whole {
            type Half = $half;

            fn combine(lower: $half, upper: $half) -> Self {
                (lower as $whole) | ((upper as $whole) << $width)
            }

            fn lower_half(self) -> $half {
                self as $half
            }

            fn upper_half(self) -> $half {
                (self >> $width) as $half
            }
        }
    };
}

halves_impl!(u16, u8, 8);
halves_impl!(u32, u16, 16);
halves_impl!(u64, u32, 32);
