//! Bounds-checked linear word memory

use crate::error::{Error, Result};
use num::Zero;

/// A flat array of words, addressed from zero.
///
/// The capacity is always a nonzero power of two, which lets address
/// registers wrap through `capacity - 1` instead of faulting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory<W> {
    words: Vec<W>,
}

impl<W> Memory<W>
where
    W: Copy + Zero,
{
    /// Allocate a zero-filled memory of `capacity` words.
    pub fn new(capacity: u32) -> Result<Self> {
        if !capacity.is_power_of_two() {
            return Err(Error::IllegalCapacity(capacity));
        }

        Ok(Memory {
            words: vec![W::zero(); capacity as usize],
        })
    }

    pub fn capacity(&self) -> u32 {
        self.words.len() as u32
    }

    /// The mask that confines an address register to this memory.
    pub fn mask(&self) -> u32 {
        self.capacity() - 1
    }

    pub fn load_word(&self, address: u32) -> Result<W> {
        self.words
            .get(address as usize)
            .copied()
            .ok_or(Error::IllegalAddress(address))
    }

    pub fn store_word(&mut self, address: u32, value: W) -> Result<()> {
        match self.words.get_mut(address as usize) {
            Some(word) => {
                *word = value;
                Ok(())
            }
            None => Err(Error::IllegalAddress(address)),
        }
    }

    pub fn words(&self) -> &[W] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [W] {
        &mut self.words
    }
}
