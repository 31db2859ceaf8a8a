//! Fixed-width packed storage words.
//!
//! A [`Word`] is a 32-byte storage unit holding one or more
//! byte-aligned sub-fields. Every write helper touches only the bytes
//! it is given; co-located sub-fields in the same word are left
//! bit-for-bit unchanged.

use std::fmt;
use std::ops::Range;

/// Width of one storage word in bytes.
pub const WORD_BYTES: usize = 32;

/// One packed 32-byte storage word.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Word([u8; WORD_BYTES]);

impl Word {
    /// The all-zero word.
    pub const ZERO: Word = Word([0u8; WORD_BYTES]);

    /// Raw bytes of the word.
    pub fn as_bytes(&self) -> &[u8; WORD_BYTES] {
        &self.0
    }

    /// Read the byte at `offset`.
    pub fn byte_at(&self, offset: usize) -> u8 {
        self.0[offset]
    }

    /// Write the byte at `offset`, leaving every other byte unchanged.
    pub fn set_byte(&mut self, offset: usize, value: u8) {
        self.0[offset] = value;
    }

    /// Read the bytes in `range`.
    pub fn bytes_at(&self, range: Range<usize>) -> &[u8] {
        &self.0[range]
    }

    /// Write `bytes` starting at `offset`, leaving every byte outside
    /// `offset..offset + bytes.len()` unchanged.
    pub fn set_bytes(&mut self, offset: usize, bytes: &[u8]) {
        self.0[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Read a little-endian `u64` starting at `offset`.
    pub fn u64_at(&self, offset: usize) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[offset..offset + 8]);
        u64::from_le_bytes(buf)
    }

    /// Write `value` as little-endian bytes starting at `offset`.
    pub fn set_u64(&mut self, offset: usize, value: u64) {
        self.set_bytes(offset, &value.to_le_bytes());
    }

    /// Zero the bytes in `range`, leaving the rest of the word intact.
    pub fn clear_range(&mut self, range: Range<usize>) {
        self.0[range].fill(0);
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_round_trip() {
        let mut word = Word::ZERO;
        word.set_u64(0, 0xdead_beef_cafe_f00d);
        assert_eq!(word.u64_at(0), 0xdead_beef_cafe_f00d);
    }

    #[test]
    fn test_set_byte_leaves_neighbors_untouched() {
        let mut word = Word::ZERO;
        word.set_bytes(0, &[0x11; WORD_BYTES]);
        word.set_byte(20, 0xff);

        assert_eq!(word.byte_at(20), 0xff);
        for offset in (0..WORD_BYTES).filter(|&o| o != 20) {
            assert_eq!(word.byte_at(offset), 0x11, "byte {} was corrupted", offset);
        }
    }

    #[test]
    fn test_set_u64_touches_exactly_eight_bytes() {
        let mut word = Word::ZERO;
        word.set_bytes(0, &[0xaa; WORD_BYTES]);
        word.set_u64(24, 7);

        assert_eq!(word.u64_at(24), 7);
        for offset in 0..24 {
            assert_eq!(word.byte_at(offset), 0xaa, "byte {} was corrupted", offset);
        }
    }

    #[test]
    fn test_clear_range_preserves_remainder() {
        let mut word = Word::ZERO;
        word.set_bytes(0, &[0x55; WORD_BYTES]);
        word.clear_range(0..24);

        assert_eq!(word.bytes_at(0..24), &[0u8; 24][..]);
        assert_eq!(word.bytes_at(24..32), &[0x55; 8][..]);
    }
}
