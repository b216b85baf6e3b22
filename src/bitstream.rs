//! Bit granular views over byte buffers.
//!
//! Bit `i` of a buffer lives in byte `i / 8` at position `i % 8`, counted
//! from the least significant bit. Every offset handled by the search and
//! the block transform is a bit offset; byte indices never leave this module.

use crate::BitrunError;

/// Read head over an immutable byte buffer, addressed by bit offset.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    data: &'a [u8],
    bit_len: usize,
    pos: usize,
}

impl<'a> BitCursor<'a> {
    /// Cursor over all `8 * data.len()` bits.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len() * 8,
            pos: 0,
        }
    }

    /// Cursor over the first `bit_len` bits only. `bit_len` is clamped to the
    /// bits actually present in `data`.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() * 8),
            pos: 0,
        }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Absolute seek. Seeking past the end is allowed; reads there yield
    /// nothing.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.bit_len
    }

    pub fn remaining(&self) -> usize {
        self.bit_len.saturating_sub(self.pos)
    }

    /// Bit at `offset` without moving the cursor. Panics when `offset` lies
    /// past the underlying buffer.
    #[inline]
    pub fn get(&self, offset: usize) -> bool {
        (self.data[offset >> 3] >> (offset & 7)) & 1 != 0
    }

    /// Read one bit, failing on end of input.
    pub fn read_bit(&mut self) -> Result<bool, BitrunError> {
        self.next()
            .ok_or_else(|| BitrunError::Container("unexpected end of container".into()))
    }
}

impl Iterator for BitCursor<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if !self.has_next() {
            return None;
        }
        let bit = self.get(self.pos);
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

/// Append-only bit builder over a buffer allocated once, zero-filled.
///
/// Writes past the capacity are dropped but still counted, so a caller that
/// compares [`BitSink::position`] with its declared size catches overruns.
#[derive(Debug, Clone)]
pub struct BitSink {
    data: Vec<u8>,
    pos: usize,
}

impl BitSink {
    /// Sink sized to hold `total_bits`, rounded up to whole bytes.
    pub fn with_capacity_bits(total_bits: usize) -> Self {
        Self {
            data: vec![0u8; total_bits.div_ceil(8)],
            pos: 0,
        }
    }

    #[inline]
    pub fn write(&mut self, bit: bool) {
        if bit {
            if let Some(byte) = self.data.get_mut(self.pos >> 3) {
                *byte |= 1 << (self.pos & 7);
            }
        }
        self.pos += 1;
    }

    /// Append the next `len` bits of `cursor`.
    pub fn copy_from(&mut self, cursor: &mut BitCursor<'_>, len: usize) -> Result<(), BitrunError> {
        for _ in 0..len {
            self.write(cursor.read_bit()?);
        }
        Ok(())
    }

    /// Number of bits written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn capacity_bits(&self) -> usize {
        self.data.len() * 8
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_least_significant_bit_first() {
        let data = [0b0000_0101u8, 0x80];
        let bits: Vec<bool> = BitCursor::new(&data).collect();
        assert_eq!(bits.len(), 16);
        assert!(bits[0]);
        assert!(!bits[1]);
        assert!(bits[2]);
        assert!(bits[15]);
        assert_eq!(bits.iter().filter(|b| **b).count(), 3);
    }

    #[test]
    fn seek_and_has_next() {
        let data = [0xF0u8];
        let mut c = BitCursor::new(&data);
        c.set_position(4);
        assert_eq!(c.next(), Some(true));
        c.set_position(7);
        assert!(c.has_next());
        assert_eq!(c.next(), Some(true));
        assert!(!c.has_next());
        assert_eq!(c.next(), None);
        assert!(c.read_bit().is_err());
    }

    #[test]
    fn limited_bit_len() {
        let data = [0xFFu8];
        let c = BitCursor::with_bit_len(&data, 2);
        assert_eq!(c.count(), 2);
        assert_eq!(BitCursor::with_bit_len(&data, 99).bit_len(), 8);
    }

    #[test]
    fn sink_writes_and_pads_with_zero() {
        let mut sink = BitSink::with_capacity_bits(10);
        assert_eq!(sink.capacity_bits(), 16);
        for bit in [true, false, true, true, false, false, false, false, false, true] {
            sink.write(bit);
        }
        assert_eq!(sink.position(), 10);
        assert_eq!(sink.into_bytes(), vec![0b0000_1101, 0b0000_0010]);
    }

    #[test]
    fn sink_counts_overrun_without_panicking() {
        let mut sink = BitSink::with_capacity_bits(8);
        for _ in 0..12 {
            sink.write(true);
        }
        assert_eq!(sink.position(), 12);
        assert_eq!(sink.into_bytes(), vec![0xFF]);
    }

    #[test]
    fn copy_between_streams() {
        let data = [0b1010_1100u8, 0b0000_0011];
        let mut cursor = BitCursor::new(&data);
        cursor.set_position(2);
        let mut sink = BitSink::with_capacity_bits(8);
        sink.copy_from(&mut cursor, 8).unwrap();
        assert_eq!(sink.into_bytes(), vec![0b1110_1011]);
    }
}
