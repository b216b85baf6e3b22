//! Inverse of the block transform.

use serde::Serialize;

use crate::bitstream::{BitCursor, BitSink};
use crate::block::CompressedBlock;
use crate::{varlen, BitrunError};

/// Fields read from the front of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerHeader {
    pub run_length: usize,
    pub occurrences: Vec<usize>,
    /// Bits taken by the three VarLen sections.
    pub header_bits: usize,
}

impl ContainerHeader {
    pub fn parse(data: &[u8]) -> Result<Self, BitrunError> {
        let mut cursor = BitCursor::new(data);
        let run_length = varlen::read(&mut cursor)?;
        if run_length == 0 {
            return Err(BitrunError::Container("zero run length".into()));
        }
        let count = varlen::read(&mut cursor)?;
        if count == 0 {
            return Err(BitrunError::Container("no occurrences".into()));
        }
        // every position takes at least 8 bits
        if count > cursor.remaining() / 8 {
            return Err(BitrunError::Container("occurrence count exceeds container".into()));
        }
        let mut occurrences = Vec::with_capacity(count);
        for _ in 0..count {
            let p = varlen::read(&mut cursor)?;
            if let Some(&prev) = occurrences.last() {
                if p < prev + run_length {
                    return Err(BitrunError::Container("overlapping occurrences".into()));
                }
            } else if p < run_length {
                return Err(BitrunError::Container("occurrence overlaps anchor".into()));
            }
            occurrences.push(p);
        }
        Ok(Self {
            run_length,
            occurrences,
            header_bits: cursor.position(),
        })
    }

    /// Bit length of the original input for a container of `container_len`
    /// bytes. Inputs are whole bytes, so padding in the last container byte is
    /// resolved by rounding down to a multiple of eight.
    pub fn original_bit_len(&self, container_len: usize) -> Option<usize> {
        let removed = self.run_length.checked_mul(self.occurrences.len())?;
        let total = (container_len * 8).checked_sub(self.header_bits)?.checked_add(removed)?;
        Some(total / 8 * 8)
    }
}

/// Rebuild the original input from a container and its anchor offset.
pub fn restore_bytes(data: &[u8], anchor: usize) -> Result<Vec<u8>, BitrunError> {
    let header = ContainerHeader::parse(data)?;
    let length = header.run_length;
    let output_bits = header
        .original_bit_len(data.len())
        .ok_or_else(|| BitrunError::Container("container shorter than its header".into()))?;

    let first = header.occurrences[0];
    if anchor.checked_add(length).map_or(true, |end| end > first) {
        return Err(BitrunError::Container("anchor overlaps first occurrence".into()));
    }
    let last_end = header.occurrences[header.occurrences.len() - 1] + length;
    if last_end > output_bits {
        return Err(BitrunError::Container("occurrence past end of output".into()));
    }

    let mut body = BitCursor::new(data);
    body.set_position(header.header_bits);
    let literal: Vec<bool> = body.by_ref().take(length).collect();
    if literal.len() != length {
        return Err(BitrunError::Container("truncated literal run".into()));
    }

    let mut out = BitSink::with_capacity_bits(output_bits);
    out.copy_from(&mut body, anchor)?;
    literal.iter().for_each(|&b| out.write(b));
    let mut last = anchor + length;
    for &p in &header.occurrences {
        out.copy_from(&mut body, p - last)?;
        literal.iter().for_each(|&b| out.write(b));
        last = p + length;
    }
    out.copy_from(&mut body, output_bits - last)?;

    Ok(out.into_bytes())
}

pub fn restore(block: &CompressedBlock) -> Result<Vec<u8>, BitrunError> {
    restore_bytes(&block.data, block.anchor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_CONTAINER: [u8; 9] = [0x41, 0x07, 0x41, 0x81, 0xC1, 0x00, 0x00, 0x00, 0x00];

    #[test]
    fn parses_header_fields() {
        let h = ContainerHeader::parse(&ZERO_CONTAINER).unwrap();
        assert_eq!(h.run_length, 32);
        assert_eq!(h.occurrences, vec![32, 64, 96]);
        assert_eq!(h.header_bits, 40);
        assert_eq!(h.original_bit_len(ZERO_CONTAINER.len()), Some(128));
    }

    #[test]
    fn restores_zero_bytes() {
        assert_eq!(restore_bytes(&ZERO_CONTAINER, 0).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn rejects_bad_anchor() {
        assert!(restore_bytes(&ZERO_CONTAINER, 1).is_err());
    }

    #[test]
    fn rejects_truncated_container() {
        assert!(ContainerHeader::parse(&ZERO_CONTAINER[..3]).is_err());
        assert!(ContainerHeader::parse(&[]).is_err());
    }

    #[test]
    fn rejects_zero_fields() {
        // VarLen(0) as the run length
        assert!(ContainerHeader::parse(&[0x01, 0x03, 0x11]).is_err());
        // run length 1, count 0
        assert!(ContainerHeader::parse(&[0x03, 0x01, 0x11]).is_err());
    }
}
