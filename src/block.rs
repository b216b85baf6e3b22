//! Block transform: serialize a candidate and the rest of the input into a
//! single container.
//!
//! ```text
//! VarLen(length) | VarLen(count) | count x VarLen(position)
//!   | literal run (length bits, read at the anchor)
//!   | bits before the anchor
//!   | gap bits before each occurrence
//!   | tail after the last occurrence
//! ```

use serde::{Deserialize, Serialize};

use crate::bitstream::{BitCursor, BitSink};
use crate::candidate::Candidate;
use crate::{varlen, BitrunError};

/// Output of one compression pass.
///
/// `data` is the wire container. The container does not record where the
/// anchor run was cut from, so `anchor` travels beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedBlock {
    pub data: Vec<u8>,
    /// Meaningful bits in `data`; the rest of the final byte is zero padding.
    pub bit_len: usize,
    /// Bit offset of the anchor run in the original input.
    pub anchor: usize,
}

impl CompressedBlock {
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Write `candidate` and the remainder of `input` into a container sized
/// exactly to the candidate's cost.
pub fn apply_transform(input: &[u8], candidate: &Candidate) -> Result<CompressedBlock, BitrunError> {
    let input_bits = input.len() * 8;
    if !candidate.is_viable() || !candidate.spans_disjoint() {
        return Err(BitrunError::Container("candidate is not a viable repeat".into()));
    }
    if let Some((_, end)) = candidate.spans().last() {
        if end > input_bits {
            return Err(BitrunError::Container("candidate runs past the input".into()));
        }
    }

    let declared = candidate.cost(input_bits);
    let mut sink = BitSink::with_capacity_bits(declared);
    let mut cursor = BitCursor::new(input);
    let length = candidate.length;

    varlen::write(&mut sink, length)?;
    varlen::write(&mut sink, candidate.occurrences.len())?;
    for &p in &candidate.occurrences {
        varlen::write(&mut sink, p)?;
    }

    cursor.set_position(candidate.start);
    sink.copy_from(&mut cursor, length)?;

    if candidate.start > 0 {
        cursor.set_position(0);
        sink.copy_from(&mut cursor, candidate.start)?;
    }

    let mut last = candidate.start + length;
    for &p in &candidate.occurrences {
        cursor.set_position(last);
        sink.copy_from(&mut cursor, p - last)?;
        last = p + length;
    }

    cursor.set_position(last);
    sink.copy_from(&mut cursor, input_bits - last)?;

    let written = sink.position();
    if written != declared {
        return Err(BitrunError::InternalInconsistency { declared, written });
    }

    Ok(CompressedBlock {
        data: sink.into_bytes(),
        bit_len: declared,
        anchor: candidate.start,
    })
}
