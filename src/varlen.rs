//! VarLen integer codec.
//!
//! A value is written as a unary width prefix (zeros terminated by a one)
//! followed by a fixed payload, least significant payload bit first:
//!
//! ```text
//! narrow  1                    7 payload bits   8 total
//! medium  01                  14 payload bits  16 total
//! wide    001                 21 payload bits  24 total
//! widest  0001                28 payload bits  32 total
//! ```
//!
//! Each class is selected when the value fits its payload, so every value up
//! to [`MAX_VALUE`] survives a round trip.

use crate::bitstream::{BitCursor, BitSink};
use crate::BitrunError;

/// Largest encodable value.
pub const MAX_VALUE: u64 = (1 << 28) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Narrow,
    Medium,
    Wide,
    Widest,
}

impl WidthClass {
    const ALL: [WidthClass; 4] = [
        WidthClass::Narrow,
        WidthClass::Medium,
        WidthClass::Wide,
        WidthClass::Widest,
    ];

    /// Smallest class whose payload holds `x`.
    pub fn for_value(x: u64) -> Result<Self, BitrunError> {
        Self::ALL
            .into_iter()
            .find(|class| x < 1u64 << class.payload_bits())
            .ok_or(BitrunError::EncodingRangeExceeded(x))
    }

    /// Number of prefix bits, including the terminating one.
    pub fn prefix_bits(self) -> usize {
        match self {
            WidthClass::Narrow => 1,
            WidthClass::Medium => 2,
            WidthClass::Wide => 3,
            WidthClass::Widest => 4,
        }
    }

    pub fn payload_bits(self) -> usize {
        self.prefix_bits() * 7
    }

    pub fn total_bits(self) -> usize {
        self.prefix_bits() * 8
    }
}

/// Encoded width of `x` in bits.
///
/// Values above [`MAX_VALUE`] report the widest width; callers that encode
/// them get [`BitrunError::EncodingRangeExceeded`] from [`write`].
#[inline]
pub fn encoded_width(x: usize) -> usize {
    WidthClass::for_value(x as u64)
        .unwrap_or(WidthClass::Widest)
        .total_bits()
}

pub fn write(sink: &mut BitSink, x: usize) -> Result<(), BitrunError> {
    let class = WidthClass::for_value(x as u64)?;
    for _ in 1..class.prefix_bits() {
        sink.write(false);
    }
    sink.write(true);
    for k in 0..class.payload_bits() {
        sink.write((x >> k) & 1 != 0);
    }
    Ok(())
}

pub fn read(cursor: &mut BitCursor<'_>) -> Result<usize, BitrunError> {
    let mut prefix = 1;
    while !cursor.read_bit()? {
        prefix += 1;
        if prefix > WidthClass::Widest.prefix_bits() {
            return Err(BitrunError::Container("invalid VarLen prefix".into()));
        }
    }
    let mut x = 0usize;
    for k in 0..prefix * 7 {
        if cursor.read_bit()? {
            x |= 1 << k;
        }
    }
    Ok(x)
}
