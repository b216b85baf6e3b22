//! Single-match bit-run compressor.
//!
//! One pass finds the repeated bit run whose removal gives the smallest
//! output, then writes a container holding the run once, the positions of its
//! repeats, and the input with every copy cut out. See [`block`] for the
//! container layout and [`search`] for how runs are chosen.

pub mod archive;
pub mod bitstream;
pub mod block;
pub mod candidate;
pub mod config;
pub mod decompress;
pub mod error;
pub mod io_utils;
pub mod logging;
pub mod passes;
pub mod search;
pub mod stats;
pub mod varlen;

pub use archive::Archive;
pub use bitstream::{BitCursor, BitSink};
pub use block::{apply_transform, CompressedBlock};
pub use candidate::Candidate;
pub use config::Config;
pub use decompress::{restore, restore_bytes, ContainerHeader};
pub use error::BitrunError;
pub use passes::{compress_passes, compress_passes_with, Layer, PassChain};
pub use search::{find_best_candidate, SearchStrategy};
pub use stats::SearchStats;

/// Compress `input` with one bisection search pass.
pub fn compress(input: &[u8]) -> Result<CompressedBlock, BitrunError> {
    compress_with(input, SearchStrategy::Bisection, &mut SearchStats::new())
}

/// Compress `input` with one pass of the given strategy, accumulating search
/// counters into `stats`.
///
/// Fails with [`BitrunError::NoRepeat`] when no tested run repeats, and with
/// [`BitrunError::EncodingRangeExceeded`] when bit offsets into `input` would
/// not fit a VarLen field.
pub fn compress_with(
    input: &[u8],
    strategy: SearchStrategy,
    stats: &mut SearchStats,
) -> Result<CompressedBlock, BitrunError> {
    let input_bits = input.len() as u64 * 8;
    if input_bits > varlen::MAX_VALUE {
        return Err(BitrunError::EncodingRangeExceeded(input_bits));
    }
    let cursor = BitCursor::new(input);
    let candidate = find_best_candidate(&cursor, strategy, stats).ok_or(BitrunError::NoRepeat)?;
    apply_transform(input, &candidate)
}

/// Inverse of [`compress`].
pub fn decompress(block: &CompressedBlock) -> Result<Vec<u8>, BitrunError> {
    restore(block)
}
