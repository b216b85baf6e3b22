use bitrun::{compress, compress_with, decompress, BitrunError, SearchStats, SearchStrategy};
use proptest::prelude::*;

fn with_repeat(prefix: Vec<u8>, run: Vec<u8>, gap: Vec<u8>) -> Vec<u8> {
    let mut out = prefix;
    out.extend_from_slice(&run);
    out.extend(gap);
    out.extend(run);
    out
}

proptest! {
    #[test]
    fn roundtrip_or_no_repeat(data in proptest::collection::vec(any::<u8>(), 0..24)) {
        match compress(&data) {
            Ok(block) => {
                prop_assert_eq!(decompress(&block).unwrap(), data);
            }
            Err(BitrunError::NoRepeat) => {}
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        }
    }

    #[test]
    fn repeated_runs_roundtrip(
        prefix in proptest::collection::vec(any::<u8>(), 0..6),
        run in proptest::collection::vec(any::<u8>(), 1..8),
        gap in proptest::collection::vec(any::<u8>(), 0..6),
    ) {
        let data = with_repeat(prefix, run, gap);
        match compress(&data) {
            Ok(block) => {
                prop_assert_eq!(block.data.len(), block.bit_len.div_ceil(8));
                prop_assert_eq!(decompress(&block).unwrap(), data);
            }
            Err(BitrunError::NoRepeat) => {}
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        }
    }

    #[test]
    fn exhaustive_roundtrip(data in proptest::collection::vec(any::<u8>(), 1..6)) {
        // every buffer of at least one byte holds a repeated single bit
        let block = compress_with(&data, SearchStrategy::Exhaustive, &mut SearchStats::new()).unwrap();
        prop_assert_eq!(decompress(&block).unwrap(), data);
    }

    #[test]
    fn constant_bytes_roundtrip(byte in any::<u8>(), len in 1usize..40) {
        let data = vec![byte; len];
        let block = compress(&data).unwrap();
        prop_assert_eq!(decompress(&block).unwrap(), data);
    }
}
