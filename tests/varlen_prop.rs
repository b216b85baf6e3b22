use bitrun::varlen::{self, encoded_width, MAX_VALUE};
use bitrun::{BitCursor, BitSink};
use quickcheck::quickcheck;

fn roundtrip(x: usize) -> (usize, usize) {
    let mut sink = BitSink::with_capacity_bits(32);
    varlen::write(&mut sink, x).unwrap();
    let written = sink.position();
    let bytes = sink.into_bytes();
    (varlen::read(&mut BitCursor::new(&bytes)).unwrap(), written)
}

quickcheck! {
    fn varlen_roundtrip(x: u32) -> bool {
        let x = (x as u64 % (MAX_VALUE + 1)) as usize;
        let (decoded, written) = roundtrip(x);
        decoded == x && written == encoded_width(x)
    }

    fn narrow_values_take_one_byte(x: u8) -> bool {
        let x = (x & 0x7F) as usize;
        let (decoded, written) = roundtrip(x);
        decoded == x && written == 8
    }

    fn width_is_monotonic(a: u32, b: u32) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        encoded_width(lo as usize) <= encoded_width(hi as usize)
    }
}

#[test]
fn medium_value_200() {
    let mut sink = BitSink::with_capacity_bits(16);
    varlen::write(&mut sink, 200).unwrap();
    let bytes = sink.into_bytes();
    let mut cursor = BitCursor::new(&bytes);
    // prefix 01
    assert!(!cursor.read_bit().unwrap());
    assert!(cursor.read_bit().unwrap());
    let payload: Vec<bool> = cursor.by_ref().take(14).collect();
    let value = payload
        .iter()
        .enumerate()
        .fold(0usize, |acc, (k, &b)| acc | (b as usize) << k);
    assert_eq!(value, 200);
    assert_eq!(varlen::read(&mut BitCursor::new(&bytes)).unwrap(), 200);
}

#[test]
fn out_of_range_is_rejected() {
    let mut sink = BitSink::with_capacity_bits(32);
    assert!(matches!(
        varlen::write(&mut sink, MAX_VALUE as usize + 1),
        Err(bitrun::BitrunError::EncodingRangeExceeded(_))
    ));
}
