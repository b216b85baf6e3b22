use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            // keep the quadratic search cheap
            if data.len() > 64 {
                return;
            }
            match bitrun::compress(data) {
                Ok(block) => {
                    let restored = bitrun::decompress(&block).expect("own container must decode");
                    assert_eq!(restored, data);
                }
                Err(bitrun::BitrunError::NoRepeat) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        });
    }
}
