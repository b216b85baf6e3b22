use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Some((&anchor, rest)) = data.split_first() {
                let _ = bitrun::ContainerHeader::parse(rest);
                let _ = bitrun::restore_bytes(rest, anchor as usize);
            }
            if let Ok(archive) = bitrun::Archive::from_bytes(data) {
                let _ = archive.unpack();
            }
        });
    }
}
