use std::fs;
use std::process::Command;

#[test]
fn invalid_extension_error() {
    let exe = env!("CARGO_BIN_EXE_decompressor");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, b"bad").unwrap();
    let out = dir.path().join("out.bin");
    let output = Command::new(exe)
        .args([input.to_str().unwrap(), out.to_str().unwrap()])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid file extension"));
}

#[test]
fn truncated_file_error() {
    let exe = env!("CARGO_BIN_EXE_decompressor");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.brun");
    fs::write(&input, b"baddata").unwrap();
    let out = dir.path().join("out.bin");
    let output = Command::new(exe)
        .args([input.to_str().unwrap(), out.to_str().unwrap()])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Verify the file is intact"));
}

#[test]
fn missing_input_error() {
    let exe = env!("CARGO_BIN_EXE_compressor");
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(exe)
        .args([
            dir.path().join("nope.bin").to_str().unwrap(),
            dir.path().join("o.brun").to_str().unwrap(),
        ])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Check that the file exists"));
}
