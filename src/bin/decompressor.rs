use bitrun::io_utils::{bitrun_cli_error, extension_error, has_archive_extension, io_cli_error};
use bitrun::logging::setup_logging;
use bitrun::Archive;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Restore a file from a .brun archive created by the compressor.
#[derive(Parser)]
struct Args {
    /// Input .brun file
    input: PathBuf,
    /// Output file path
    output: PathBuf,
}

fn main() {
    setup_logging("warn");
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if !has_archive_extension(&args.input) {
        return Err(extension_error(&args.input).into());
    }
    let data =
        fs::read(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let restored = Archive::from_bytes(&data)
        .and_then(|archive| archive.unpack())
        .map_err(|e| bitrun_cli_error("decompression failed", e))?;
    fs::write(&args.output, &restored)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;
    Ok(())
}
