use bitrun::io_utils::{bitrun_cli_error, io_cli_error};
use bitrun::{restore_bytes, ContainerHeader};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Print the header of a raw single-pass container.
#[derive(Parser)]
struct Args {
    /// Raw container file
    input: PathBuf,
    /// Anchor bit offset, needed to restore the original
    #[arg(long)]
    anchor: Option<usize>,
    /// Write the restored original here (requires --anchor)
    #[arg(long, requires = "anchor")]
    output: Option<PathBuf>,
    /// Print the header as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let data =
        fs::read(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let header =
        ContainerHeader::parse(&data).map_err(|e| bitrun_cli_error("parsing container", e))?;
    let original_bits = header.original_bit_len(data.len());

    if args.json {
        let out_json = serde_json::json!({
            "container_bytes": data.len(),
            "header": header,
            "original_bits": original_bits,
        });
        println!("{}", serde_json::to_string_pretty(&out_json)?);
    } else {
        println!("run length  : {} bits", header.run_length);
        println!("occurrences : {}", header.occurrences.len());
        println!("header size : {} bits", header.header_bits);
        if let Some(bits) = original_bits {
            println!("original    : {} bits ({} bytes)", bits, bits / 8);
        }
        for (i, p) in header.occurrences.iter().enumerate() {
            println!("  [{i}] bit {p}");
        }
    }

    if let (Some(anchor), Some(path)) = (args.anchor, &args.output) {
        let restored =
            restore_bytes(&data, anchor).map_err(|e| bitrun_cli_error("restoring container", e))?;
        fs::write(path, &restored).map_err(|e| io_cli_error("writing output file", path, e))?;
    }
    Ok(())
}
