use bitrun::io_utils::{bitrun_cli_error, io_cli_error, simple_cli_error};
use bitrun::logging::setup_logging;
use bitrun::{compress_passes_with, Archive, Config, SearchStrategy};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Instant;

/// Compress a file into a .brun archive.
#[derive(Parser)]
struct Args {
    /// Input file
    input: PathBuf,
    /// Output .brun file
    output: PathBuf,
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of passes
    #[arg(long)]
    passes: Option<usize>,
    /// Test every run length instead of bisecting
    #[arg(long)]
    exhaustive: bool,
    /// Keep passes that do not shrink the data
    #[arg(long)]
    allow_growth: bool,
    /// Print a JSON summary to stdout
    #[arg(long)]
    json: bool,
    /// Optional CSV output path for per-pass results
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Show a progress bar over passes
    #[arg(long)]
    progress: bool,
}

#[derive(Serialize)]
struct PassRecord {
    pass: usize,
    anchor: usize,
    input_len: usize,
    output_len: usize,
    cost_bits: usize,
}

fn main() {
    setup_logging("info");
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)
            .map_err(|e| bitrun_cli_error(&format!("loading config '{}'", path.display()), e))?,
        None => Config::default(),
    };
    if let Some(passes) = args.passes {
        config.max_passes = passes;
    }
    if args.exhaustive {
        config.strategy = SearchStrategy::Exhaustive;
    }
    if args.allow_growth {
        config.require_gain = false;
    }
    config
        .validate()
        .map_err(|e| bitrun_cli_error("invalid options", e))?;
    Ok(config)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let data =
        fs::read(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let start_time = Instant::now();

    let bar = if args.progress {
        let bar = ProgressBar::new(config.max_passes as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} passes {msg}")
                .map_err(|e| simple_cli_error(&e.to_string()))?,
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut records = Vec::new();
    let chain = compress_passes_with(&data, &config, |pass, layer| {
        bar.inc(1);
        bar.set_message(format!("{} bytes", layer.output_len));
        records.push(PassRecord {
            pass,
            anchor: layer.anchor,
            input_len: layer.input_len,
            output_len: layer.output_len,
            cost_bits: layer.cost_bits,
        });
    })
    .map_err(|e| bitrun_cli_error("compression failed", e))?;
    bar.finish_and_clear();

    let passes = chain.passes();
    let stats = chain.stats.clone();
    let archive = Archive::from_chain(&data, chain);
    let digest = hex::encode(archive.digest);
    let encoded = archive
        .to_bytes()
        .map_err(|e| bitrun_cli_error("encoding archive", e))?;
    fs::write(&args.output, &encoded)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;

    if let Some(path) = &args.csv {
        let f = File::create(path).map_err(|e| io_cli_error("creating csv", path, e))?;
        let mut wtr = csv::Writer::from_writer(f);
        for record in &records {
            wtr.serialize(record)?;
        }
        wtr.flush().map_err(|e| io_cli_error("writing csv", path, e))?;
    }

    let elapsed = start_time.elapsed();
    if args.json {
        let out_json = serde_json::json!({
            "input_bytes": data.len(),
            "archive_bytes": encoded.len(),
            "passes": passes,
            "digest": digest,
            "stats": stats,
            "elapsed_ms": elapsed.as_millis(),
        });
        println!("{}", serde_json::to_string_pretty(&out_json)?);
    } else {
        eprintln!(
            "Compressed {} bytes to {} bytes in {} passes ({:.2?})",
            data.len(),
            encoded.len(),
            passes,
            elapsed
        );
    }
    Ok(())
}
