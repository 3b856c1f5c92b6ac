//! Compress and decompress files with Huffman coding.
//!
//! ```bash
//! hzip --compress notes.txt notes.hz
//! hzip --decompress notes.hz notes.txt
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hufzip::{compress_stream, decompress_stream, Config, TrailerMode};

#[derive(Parser, Debug)]
#[command(name = "hzip")]
#[command(version)]
#[command(about = "Zip and unzip using Huffman coding", long_about = None)]
struct Args {
    /// File to compress
    #[arg(short, long, conflicts_with = "decompress", required_unless_present = "decompress")]
    compress: Option<PathBuf>,

    /// File to decompress
    #[arg(short, long)]
    decompress: Option<PathBuf>,

    /// File to write
    output: PathBuf,

    /// Write the final-byte count as `bits mod 8`, like older versions
    #[arg(long)]
    legacy_trailer: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Create `path` only once the whole result is known, so a failed run
/// leaves no partial output behind.
fn write_output(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(input) = args.compress {
        let trailer = if args.legacy_trailer {
            TrailerMode::Legacy
        } else {
            TrailerMode::Explicit
        };
        let config = Config::new().with_trailer(trailer);
        let reader = BufReader::new(File::open(&input)?);
        let mut packed = Vec::new();
        let stats = compress_stream(reader, &mut packed, &config)?;
        write_output(&args.output, &packed)?;
        info!(
            input = %input.display(),
            output = %args.output.display(),
            bytes_in = stats.input_len,
            bytes_out = stats.output_len,
            "The compression ratio is {:.4}",
            stats.ratio()
        );
    } else if let Some(input) = args.decompress {
        let reader = BufReader::new(File::open(&input)?);
        let mut unpacked = Vec::new();
        let stats = decompress_stream(reader, &mut unpacked)?;
        write_output(&args.output, &unpacked)?;
        info!(
            input = %input.display(),
            output = %args.output.display(),
            bytes_out = stats.output_len,
            "decompressed"
        );
    }

    Ok(())
}
