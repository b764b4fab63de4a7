//! # cyrconv CLI - Cyrillic Code Page to UTF-8 Converter
//!
//! Command-line front end for converting CP1251, KOI8-R and ISO-8859-5
//! files into UTF-8.

#[cfg(feature = "cli")]
use std::fs::File;
#[cfg(feature = "cli")]
use std::io::{self, BufRead, BufReader, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;

#[cfg(feature = "cli")]
use cyrconv::{ConversionStats, Converter, Encoding, Error as ConvertError};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features disabled. Enable with --features cli");
    std::process::exit(1);
}

/// cyrconv: convert legacy Cyrillic text files to UTF-8
#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cyrconv")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert a file to UTF-8
    Convert(ConvertArgs),

    /// List all supported encodings
    List,

    /// Display detailed information about an encoding
    Info(InfoArgs),
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ConvertArgs {
    /// Input file ("-" for stdin)
    input: PathBuf,

    /// Source encoding: CP1251, KOI8-R or ISO-8859-5 (exact, case-sensitive)
    encoding: String,

    /// Output file ("-" for stdout)
    output: PathBuf,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct InfoArgs {
    /// Encoding to describe
    encoding: String,

    /// Print the full 0x80-0xFF mapping table
    #[arg(long)]
    table: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct ConversionReport {
    success: bool,
    #[serde(flatten)]
    stats: ConversionStats,
    processing_time_ms: u64,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    match cli.command {
        Commands::Convert(ref args) => convert_command(args, &cli)?,
        Commands::List => list_command(&cli)?,
        Commands::Info(ref args) => info_command(args, &cli)?,
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

#[cfg(feature = "cli")]
fn convert_command(args: &ConvertArgs, cli: &Cli) -> Result<()> {
    let start_time = std::time::Instant::now();

    let stats = run_conversion(args).map_err(|e| match failure_context(&e, args) {
        Some(message) => anyhow::Error::new(e).context(message),
        None => anyhow::Error::new(e),
    })?;

    let processing_time = start_time.elapsed();
    log::info!(
        "Processed {} bytes -> {} bytes in {:?}",
        stats.bytes_read,
        stats.bytes_written,
        processing_time
    );

    match cli.format {
        OutputFormat::Json => {
            let report = ConversionReport {
                success: true,
                stats,
                processing_time_ms: processing_time.as_millis() as u64,
            };
            let json = serde_json::to_string_pretty(&report)?;
            // keep stdout clean when it carries the converted text
            if is_stdio(&args.output) {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
        }
        OutputFormat::Text => {
            if cli.verbose {
                eprintln!("✓ Conversion completed successfully");
            }
        }
    }

    Ok(())
}

/// Which precondition failed, phrased for the user
#[cfg(feature = "cli")]
fn failure_context(err: &ConvertError, args: &ConvertArgs) -> Option<String> {
    match err {
        ConvertError::InputUnavailable(_) => Some(format!(
            "Cannot open input file: {}",
            args.input.display()
        )),
        ConvertError::EmptyInput => Some(format!("Input file is empty: {}", args.input.display())),
        ConvertError::OutputUnavailable(_) => Some(format!(
            "Cannot write output file: {}",
            args.output.display()
        )),
        // already names the rejected encoding
        ConvertError::UnsupportedEncoding { .. } => None,
    }
}

#[cfg(feature = "cli")]
fn run_conversion(args: &ConvertArgs) -> cyrconv::Result<ConversionStats> {
    if !is_stdio(&args.input) && !is_stdio(&args.output) {
        return cyrconv::convert_file(&args.input, &args.encoding, &args.output);
    }

    let converter = Converter::from_name(&args.encoding)?;

    let mut reader: Box<dyn BufRead> = if is_stdio(&args.input) {
        log::debug!("Reading from stdin");
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input).map_err(ConvertError::InputUnavailable)?;
        Box::new(BufReader::new(file))
    };
    if reader
        .fill_buf()
        .map_err(ConvertError::InputUnavailable)?
        .is_empty()
    {
        return Err(ConvertError::EmptyInput);
    }

    let writer: Box<dyn Write> = if is_stdio(&args.output) {
        Box::new(io::stdout().lock())
    } else {
        log::debug!("Writing to: {}", args.output.display());
        Box::new(File::create(&args.output).map_err(ConvertError::OutputUnavailable)?)
    };

    converter.convert_stream(reader, writer)
}

#[cfg(feature = "cli")]
fn list_command(cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let encodings_info: Vec<_> = Encoding::ALL
                .iter()
                .map(|encoding| {
                    serde_json::json!({
                        "name": encoding.name(),
                        "description": encoding.description(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&encodings_info)?);
        }
        OutputFormat::Text => {
            println!("Supported Encodings ({} total):", Encoding::ALL.len());
            println!();
            for encoding in Encoding::ALL {
                println!("{:12} {}", encoding.name(), encoding.description());
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn info_command(args: &InfoArgs, cli: &Cli) -> Result<()> {
    let converter = Converter::from_name(&args.encoding)
        .with_context(|| format!("Cannot describe encoding '{}'", args.encoding))?;
    let encoding = converter.encoding();
    let undefined: Vec<u8> = (0x80..=0xFFu8)
        .filter(|&byte| converter.decode(byte) == cyrconv::tables::REPLACEMENT)
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let mut info = serde_json::json!({
                "name": encoding.name(),
                "description": encoding.description(),
                "undefined_bytes": undefined,
            });
            if args.table {
                let table: Vec<_> = (0x80..=0xFFu8)
                    .map(|byte| format!("U+{:04X}", converter.decode(byte)))
                    .collect();
                info["table"] = serde_json::json!(table);
            }
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Text => {
            println!("Encoding Information: {}", encoding.name());
            println!("Description: {}", encoding.description());
            if undefined.is_empty() {
                println!("Undefined bytes: none");
            } else {
                println!("Undefined bytes (mapped to U+FFFD): {:02X?}", undefined);
            }

            if args.table {
                println!();
                print_table(&converter);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_table(converter: &Converter) {
    for row in (0x80..=0xFFu8).step_by(8) {
        let cells: Vec<String> = (row..=row + 7)
            .map(|byte| {
                let ch = converter.decode_char(byte);
                let shown = if ch.is_control() { ' ' } else { ch };
                format!("{:02X} {} U+{:04X}", byte, shown, converter.decode(byte))
            })
            .collect();
        println!("  {}", cells.join("  "));
    }
}
