use anyhow::{Context, Result, bail};
use barcode_studio::config::StudioConfig;
use barcode_studio::tools::{describe_result, format_row, load_image};
use barcode_studio::{BarcodeStudio, Margins, QrErrorLevel, Symbology, highlight};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "barcodetool", version, about = "Generate, read and highlight barcodes")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a barcode as PNG (and optionally SVG)
    Generate {
        /// Symbology, e.g. QR_CODE, ean-13, code128
        #[arg(short, long)]
        format: Symbology,
        /// Content to encode
        content: String,
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
        /// Also write an SVG document here
        #[arg(long)]
        svg: Option<PathBuf>,
        /// JSON file with default settings
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        /// Margin on every side
        #[arg(long)]
        margin: Option<u32>,
        /// Do not print the label under linear symbols
        #[arg(long)]
        no_text: bool,
        #[arg(long)]
        font_size: Option<u32>,
        /// Encode as GS1 data
        #[arg(long)]
        gs1: bool,
        /// QR error correction level (L, M, Q, H)
        #[arg(long)]
        qr_level: Option<QrErrorLevel>,
        /// PDF417 error correction level (0-8)
        #[arg(long)]
        pdf417_level: Option<u8>,
        /// PDF417 compact mode
        #[arg(long)]
        compact: bool,
        /// Aztec error correction percentage
        #[arg(long)]
        aztec_percent: Option<u8>,
    },
    /// Read every barcode in an image
    Read {
        image: PathBuf,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw a box around one decoded barcode
    Highlight {
        image: PathBuf,
        /// Which result to highlight
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List supported symbologies
    Formats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let studio = BarcodeStudio::new();

    match cli.command {
        Command::Generate {
            format,
            content,
            output,
            svg,
            config,
            width,
            height,
            margin,
            no_text,
            font_size,
            gs1,
            qr_level,
            pdf417_level,
            compact,
            aztec_percent,
        } => {
            let config = match config {
                Some(path) => StudioConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => StudioConfig::default(),
            }
            .with_env_overrides();

            let mut options = config
                .options_for(format, content)
                .gs1(gs1)
                .pdf417_compact(compact);
            if width.is_some() || height.is_some() {
                options = options.size(
                    width.unwrap_or(config.width),
                    height.unwrap_or(config.height),
                );
            }
            if let Some(m) = margin {
                options = options.margins(Margins::uniform(m));
            }
            if no_text {
                options = options.show_text(false);
            }
            if let Some(size) = font_size {
                options = options.font_size(size);
            }
            if let Some(level) = qr_level {
                options = options.qr_error_level(level);
            }
            if let Some(level) = pdf417_level {
                options = options.pdf417_error_level(level);
            }
            if let Some(percent) = aztec_percent {
                options = options.aztec_error_percent(percent);
            }

            let barcode = studio.generate(&options)?;
            write_file(&output, &barcode.png)?;
            info!(
                path = %output.display(),
                width = barcode.width,
                height = barcode.height,
                "Wrote PNG"
            );
            if let Some(label) = &barcode.label {
                println!("Label: {label}");
            }
            if let Some(path) = svg {
                match &barcode.svg {
                    Some(doc) => {
                        write_file(&path, doc.as_bytes())?;
                        info!(path = %path.display(), "Wrote SVG");
                    }
                    None => eprintln!("SVG output unavailable for this barcode"),
                }
            }
        }
        Command::Read { image, json } => {
            let (bytes, content_type) = load_image(&image)?;
            let results = studio.read_barcodes(&bytes, content_type);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("Image: {}", image.display());
                println!("Found {} barcodes", results.len());
                for (i, result) in results.iter().enumerate() {
                    println!("  {}", describe_result(i, result));
                }
            }
        }
        Command::Highlight {
            image,
            index,
            output,
        } => {
            let (bytes, content_type) = load_image(&image)?;
            let results = studio.read_barcodes(&bytes, content_type);
            let Some(result) = results.get(index) else {
                bail!(
                    "No barcode #{index} in {} ({} found)",
                    image.display(),
                    results.len()
                );
            };
            write_file(&output, &highlight(&bytes, &result.points))?;
            println!("{}", describe_result(index, result));
        }
        Command::Formats => {
            for symbology in Symbology::ALL {
                println!("{}", format_row(symbology));
            }
        }
    }

    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
