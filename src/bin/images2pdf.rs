//! CLI binary: collect a folder of images into one PDF.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ImagesToPdfConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use pixpdf::cli::{self, bold, dim, green, CliProgressCallback, OrderArg, PageSizeArg};
use pixpdf::config::{DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY};
use pixpdf::{images_to_pdf, ConversionProgressCallback, ImagesToPdfConfig, ProgressCallback};
use std::path::PathBuf;
use std::sync::Arc;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Every .png/.jpg in scans/, oldest first, one per Letter page
  images2pdf scans/ scans.pdf

  # A4 pages, files sorted by name, higher JPEG quality
  images2pdf --page-size a4 --order name --quality 85 photos/ album.pdf

  # Machine-readable summary
  images2pdf --json scans/ scans.pdf > stats.json

NOTES:
  Only files ending in .png or .jpg (case-sensitive) are picked up.
  Each image is shrunk to fit 1024×1024 px and re-encoded as JPEG before
  being placed, centred, in a 500×500 pt box on its own page.
  An empty folder yields a PDF with one blank page.

ENVIRONMENT VARIABLES:
  PIXPDF_QUALITY, PIXPDF_MAX_SIZE, PIXPDF_PAGE_SIZE, PIXPDF_ORDER,
  PIXPDF_JSON, PIXPDF_NO_PROGRESS, PIXPDF_VERBOSE, PIXPDF_QUIET
  RUST_LOG                Overrides the log filter (e.g. pixpdf=debug)
"#;

/// Collect the images in a folder into a single compressed PDF.
#[derive(Parser, Debug)]
#[command(
    name = "images2pdf",
    version,
    about = "Collect the images in a folder into a single compressed PDF",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Folder containing the .png / .jpg files.
    input_folder: PathBuf,

    /// PDF file to create (overwritten if present).
    output_pdf: PathBuf,

    /// JPEG quality (1–100).
    #[arg(long, env = "PIXPDF_QUALITY", default_value_t = DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Longest allowed image edge in pixels before placement.
    #[arg(long, env = "PIXPDF_MAX_SIZE", default_value_t = DEFAULT_MAX_DIMENSION,
          value_parser = clap::value_parser!(u32).range(1..))]
    max_size: u32,

    /// Page size of the output PDF.
    #[arg(long, env = "PIXPDF_PAGE_SIZE", value_enum, default_value = "letter")]
    page_size: PageSizeArg,

    /// Order in which images are placed.
    #[arg(long, env = "PIXPDF_ORDER", value_enum, default_value = "created")]
    order: OrderArg,

    /// Print the conversion result as JSON on stdout.
    #[arg(long, env = "PIXPDF_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PIXPDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PIXPDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PIXPDF_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli: Cli = cli::parse_args();

    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    cli::init_logging(cli.verbose, cli.quiet, show_progress);

    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic("image", "Listing images…");
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    let output = images_to_pdf(&cli.input_folder, &cli.output_pdf, &config)
        .with_context(|| format!("Failed to build {}", cli.output_pdf.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        eprintln!(
            "{}  {} images  {} pages  {}ms  →  {}",
            green("✔"),
            output.stats.items,
            output.stats.pages,
            output.stats.total_duration_ms,
            bold(&output.output_path.display().to_string()),
        );
        eprintln!(
            "   {} in  /  {} JPEG",
            dim(&indicatif::HumanBytes(output.stats.input_bytes).to_string()),
            dim(&indicatif::HumanBytes(output.stats.compressed_bytes).to_string()),
        );
    }

    Ok(())
}

/// Map CLI args to `ImagesToPdfConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ImagesToPdfConfig> {
    let mut builder = ImagesToPdfConfig::builder()
        .quality(cli.quality)
        .max_dimension(cli.max_size)
        .page_size(cli.page_size.into())
        .order(cli.order.into());

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
