//! CLI binary: render every page of a PDF into compressed JPEG files.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PdfToImagesConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use pixpdf::cli::{self, bold, cyan, dim, green, CliProgressCallback};
use pixpdf::config::{DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY};
use pixpdf::{pdf_to_images, ConversionProgressCallback, PdfToImagesConfig, ProgressCallback};
use std::path::PathBuf;
use std::sync::Arc;

const AFTER_HELP: &str = r#"EXAMPLES:
  # One image_N.jpg per page, N counting from 0
  pdf2images report.pdf pages/

  # Sharper rendering before the downscale
  pdf2images --dpi 300 drawing.pdf out/

  # Encrypted document
  pdf2images --password hunter2 locked.pdf out/

NOTES:
  The output folder must already exist; existing image_N.jpg files are
  overwritten. Each page is shrunk to fit 1024×1024 px, aspect ratio kept,
  and saved as JPEG quality 60 unless overridden.

ENVIRONMENT VARIABLES:
  PIXPDF_QUALITY, PIXPDF_MAX_SIZE, PIXPDF_DPI, PIXPDF_PASSWORD,
  PIXPDF_JSON, PIXPDF_NO_PROGRESS, PIXPDF_VERBOSE, PIXPDF_QUIET
  PDFIUM_LIB_PATH         Path to libpdfium (file or the folder holding it)
  RUST_LOG                Overrides the log filter (e.g. pixpdf=debug)

SETUP:
  pdf2images needs the pdfium shared library. Download a build from
  https://github.com/bblanchon/pdfium-binaries and either put it next to
  the executable, in the current directory, on the system library path,
  or point PDFIUM_LIB_PATH at it.
"#;

/// Render every page of a PDF into compressed JPEG files.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2images",
    version,
    about = "Render every page of a PDF into compressed JPEG files",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to read.
    input_pdf: PathBuf,

    /// Existing folder to write image_0.jpg, image_1.jpg, … into.
    output_folder: PathBuf,

    /// JPEG quality (1–100).
    #[arg(long, env = "PIXPDF_QUALITY", default_value_t = DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Longest allowed image edge in pixels.
    #[arg(long, env = "PIXPDF_MAX_SIZE", default_value_t = DEFAULT_MAX_DIMENSION,
          value_parser = clap::value_parser!(u32).range(1..))]
    max_size: u32,

    /// Rendering DPI (36–600).
    #[arg(long, env = "PIXPDF_DPI", default_value_t = 200,
          value_parser = clap::value_parser!(u32).range(36..=600))]
    dpi: u32,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PIXPDF_PASSWORD")]
    password: Option<String>,

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
        let cb = CliProgressCallback::new_dynamic("page", "Opening PDF…");
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    let output = pdf_to_images(&cli.input_pdf, &cli.output_folder, &config)
        .with_context(|| format!("Failed to convert {}", cli.input_pdf.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        let mark = if output.files.is_empty() {
            cyan("⚠")
        } else {
            green("✔")
        };
        eprintln!(
            "{}  {} pages  {}ms  →  {}",
            mark,
            output.files.len(),
            output.stats.total_duration_ms,
            bold(&cli.output_folder.display().to_string()),
        );
        eprintln!(
            "   {} JPEG written",
            dim(&indicatif::HumanBytes(output.stats.compressed_bytes).to_string()),
        );
    }

    Ok(())
}

/// Map CLI args to `PdfToImagesConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<PdfToImagesConfig> {
    let mut builder = PdfToImagesConfig::builder()
        .quality(cli.quality)
        .max_dimension(cli.max_size)
        .dpi(cli.dpi);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
