//! # pixpdf
//!
//! Convert between a folder of images and a PDF, in both directions,
//! compressing every image on the way.
//!
//! ## Pipelines
//!
//! ```text
//! images2pdf
//!  ├─ 1. List      *.png / *.jpg in the folder, oldest first
//!  ├─ 2. Compress  fit into 1024×1024, JPEG q=60
//!  └─ 3. Assemble  one 500×500 pt element per Letter page, written atomically
//!
//! pdf2images
//!  ├─ 1. Validate  input exists and starts with %PDF
//!  ├─ 2. Render    every page via pdfium, in order
//!  ├─ 3. Compress  fit into 1024×1024, JPEG q=60
//!  └─ 4. Write     image_0.jpg, image_1.jpg, …
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixpdf::{images_to_pdf, pdf_to_images, ImagesToPdfConfig, PdfToImagesConfig};
//!
//! fn main() -> Result<(), pixpdf::PixPdfError> {
//!     let out = images_to_pdf("scans/", "scans.pdf", &ImagesToPdfConfig::default())?;
//!     eprintln!("{} images on {} pages", out.stats.items, out.stats.pages);
//!
//!     let out = pdf_to_images("scans.pdf", "pages/", &PdfToImagesConfig::default())?;
//!     eprintln!("wrote {} files", out.files.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `images2pdf` and `pdf2images` binaries (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! `pdf2images` needs the pdfium shared library at runtime; see [`engine`]
//! for where it is looked up. `images2pdf` is pure Rust.

// ── Modules ──────────────────────────────────────────────────────────────

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    CompressionSettings, ImagesToPdfConfig, ImagesToPdfConfigBuilder, ListingOrder, PageSize,
    PdfToImagesConfig, PdfToImagesConfigBuilder,
};
pub use convert::{images_to_pdf, images_to_pdf_with, pdf_to_images, pdf_to_images_with};
pub use error::{ErrorKind, PixPdfError};
pub use output::{ConversionStats, ImagesToPdfOutput, PdfToImagesOutput};
pub use pipeline::assemble::{LopdfWriter, PdfWriter};
pub use pipeline::compress::{CompressedImage, ImageCodec, JpegCodec};
pub use pipeline::render::{PdfReader, PdfiumReader, RenderOptions};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
