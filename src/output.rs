//! Result types returned by the conversion entry points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Counters gathered over one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Images (images2pdf) or pages (pdf2images) processed.
    pub items: usize,
    /// Total size of the source image files; 0 for pdf2images.
    pub input_bytes: u64,
    /// Total size of all JPEG data produced.
    pub compressed_bytes: u64,
    /// Pages in the PDF that was written (images2pdf) or read (pdf2images).
    pub pages: usize,
    /// Wall-clock time of the whole run.
    pub total_duration_ms: u64,
}

/// Output of [`crate::images_to_pdf`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesToPdfOutput {
    /// The written PDF.
    pub output_path: PathBuf,
    /// Source images in the order they were placed.
    pub sources: Vec<PathBuf>,
    pub stats: ConversionStats,
}

/// Output of [`crate::pdf_to_images`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfToImagesOutput {
    /// Written images, in page order.
    pub files: Vec<PathBuf>,
    pub stats: ConversionStats,
}
