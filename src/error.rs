//! Error types for the pixpdf library.
//!
//! Both pipelines are run-to-completion: the first failure in listing,
//! decoding, rendering or writing aborts the whole conversion. There is
//! therefore a single fatal error type, [`PixPdfError`], returned from every
//! public entry point. [`PixPdfError::kind`] folds the variants back into the
//! four-way taxonomy callers actually branch on (not found / parse / decode /
//! write) plus configuration and engine failures.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pixpdf library.
#[derive(Debug, Error)]
pub enum PixPdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input folder does not exist or is not a directory.
    #[error("Input folder not found: '{path}'\nCheck the path exists and is a directory.")]
    DirectoryNotFound { path: PathBuf },

    /// The input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file or folder.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// pdfium returned an error for a specific page (1-indexed).
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── Image errors ──────────────────────────────────────────────────────
    /// A source image could not be decoded.
    #[error("Failed to decode image '{path}': {source}")]
    ImageDecodeFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A resized image could not be re-encoded as JPEG.
    #[error("Failed to encode JPEG: {source}")]
    ImageEncodeFailed {
        #[source]
        source: image::ImageError,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The output folder does not exist or is not a directory.
    #[error("Output folder not found: '{path}'\nCreate it first; pdf2images does not create folders.")]
    OutputDirNotFound { path: PathBuf },

    /// Could not create, write or rename an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// lopdf failed to serialise the assembled document.
    #[error("Failed to write PDF '{path}': {detail}")]
    PdfWriteFailed { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
pdf2images needs the pdfium shared library to render pages. You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (file or containing folder).\n\
  • Place libpdfium next to the pdf2images executable.\n\
  • Install it system-wide (e.g. /usr/local/lib) and run ldconfig.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`PixPdfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or unreadable input path.
    NotFound,
    /// Malformed or unreadable PDF.
    Parse,
    /// Malformed image bytes, or a codec failure.
    Decode,
    /// Output path missing or unwritable.
    Write,
    /// Rejected configuration.
    Config,
    /// The pdfium engine could not be loaded.
    Engine,
    Internal,
}

impl PixPdfError {
    /// Classify this error into the taxonomy callers branch on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PixPdfError::DirectoryNotFound { .. }
            | PixPdfError::FileNotFound { .. }
            | PixPdfError::PermissionDenied { .. } => ErrorKind::NotFound,
            PixPdfError::NotAPdf { .. }
            | PixPdfError::CorruptPdf { .. }
            | PixPdfError::PasswordRequired { .. }
            | PixPdfError::WrongPassword { .. }
            | PixPdfError::RasterisationFailed { .. } => ErrorKind::Parse,
            PixPdfError::ImageDecodeFailed { .. } | PixPdfError::ImageEncodeFailed { .. } => {
                ErrorKind::Decode
            }
            PixPdfError::OutputDirNotFound { .. }
            | PixPdfError::OutputWriteFailed { .. }
            | PixPdfError::PdfWriteFailed { .. } => ErrorKind::Write,
            PixPdfError::InvalidConfig(_) => ErrorKind::Config,
            PixPdfError::PdfiumBindingFailed(_) => ErrorKind::Engine,
            PixPdfError::Internal(_) => ErrorKind::Internal,
        }
    }
}
