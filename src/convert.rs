//! Conversion entry points.
//!
//! Each direction has two forms. [`images_to_pdf`] and [`pdf_to_images`]
//! wire in the real backends (`image` JPEG codec, `lopdf` writer, pdfium
//! renderer). The `*_with` variants take the backends as trait objects so
//! the pipeline logic can run against fakes.
//!
//! Both pipelines are strictly sequential and fail fast: the first error
//! aborts the run and is returned as-is.

use crate::config::{ImagesToPdfConfig, PdfToImagesConfig};
use crate::error::PixPdfError;
use crate::output::{ConversionStats, ImagesToPdfOutput, PdfToImagesOutput};
use crate::pipeline::assemble::{FlowLayout, LopdfWriter, PdfWriter};
use crate::pipeline::compress::{ImageCodec, JpegCodec};
use crate::pipeline::render::{PdfReader, PdfiumReader, RenderOptions};
use crate::pipeline::write::FileWriter;
use crate::pipeline::{input, listing};
use crate::progress::{ConversionProgressCallback, NoopProgressCallback};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Collect the images in `input_dir` into a single PDF at `output_pdf`.
///
/// # Errors
/// - [`PixPdfError::DirectoryNotFound`] if `input_dir` is missing
/// - [`PixPdfError::ImageDecodeFailed`] if any selected file is not an image
/// - [`PixPdfError::OutputWriteFailed`] if `output_pdf` cannot be written
///
/// No output file is created when any step fails.
pub fn images_to_pdf(
    input_dir: impl AsRef<Path>,
    output_pdf: impl AsRef<Path>,
    config: &ImagesToPdfConfig,
) -> Result<ImagesToPdfOutput, PixPdfError> {
    let codec = JpegCodec::new(config.compression);
    images_to_pdf_with(input_dir, output_pdf, config, &codec, &LopdfWriter)
}

/// [`images_to_pdf`] with explicit codec and writer backends.
pub fn images_to_pdf_with(
    input_dir: impl AsRef<Path>,
    output_pdf: impl AsRef<Path>,
    config: &ImagesToPdfConfig,
    codec: &dyn ImageCodec,
    writer: &dyn PdfWriter,
) -> Result<ImagesToPdfOutput, PixPdfError> {
    let total_start = Instant::now();
    let input_dir = input_dir.as_ref();
    let output_pdf = output_pdf.as_ref();
    let progress = progress_of(config.progress_callback.as_deref());
    info!(
        "Collecting images from {} → {}",
        input_dir.display(),
        output_pdf.display()
    );

    // ── Step 1: List and order inputs ────────────────────────────────────
    let listed = listing::list_images(input_dir, &config.extensions, config.order)?;
    let total = listed.len();
    if total == 0 {
        warn!(
            "No images matching {:?} in {}; writing a single blank page",
            config.extensions,
            input_dir.display()
        );
    }
    progress.on_conversion_start(total);

    // ── Step 2: Compress, one decoded image alive at a time ──────────────
    let mut compressed = Vec::with_capacity(total);
    let mut input_bytes = 0u64;
    for (index, item) in listed.iter().enumerate() {
        let jpeg = {
            let image = codec.decode_file(&item.path)?;
            codec.compress(&image)?
        };
        debug!(
            "[{}/{}] {} → {} bytes",
            index + 1,
            total,
            item.path.display(),
            jpeg.data.len()
        );
        input_bytes += item.size;
        progress.on_item_complete(index, total, jpeg.data.len());
        compressed.push(jpeg);
    }

    // ── Step 3: Lay out and write the document in one go ─────────────────
    let plan = FlowLayout::from_config(config).plan(compressed.len());
    writer.write(&plan, &compressed, output_pdf)?;

    let stats = ConversionStats {
        items: total,
        input_bytes,
        compressed_bytes: compressed.iter().map(|c| c.data.len() as u64).sum(),
        pages: plan.pages.len(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Conversion complete: {} images on {} pages, {}ms total",
        stats.items, stats.pages, stats.total_duration_ms
    );
    progress.on_conversion_complete(total);

    Ok(ImagesToPdfOutput {
        output_path: output_pdf.to_path_buf(),
        sources: listed.into_iter().map(|l| l.path).collect(),
        stats,
    })
}

/// Render every page of `input_pdf` into `output_dir` as
/// `image_0.jpg`, `image_1.jpg`, … in page order.
///
/// # Errors
/// - [`PixPdfError::FileNotFound`] if `input_pdf` is missing
/// - [`PixPdfError::NotAPdf`] / [`PixPdfError::CorruptPdf`] for malformed input
/// - [`PixPdfError::OutputDirNotFound`] if `output_dir` does not exist
/// - [`PixPdfError::PdfiumBindingFailed`] if pdfium cannot be loaded
///
/// Pages written before a failure are left in place.
pub fn pdf_to_images(
    input_pdf: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &PdfToImagesConfig,
) -> Result<PdfToImagesOutput, PixPdfError> {
    let input_pdf = input_pdf.as_ref();
    let output_dir = output_dir.as_ref();

    // Path problems are reported before pdfium is even looked for.
    input::validate_pdf(input_pdf)?;
    FileWriter::new(output_dir, config.file_prefix.as_str())?;

    let reader = PdfiumReader::new()?;
    let codec = JpegCodec::new(config.compression);
    pdf_to_images_with(input_pdf, output_dir, config, &reader, &codec)
}

/// [`pdf_to_images`] with explicit renderer and codec backends.
pub fn pdf_to_images_with(
    input_pdf: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &PdfToImagesConfig,
    reader: &dyn PdfReader,
    codec: &dyn ImageCodec,
) -> Result<PdfToImagesOutput, PixPdfError> {
    let total_start = Instant::now();
    let input_pdf = input_pdf.as_ref();
    let output_dir = output_dir.as_ref();
    let progress = progress_of(config.progress_callback.as_deref());
    info!(
        "Extracting pages from {} → {}",
        input_pdf.display(),
        output_dir.display()
    );

    input::validate_pdf(input_pdf)?;
    let writer = FileWriter::new(output_dir, config.file_prefix.as_str())?;
    let options = RenderOptions::from_config(config);

    let mut files: Vec<PathBuf> = Vec::new();
    let mut compressed_bytes = 0u64;

    let pages = reader.render_pages(input_pdf, &options, &mut |index, total, page| {
        if index == 0 {
            progress.on_conversion_start(total);
        }
        let jpeg = codec.compress(&page)?;
        drop(page);

        let path = writer.write(index, &jpeg)?;
        compressed_bytes += jpeg.data.len() as u64;
        progress.on_item_complete(index, total, jpeg.data.len());
        files.push(path);
        Ok(())
    })?;

    if pages == 0 {
        warn!("{} has no pages; nothing written", input_pdf.display());
        progress.on_conversion_start(0);
    }

    let stats = ConversionStats {
        items: files.len(),
        input_bytes: 0,
        compressed_bytes,
        pages,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Conversion complete: {} pages written, {}ms total",
        stats.items, stats.total_duration_ms
    );
    progress.on_conversion_complete(pages);

    Ok(PdfToImagesOutput { files, stats })
}

fn progress_of(cb: Option<&dyn ConversionProgressCallback>) -> &dyn ConversionProgressCallback {
    cb.unwrap_or(&NoopProgressCallback)
}
