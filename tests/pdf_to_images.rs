//! Integration tests for the PDF → images pipeline.
//!
//! Most tests drive the pipeline through an in-memory `PdfReader` so they
//! run without the native pdfium library. The round-trip test at the end
//! needs pdfium and prints `SKIP` when it cannot be bound.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use pixpdf::pipeline::render::PageSink;
use pixpdf::{
    engine, images_to_pdf, pdf_to_images, pdf_to_images_with, ErrorKind, ImagesToPdfConfig,
    JpegCodec, ListingOrder, PdfReader, PdfToImagesConfig, PdfiumReader, PixPdfError,
    RenderOptions,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Hands out pre-built page bitmaps, optionally failing at one page.
struct FakeReader {
    pages: Vec<DynamicImage>,
    fail_at: Option<usize>,
    seen_options: Mutex<Option<RenderOptions>>,
}

impl FakeReader {
    fn new(pages: Vec<DynamicImage>) -> Self {
        Self {
            pages,
            fail_at: None,
            seen_options: Mutex::new(None),
        }
    }
}

impl PdfReader for FakeReader {
    fn render_pages(
        &self,
        _path: &Path,
        options: &RenderOptions,
        on_page: &mut PageSink<'_>,
    ) -> Result<usize, PixPdfError> {
        *self.seen_options.lock().unwrap() = Some(options.clone());
        let total = self.pages.len();
        for (index, page) in self.pages.iter().enumerate() {
            if self.fail_at == Some(index) {
                return Err(PixPdfError::RasterisationFailed {
                    page: index + 1,
                    detail: "synthetic failure".into(),
                });
            }
            on_page(index, total, page.clone())?;
        }
        Ok(total)
    }
}

fn rgb_page(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// A scratch folder holding `input.pdf` (valid magic only) and `out/`.
fn workspace() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let pdf = tmp.path().join("input.pdf");
    fs::write(&pdf, b"%PDF-1.7\n% synthetic\n").unwrap();
    let out = tmp.path().join("out");
    fs::create_dir(&out).unwrap();
    (tmp, pdf, out)
}

fn run(reader: &FakeReader, pdf: &Path, out: &Path) -> Result<pixpdf::PdfToImagesOutput, PixPdfError> {
    let config = PdfToImagesConfig::default();
    let codec = JpegCodec::new(config.compression);
    pdf_to_images_with(pdf, out, &config, reader, &codec)
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ── Naming and order ─────────────────────────────────────────────────────────

#[test]
fn every_page_becomes_a_numbered_jpeg() {
    let (_tmp, pdf, out) = workspace();
    let reader = FakeReader::new(vec![rgb_page(100, 200), rgb_page(300, 100), rgb_page(50, 50)]);

    let result = run(&reader, &pdf, &out).unwrap();

    assert_eq!(
        sorted_names(&out),
        ["image_0.jpg", "image_1.jpg", "image_2.jpg"]
    );
    assert_eq!(
        result.files,
        vec![
            out.join("image_0.jpg"),
            out.join("image_1.jpg"),
            out.join("image_2.jpg")
        ]
    );
    // Page order is preserved: each file carries its page's dimensions.
    assert_eq!(image::image_dimensions(&result.files[0]).unwrap(), (100, 200));
    assert_eq!(image::image_dimensions(&result.files[1]).unwrap(), (300, 100));
    assert_eq!(image::image_dimensions(&result.files[2]).unwrap(), (50, 50));
    assert_eq!(result.stats.pages, 3);
    assert_eq!(result.stats.items, 3);
    assert!(result.stats.compressed_bytes > 0);
}

#[test]
fn render_options_come_from_config() {
    let (_tmp, pdf, out) = workspace();
    let reader = FakeReader::new(vec![rgb_page(10, 10)]);
    let config = PdfToImagesConfig::builder()
        .dpi(300)
        .password("open sesame")
        .build()
        .unwrap();
    let codec = JpegCodec::new(config.compression);

    pdf_to_images_with(&pdf, &out, &config, &reader, &codec).unwrap();

    let seen = reader.seen_options.lock().unwrap().clone().unwrap();
    assert_eq!(seen.dpi, 300);
    assert_eq!(seen.password.as_deref(), Some("open sesame"));
}

// ── Compression ──────────────────────────────────────────────────────────────

#[test]
fn large_pages_fit_the_box_with_aspect_kept() {
    let (_tmp, pdf, out) = workspace();
    let reader = FakeReader::new(vec![rgb_page(1700, 2200), rgb_page(3000, 1000)]);

    let result = run(&reader, &pdf, &out).unwrap();

    let (w0, h0) = image::image_dimensions(&result.files[0]).unwrap();
    assert_eq!(h0, 1024);
    assert_eq!(w0, 791); // 1700 * 1024 / 2200 = 791.27
    assert_eq!(image::image_dimensions(&result.files[1]).unwrap(), (1024, 341));
}

#[test]
fn small_pages_are_not_upscaled() {
    let (_tmp, pdf, out) = workspace();
    let reader = FakeReader::new(vec![rgb_page(612, 792)]);

    let result = run(&reader, &pdf, &out).unwrap();
    assert_eq!(image::image_dimensions(&result.files[0]).unwrap(), (612, 792));
}

#[test]
fn grayscale_pages_stay_grayscale() {
    let (_tmp, pdf, out) = workspace();
    let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 40, Luma([90])));
    let reader = FakeReader::new(vec![gray]);

    let result = run(&reader, &pdf, &out).unwrap();
    let decoded = image::open(&result.files[0]).unwrap();
    assert_eq!(decoded.color(), image::ColorType::L8);
}

#[test]
fn rerun_is_byte_identical() {
    let (_tmp, pdf, out) = workspace();
    let reader = FakeReader::new(vec![rgb_page(1500, 900), rgb_page(200, 300)]);

    let first = run(&reader, &pdf, &out).unwrap();
    let before: Vec<Vec<u8>> = first.files.iter().map(|p| fs::read(p).unwrap()).collect();

    let second = run(&reader, &pdf, &out).unwrap();
    let after: Vec<Vec<u8>> = second.files.iter().map(|p| fs::read(p).unwrap()).collect();

    assert_eq!(before, after);
    assert_eq!(sorted_names(&out).len(), 2);
}

// ── Edge cases ───────────────────────────────────────────────────────────────

#[test]
fn zero_pages_write_nothing() {
    let (_tmp, pdf, out) = workspace();
    let reader = FakeReader::new(Vec::new());

    let result = run(&reader, &pdf, &out).unwrap();

    assert!(result.files.is_empty());
    assert_eq!(result.stats.pages, 0);
    assert!(sorted_names(&out).is_empty());
}

#[test]
fn failure_midway_keeps_earlier_pages() {
    let (_tmp, pdf, out) = workspace();
    let mut reader = FakeReader::new(vec![rgb_page(10, 10), rgb_page(20, 20), rgb_page(30, 30)]);
    reader.fail_at = Some(2);

    let err = run(&reader, &pdf, &out).unwrap_err();

    assert!(matches!(err, PixPdfError::RasterisationFailed { page: 3, .. }));
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(sorted_names(&out), ["image_0.jpg", "image_1.jpg"]);
}

// ── Input and output validation ──────────────────────────────────────────────

#[test]
fn missing_input_is_not_found() {
    let (tmp, _pdf, out) = workspace();
    let reader = FakeReader::new(vec![rgb_page(10, 10)]);

    let err = run(&reader, &tmp.path().join("absent.pdf"), &out).unwrap_err();

    assert!(matches!(err, PixPdfError::FileNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(sorted_names(&out).is_empty());
}

#[test]
fn non_pdf_input_is_rejected() {
    let (tmp, _pdf, out) = workspace();
    let fake = tmp.path().join("photo.pdf");
    fs::write(&fake, b"\x89PNG\r\n\x1a\n").unwrap();
    let reader = FakeReader::new(vec![rgb_page(10, 10)]);

    let err = run(&reader, &fake, &out).unwrap_err();

    match err {
        PixPdfError::NotAPdf { magic, .. } => assert_eq!(&magic, b"\x89PNG"),
        other => panic!("expected NotAPdf, got {other:?}"),
    }
    assert!(sorted_names(&out).is_empty());
}

#[test]
fn missing_output_folder_is_not_created() {
    let (tmp, pdf, _out) = workspace();
    let target = tmp.path().join("missing");
    let reader = FakeReader::new(vec![rgb_page(10, 10)]);

    let err = run(&reader, &pdf, &target).unwrap_err();

    assert!(matches!(err, PixPdfError::OutputDirNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Write);
    assert!(!target.exists());
}

#[test]
fn path_errors_are_reported_before_binding_pdfium() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    fs::create_dir(&out).unwrap();

    let err = pdf_to_images(
        tmp.path().join("absent.pdf"),
        &out,
        &PdfToImagesConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ── pdfium round trip ────────────────────────────────────────────────────────

/// Skip this test if the pdfium library cannot be bound on this host.
macro_rules! skip_without_pdfium {
    () => {{
        match engine::bind_pdfium() {
            Ok(pdfium) => pdfium,
            Err(e) => {
                println!("SKIP — pdfium unavailable: {e}");
                return;
            }
        }
    }};
}

#[test]
fn pdfium_round_trip_through_both_pipelines() {
    let pdfium = skip_without_pdfium!();

    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    fs::create_dir(&images).unwrap();
    RgbImage::from_pixel(300, 200, Rgb([10, 120, 200]))
        .save(images.join("a.png"))
        .unwrap();
    RgbImage::from_pixel(200, 300, Rgb([220, 30, 30]))
        .save(images.join("b.jpg"))
        .unwrap();

    let pdf = tmp.path().join("book.pdf");
    let cfg = ImagesToPdfConfig::builder()
        .order(ListingOrder::Name)
        .build()
        .unwrap();
    images_to_pdf(&images, &pdf, &cfg).unwrap();

    let out = tmp.path().join("pages");
    fs::create_dir(&out).unwrap();
    let config = PdfToImagesConfig::default();
    let reader = PdfiumReader::from_pdfium(pdfium);
    let codec = JpegCodec::new(config.compression);
    let result = pdf_to_images_with(&pdf, &out, &config, &reader, &codec).unwrap();

    assert_eq!(sorted_names(&out), ["image_0.jpg", "image_1.jpg"]);
    for file in &result.files {
        let (w, h) = image::image_dimensions(file).unwrap();
        assert!(w <= 1024 && h <= 1024, "{}: {w}x{h}", file.display());
        // Letter at 200 dpi is 1700x2200, so the height hits the bound.
        assert_eq!(h, 1024);
    }
}
