//! Image compression: decode, downscale into a bounding box, re-encode JPEG.
//!
//! Both utilities funnel every image through [`ImageCodec::compress`]. The
//! resize preserves aspect ratio and never upscales; the result is always a
//! baseline JPEG, single-channel for grayscale sources and RGB otherwise.
//! Alpha is dropped since JPEG cannot carry it.

use crate::config::CompressionSettings;
use crate::error::PixPdfError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageReader};
use std::io;
use std::path::Path;
use tracing::debug;

/// Colour model of an encoded JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegColor {
    Gray,
    Rgb,
}

impl JpegColor {
    /// Matching PDF device colour space name.
    pub fn pdf_color_space(&self) -> &'static str {
        match self {
            JpegColor::Gray => "DeviceGray",
            JpegColor::Rgb => "DeviceRGB",
        }
    }
}

/// A JPEG-encoded image held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub color: JpegColor,
}

/// Decode and compress images.
///
/// The pipelines only talk to this trait so they can be exercised without a
/// real codec, and so the JPEG backend can be swapped.
pub trait ImageCodec {
    /// Decode the image stored at `path`, sniffing the format from content.
    fn decode_file(&self, path: &Path) -> Result<DynamicImage, PixPdfError>;

    /// Downscale `image` into the bounding box and encode it.
    fn compress(&self, image: &DynamicImage) -> Result<CompressedImage, PixPdfError>;
}

/// [`ImageCodec`] backed by the `image` crate's JPEG encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec {
    settings: CompressionSettings,
}

impl JpegCodec {
    pub fn new(settings: CompressionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompressionSettings {
        &self.settings
    }
}

impl ImageCodec for JpegCodec {
    fn decode_file(&self, path: &Path) -> Result<DynamicImage, PixPdfError> {
        let decode_err = |source| PixPdfError::ImageDecodeFailed {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PixPdfError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => PixPdfError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => decode_err(image::ImageError::IoError(e)),
        })?;

        let image = reader
            .with_guessed_format()
            .map_err(|e| decode_err(image::ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;

        debug!(
            "Decoded {} → {}x{} {:?}",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );
        Ok(image)
    }

    fn compress(&self, image: &DynamicImage) -> Result<CompressedImage, PixPdfError> {
        let (src_w, src_h) = (image.width(), image.height());
        let (w, h) = fit_within(
            src_w,
            src_h,
            self.settings.max_width,
            self.settings.max_height,
        );

        let resized;
        let image = if (w, h) != (src_w, src_h) {
            resized = image.resize_exact(w, h, FilterType::Lanczos3);
            &resized
        } else {
            image
        };

        let color = if is_grayscale(image.color()) {
            JpegColor::Gray
        } else {
            JpegColor::Rgb
        };

        let mut data = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut data, self.settings.quality);
        let encoded = match color {
            JpegColor::Gray => encoder.encode_image(&image.to_luma8()),
            JpegColor::Rgb => encoder.encode_image(&image.to_rgb8()),
        };
        encoded.map_err(|source| PixPdfError::ImageEncodeFailed { source })?;

        debug!(
            "Compressed {}x{} → {}x{} {:?} JPEG q={} ({} bytes)",
            src_w,
            src_h,
            w,
            h,
            color,
            self.settings.quality,
            data.len()
        );

        Ok(CompressedImage {
            data,
            width: w,
            height: h,
            color,
        })
    }
}

/// Largest size with the aspect ratio of `width × height` that fits inside
/// `max_width × max_height`. Sizes already inside the box are returned
/// unchanged; no edge collapses below one pixel.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (w, h)
}

fn is_grayscale(color: ColorType) -> bool {
    matches!(
        color,
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16
    )
}
