//! Configuration types for both conversion directions.
//!
//! Each utility is controlled through one struct built via its builder:
//! [`ImagesToPdfConfig`] for `images2pdf` and [`PdfToImagesConfig`] for
//! `pdf2images`. The JPEG settings they share live in
//! [`CompressionSettings`]. Defaults reproduce the reference behaviour
//! exactly: 1024×1024 bounding box, quality 60, US Letter pages with
//! 500×500 pt image elements.

use crate::error::PixPdfError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default longest-edge bound for compressed images, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// Default JPEG quality (1–100).
pub const DEFAULT_QUALITY: u8 = 60;

/// Resize and re-encode parameters shared by both utilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionSettings {
    /// Images wider than this are downscaled. Default: 1024.
    pub max_width: u32,
    /// Images taller than this are downscaled. Default: 1024.
    pub max_height: u32,
    /// JPEG quality, 1–100. Default: 60.
    pub quality: u8,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl CompressionSettings {
    fn validate(&self) -> Result<(), PixPdfError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(PixPdfError::InvalidConfig(format!(
                "Bounding box must be at least 1×1, got {}×{}",
                self.max_width, self.max_height
            )));
        }
        if self.quality == 0 || self.quality > 100 {
            return Err(PixPdfError::InvalidConfig(format!(
                "JPEG quality must be 1–100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Page size of the assembled PDF, in PostScript points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// US Letter, 8.5 × 11 in (612 × 792 pt). (default)
    #[default]
    Letter,
    /// US Legal, 8.5 × 14 in (612 × 1008 pt).
    Legal,
    /// ISO A4, 210 × 297 mm (≈ 595.28 × 841.89 pt).
    A4,
    /// Any other size.
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// `(width, height)` in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match *self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::A4 => (595.2756, 841.8898),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

/// Sort key for the images listed from the input folder.
///
/// Creation time is not universally available: some filesystems only
/// record modification time. [`ListingOrder::CreationTime`] therefore falls
/// back to the modification time when the platform reports no birth time.
/// Equal keys are always broken by file name so the order is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListingOrder {
    /// Oldest file first by birth time (falls back to mtime). (default)
    #[default]
    CreationTime,
    /// Oldest file first by modification time.
    ModificationTime,
    /// Lexicographic by file name.
    Name,
}

// ── images → PDF ─────────────────────────────────────────────────────────

/// Configuration for an images-to-PDF conversion.
///
/// # Example
/// ```rust
/// use pixpdf::{ImagesToPdfConfig, PageSize};
///
/// let config = ImagesToPdfConfig::builder()
///     .page_size(PageSize::A4)
///     .quality(75)
///     .build()
///     .unwrap();
/// assert_eq!(config.compression.quality, 75);
/// ```
#[derive(Clone)]
pub struct ImagesToPdfConfig {
    /// JPEG resize/encode settings applied to every source image.
    pub compression: CompressionSettings,

    /// Page size of the output document. Default: Letter.
    pub page_size: PageSize,

    /// Width of every placed image element, in points. Default: 500.
    pub element_width: f32,

    /// Height of every placed image element, in points. Default: 500.
    ///
    /// Images are drawn stretched to this box regardless of their own
    /// aspect ratio.
    pub element_height: f32,

    /// Page margin on every side, in points. Default: 72 (one inch).
    pub margin: f32,

    /// Inner padding of the layout frame, in points. Default: 6.
    pub frame_padding: f32,

    /// Sort key for the listed images. Default: creation time.
    pub order: ListingOrder,

    /// Case-sensitive file-name suffixes that select images.
    /// Default: `.png`, `.jpg`.
    pub extensions: Vec<String>,

    /// Optional per-item progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ImagesToPdfConfig {
    fn default() -> Self {
        Self {
            compression: CompressionSettings::default(),
            page_size: PageSize::default(),
            element_width: 500.0,
            element_height: 500.0,
            margin: 72.0,
            frame_padding: 6.0,
            order: ListingOrder::default(),
            extensions: vec![".png".to_string(), ".jpg".to_string()],
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ImagesToPdfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagesToPdfConfig")
            .field("compression", &self.compression)
            .field("page_size", &self.page_size)
            .field("element_width", &self.element_width)
            .field("element_height", &self.element_height)
            .field("margin", &self.margin)
            .field("frame_padding", &self.frame_padding)
            .field("order", &self.order)
            .field("extensions", &self.extensions)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ImagesToPdfConfig {
    /// Create a new builder for `ImagesToPdfConfig`.
    pub fn builder() -> ImagesToPdfConfigBuilder {
        ImagesToPdfConfigBuilder {
            config: Self::default(),
        }
    }

    /// Usable frame `(width, height)` after margins and padding.
    pub fn frame_size(&self) -> (f32, f32) {
        let (w, h) = self.page_size.dimensions();
        let inset = 2.0 * (self.margin + self.frame_padding);
        (w - inset, h - inset)
    }
}

/// Builder for [`ImagesToPdfConfig`].
#[derive(Debug)]
pub struct ImagesToPdfConfigBuilder {
    config: ImagesToPdfConfig,
}

impl ImagesToPdfConfigBuilder {
    pub fn compression(mut self, settings: CompressionSettings) -> Self {
        self.config.compression = settings;
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.config.compression.quality = quality.clamp(1, 100);
        self
    }

    /// Square bounding box shorthand.
    pub fn max_dimension(mut self, px: u32) -> Self {
        self.config.compression.max_width = px;
        self.config.compression.max_height = px;
        self
    }

    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn element_size(mut self, width: f32, height: f32) -> Self {
        self.config.element_width = width;
        self.config.element_height = height;
        self
    }

    pub fn margin(mut self, pt: f32) -> Self {
        self.config.margin = pt.max(0.0);
        self
    }

    pub fn frame_padding(mut self, pt: f32) -> Self {
        self.config.frame_padding = pt.max(0.0);
        self
    }

    pub fn order(mut self, order: ListingOrder) -> Self {
        self.config.order = order;
        self
    }

    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ImagesToPdfConfig, PixPdfError> {
        let c = &self.config;
        c.compression.validate()?;

        if !(c.element_width > 0.0 && c.element_height > 0.0) {
            return Err(PixPdfError::InvalidConfig(format!(
                "Element size must be positive, got {}×{}",
                c.element_width, c.element_height
            )));
        }
        let (page_w, page_h) = c.page_size.dimensions();
        if !(page_w > 0.0 && page_h > 0.0) {
            return Err(PixPdfError::InvalidConfig(format!(
                "Page size must be positive, got {page_w}×{page_h}"
            )));
        }
        let (frame_w, frame_h) = c.frame_size();
        if frame_w <= 0.0 || frame_h <= 0.0 {
            return Err(PixPdfError::InvalidConfig(format!(
                "Margins and padding leave no room on a {page_w}×{page_h} page"
            )));
        }
        if c.extensions.is_empty() || c.extensions.iter().any(|e| e.is_empty()) {
            return Err(PixPdfError::InvalidConfig(
                "At least one non-empty image extension is required".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── PDF → images ─────────────────────────────────────────────────────────

/// Configuration for a PDF-to-images conversion.
#[derive(Clone)]
pub struct PdfToImagesConfig {
    /// JPEG resize/encode settings applied to every rendered page.
    pub compression: CompressionSettings,

    /// Rasterisation resolution. Range: 36–600. Default: 200.
    ///
    /// Pages are rendered at `dpi / 72` pixels per point and then
    /// downscaled into the bounding box, so a higher DPI only buys
    /// sharper downsampling, not larger output files.
    pub dpi: u32,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// File-name prefix of the written images. Default: `image_`.
    pub file_prefix: String,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for PdfToImagesConfig {
    fn default() -> Self {
        Self {
            compression: CompressionSettings::default(),
            dpi: 200,
            password: None,
            file_prefix: "image_".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PdfToImagesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfToImagesConfig")
            .field("compression", &self.compression)
            .field("dpi", &self.dpi)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("file_prefix", &self.file_prefix)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl PdfToImagesConfig {
    /// Create a new builder for `PdfToImagesConfig`.
    pub fn builder() -> PdfToImagesConfigBuilder {
        PdfToImagesConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PdfToImagesConfig`].
#[derive(Debug)]
pub struct PdfToImagesConfigBuilder {
    config: PdfToImagesConfig,
}

impl PdfToImagesConfigBuilder {
    pub fn compression(mut self, settings: CompressionSettings) -> Self {
        self.config.compression = settings;
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.config.compression.quality = quality.clamp(1, 100);
        self
    }

    /// Square bounding box shorthand.
    pub fn max_dimension(mut self, px: u32) -> Self {
        self.config.compression.max_width = px;
        self.config.compression.max_height = px;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(36, 600);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.file_prefix = prefix.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PdfToImagesConfig, PixPdfError> {
        let c = &self.config;
        c.compression.validate()?;
        if c.dpi < 36 || c.dpi > 600 {
            return Err(PixPdfError::InvalidConfig(format!(
                "DPI must be 36–600, got {}",
                c.dpi
            )));
        }
        if c.file_prefix.contains(['/', '\\']) {
            return Err(PixPdfError::InvalidConfig(format!(
                "File prefix must not contain path separators, got '{}'",
                c.file_prefix
            )));
        }
        Ok(self.config)
    }
}
