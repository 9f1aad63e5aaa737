//! PDF rasterisation: render every page, in order, via pdfium.
//!
//! Pages are streamed to a caller-supplied closure one at a time, so only a
//! single rendered bitmap is alive at once no matter how long the document
//! is. Rendering resolution is `dpi / 72` pixels per point, capped at
//! [`MAX_RENDER_EDGE`] on either axis so an oversized page (posters, CAD
//! sheets) cannot exhaust memory before the downscale step.

use crate::config::PdfToImagesConfig;
use crate::engine;
use crate::error::PixPdfError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Upper bound on either edge of a rendered page, in pixels.
pub const MAX_RENDER_EDGE: i32 = 10_000;

/// How to open and rasterise a document.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub dpi: u32,
    pub password: Option<String>,
}

impl RenderOptions {
    pub fn from_config(config: &PdfToImagesConfig) -> Self {
        Self {
            dpi: config.dpi,
            password: config.password.clone(),
        }
    }

    /// Pixels per PDF point.
    pub fn scale(&self) -> f32 {
        self.dpi as f32 / 72.0
    }
}

/// Callback receiving `(page_index_0based, total_pages, image)`.
pub type PageSink<'a> = dyn FnMut(usize, usize, DynamicImage) -> Result<(), PixPdfError> + 'a;

/// Rasterise PDF documents.
pub trait PdfReader {
    /// Render every page of `path` in page order, passing each to `on_page`
    /// before the next page is rendered. Returns the page count.
    ///
    /// An error from `on_page` stops rendering and is returned unchanged.
    fn render_pages(
        &self,
        path: &Path,
        options: &RenderOptions,
        on_page: &mut PageSink<'_>,
    ) -> Result<usize, PixPdfError>;
}

/// [`PdfReader`] backed by pdfium.
pub struct PdfiumReader {
    pdfium: Pdfium,
}

impl PdfiumReader {
    /// Bind pdfium (see [`crate::engine`]) and wrap it.
    pub fn new() -> Result<Self, PixPdfError> {
        Ok(Self {
            pdfium: engine::bind_pdfium()?,
        })
    }

    /// Wrap an already-bound pdfium instance.
    pub fn from_pdfium(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }
}

impl PdfReader for PdfiumReader {
    fn render_pages(
        &self,
        path: &Path,
        options: &RenderOptions,
        on_page: &mut PageSink<'_>,
    ) -> Result<usize, PixPdfError> {
        let password = options.password.as_deref();
        let document = self
            .pdfium
            .load_pdf_from_file(path, password)
            .map_err(|e| map_load_error(path, password.is_some(), e))?;

        let pages = document.pages();
        let total = pages.len() as usize;
        info!("PDF loaded: {} pages", total);

        let render_config = PdfRenderConfig::new()
            .scale_page_by_factor(options.scale())
            .set_maximum_width(MAX_RENDER_EDGE)
            .set_maximum_height(MAX_RENDER_EDGE);

        for (index, page) in pages.iter().enumerate() {
            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                PixPdfError::RasterisationFailed {
                    page: index + 1,
                    detail: format!("{:?}", e),
                }
            })?;

            let image = bitmap.as_image();
            debug!(
                "Rendered page {} → {}x{} px",
                index + 1,
                image.width(),
                image.height()
            );

            on_page(index, total, image)?;
        }

        Ok(total)
    }
}

fn map_load_error(path: &Path, had_password: bool, e: PdfiumError) -> PixPdfError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if had_password {
            PixPdfError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            PixPdfError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        PixPdfError::CorruptPdf {
            path: path.to_path_buf(),
            detail: err_str,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_follows_dpi() {
        let opts = RenderOptions {
            dpi: 144,
            password: None,
        };
        assert_eq!(opts.scale(), 2.0);
    }

    #[test]
    fn options_copy_config() {
        let config = PdfToImagesConfig::builder()
            .dpi(300)
            .password("secret")
            .build()
            .unwrap();
        let opts = RenderOptions::from_config(&config);
        assert_eq!(opts.dpi, 300);
        assert_eq!(opts.password.as_deref(), Some("secret"));
    }
}
