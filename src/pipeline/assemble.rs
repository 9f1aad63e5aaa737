//! PDF assembly: flow compressed JPEGs onto fixed-size pages.
//!
//! ## Layout
//!
//! Every image becomes one fixed-size element (500×500 pt by default). The
//! page is inset by a margin and the resulting frame by a small padding;
//! elements are stacked top-down inside the frame, each centred
//! horizontally, and a new page starts whenever the next element does not
//! fit in the height left. An element wider than the frame overflows it
//! equally on both sides. With the defaults (Letter, 72 pt margin, 6 pt
//! padding) the frame is 456×636 pt, so exactly one element lands on each
//! page, with its lower-left corner at (56, 214).
//!
//! ## Writing
//!
//! The JPEG bytes are embedded untouched as `DCTDecode` image XObjects and
//! drawn scaled to the element box. The document is serialised in memory,
//! written to a temp file beside the destination and renamed into place,
//! so a failed run leaves no output file behind.

use crate::config::ImagesToPdfConfig;
use crate::error::PixPdfError;
use crate::pipeline::compress::CompressedImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Slack for floating-point comparisons when fitting elements, in points.
const FIT_EPSILON: f32 = 1e-6;

/// Where an element is drawn on its page, in points from the lower-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One element of a planned page: which image, drawn where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedElement {
    /// Position of the image in the ordered input sequence.
    pub index: usize,
    pub placement: Placement,
}

/// The full page plan for a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub page_width: f32,
    pub page_height: f32,
    /// Pages in order; a page with no elements is a blank page.
    pub pages: Vec<Vec<PlacedElement>>,
}

impl DocumentPlan {
    /// Number of elements across all pages.
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

/// Top-down single-column flow layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    page_width: f32,
    page_height: f32,
    frame_left: f32,
    frame_bottom: f32,
    frame_width: f32,
    frame_height: f32,
    element_width: f32,
    element_height: f32,
}

impl FlowLayout {
    pub fn from_config(config: &ImagesToPdfConfig) -> Self {
        let (page_width, page_height) = config.page_size.dimensions();
        let (frame_width, frame_height) = config.frame_size();
        let inset = config.margin + config.frame_padding;
        Self {
            page_width,
            page_height,
            frame_left: inset,
            frame_bottom: inset,
            frame_width,
            frame_height,
            element_width: config.element_width,
            element_height: config.element_height,
        }
    }

    /// Lay out `count` elements in order.
    ///
    /// Zero elements yield a single blank page so the output is always a
    /// valid, openable document. An element taller than the frame still
    /// gets a page of its own and overflows the bottom margin.
    pub fn plan(&self, count: usize) -> DocumentPlan {
        let frame_top = self.frame_bottom + self.frame_height;
        let x = self.frame_left + (self.frame_width - self.element_width) / 2.0;

        let mut pages: Vec<Vec<PlacedElement>> = vec![Vec::new()];
        let mut cursor = frame_top;

        for index in 0..count {
            let fits = cursor - self.element_height >= self.frame_bottom - FIT_EPSILON;
            let page_is_empty = pages.last().is_some_and(Vec::is_empty);
            if !fits && !page_is_empty {
                pages.push(Vec::new());
                cursor = frame_top;
            }

            let y = cursor - self.element_height;
            if let Some(page) = pages.last_mut() {
                page.push(PlacedElement {
                    index,
                    placement: Placement {
                        x,
                        y,
                        width: self.element_width,
                        height: self.element_height,
                    },
                });
            }
            cursor = y;
        }

        DocumentPlan {
            page_width: self.page_width,
            page_height: self.page_height,
            pages,
        }
    }
}

/// Serialise a planned document to disk.
pub trait PdfWriter {
    /// Write `plan` with the referenced `images` to `output`.
    ///
    /// Every [`PlacedElement::index`] in `plan` must be a valid index into
    /// `images`.
    fn write(
        &self,
        plan: &DocumentPlan,
        images: &[CompressedImage],
        output: &Path,
    ) -> Result<(), PixPdfError>;
}

/// [`PdfWriter`] that builds the document object-by-object with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfWriter;

impl LopdfWriter {
    /// Build the complete PDF byte stream.
    pub fn render(
        &self,
        plan: &DocumentPlan,
        images: &[CompressedImage],
    ) -> Result<Vec<u8>, String> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::with_capacity(plan.pages.len());

        for elements in &plan.pages {
            let mut xobjects = Dictionary::new();
            let mut operations = Vec::with_capacity(elements.len() * 4);

            for (slot, element) in elements.iter().enumerate() {
                let image = images.get(element.index).ok_or_else(|| {
                    format!(
                        "layout references image {} but only {} were compressed",
                        element.index,
                        images.len()
                    )
                })?;

                let image_id = doc.add_object(Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => image.width as i64,
                        "Height" => image.height as i64,
                        "ColorSpace" => image.color.pdf_color_space(),
                        "BitsPerComponent" => 8_i64,
                        "Filter" => "DCTDecode",
                    },
                    image.data.clone(),
                ));

                let name = format!("Im{slot}").into_bytes();
                xobjects.set(name.clone(), Object::Reference(image_id));

                let p = element.placement;
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        p.width.into(),
                        0_i64.into(),
                        0_i64.into(),
                        p.height.into(),
                        p.x.into(),
                        p.y.into(),
                    ],
                ));
                operations.push(Operation::new("Do", vec![Object::Name(name)]));
                operations.push(Operation::new("Q", vec![]));
            }

            let content = Content { operations }
                .encode()
                .map_err(|e| format!("content stream encoding failed: {e}"))?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0_i64.into(),
                    0_i64.into(),
                    plan.page_width.into(),
                    plan.page_height.into(),
                ],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => xobjects,
                },
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal(concat!("pixpdf ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| format!("serialisation failed: {e}"))?;
        Ok(buffer)
    }
}

impl PdfWriter for LopdfWriter {
    fn write(
        &self,
        plan: &DocumentPlan,
        images: &[CompressedImage],
        output: &Path,
    ) -> Result<(), PixPdfError> {
        let bytes = self
            .render(plan, images)
            .map_err(|detail| PixPdfError::PdfWriteFailed {
                path: output.to_path_buf(),
                detail,
            })?;
        debug!(
            "Serialised {} pages / {} images → {} bytes",
            plan.pages.len(),
            plan.element_count(),
            bytes.len()
        );

        write_atomically(output, &bytes)?;
        info!("Wrote {} ({} bytes)", output.display(), bytes.len());
        Ok(())
    }
}

/// Write `bytes` to a temp file next to `output`, then rename it over
/// `output`. The temp file is removed if any step fails.
pub fn write_atomically(output: &Path, bytes: &[u8]) -> Result<(), PixPdfError> {
    let write_err = |source| PixPdfError::OutputWriteFailed {
        path: output.to_path_buf(),
        source,
    };

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}
