//! Progress-callback trait for per-item conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ImagesToPdfConfigBuilder::progress_callback`] or
//! [`crate::config::PdfToImagesConfigBuilder::progress_callback`] to receive
//! events as each image (or page) passes through the pipeline. An "item" is
//! one source image for `images2pdf` and one rendered page for `pdf2images`.
//!
//! # Example
//!
//! ```rust
//! use pixpdf::{ConversionProgressCallback, ImagesToPdfConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     done: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_item_complete(&self, index: usize, total: usize, bytes: usize) {
//!         self.done.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("item {}/{} → {} bytes", index + 1, total, bytes);
//!     }
//! }
//!
//! let config = ImagesToPdfConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { done: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by a conversion pipeline as it processes each item.
///
/// The pipelines are sequential, so events arrive strictly in item order.
/// The trait is still `Send + Sync` so a single callback can be shared with
/// a progress-bar thread. All methods default to no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once, after the inputs have been enumerated.
    ///
    /// # Arguments
    /// * `total`: number of items that will be processed
    fn on_conversion_start(&self, total: usize) {
        let _ = total;
    }

    /// Called when an item has been compressed (and, for `pdf2images`,
    /// written to disk).
    ///
    /// # Arguments
    /// * `index`: 0-based position of the item in the ordered sequence
    /// * `total`: total items
    /// * `bytes`: size of the compressed JPEG produced for the item
    fn on_item_complete(&self, index: usize, total: usize, bytes: usize) {
        let _ = (index, total, bytes);
    }

    /// Called once after the output has been written.
    fn on_conversion_complete(&self, total: usize) {
        let _ = total;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in the config structs.
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
