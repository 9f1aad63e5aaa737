//! Pipeline stages for both conversion directions.
//!
//! Each submodule implements exactly one transformation step, so each is
//! testable on its own and the concrete libraries (image codec, PDF writer,
//! PDF renderer) sit behind small traits.
//!
//! ## Data Flow
//!
//! ```text
//! images2pdf:  listing ──▶ compress ──▶ assemble
//!              (folder)    (JPEG)       (lopdf)
//!
//! pdf2images:  input ──▶ render ──▶ compress ──▶ write
//!              (%PDF)    (pdfium)   (JPEG)       (image_N.jpg)
//! ```
//!
//! 1. [`listing`]:  enumerate the input folder, filter by suffix, sort
//! 2. [`compress`]: downscale into the bounding box, re-encode as JPEG
//! 3. [`assemble`]: flow the JPEGs onto fixed-size pages and write the PDF
//! 4. [`input`]:    check the input PDF exists and carries the `%PDF` magic
//! 5. [`render`]:   rasterise every page in order via pdfium
//! 6. [`write`]:    write each JPEG as `image_{index}.jpg`

pub mod assemble;
pub mod compress;
pub mod input;
pub mod listing;
pub mod render;
pub mod write;
