//! Output writing for pdf2images: one JPEG file per page.
//!
//! Files are written as soon as each page is compressed. A run that fails
//! midway leaves the pages written so far in place; rerunning overwrites
//! them with identical names.

use crate::error::PixPdfError;
use crate::pipeline::compress::CompressedImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes `{prefix}{index}.jpg` files into an existing folder.
#[derive(Debug, Clone)]
pub struct FileWriter {
    dir: PathBuf,
    prefix: String,
}

impl FileWriter {
    /// Check that `dir` exists and is a folder. Folders are never created.
    pub fn new(dir: &Path, prefix: impl Into<String>) -> Result<Self, PixPdfError> {
        if !dir.is_dir() {
            return Err(PixPdfError::OutputDirNotFound {
                path: dir.to_path_buf(),
            });
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            prefix: prefix.into(),
        })
    }

    /// Path the image at `index` (0-based) is written to.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}{}.jpg", self.prefix, index))
    }

    /// Write `image` as the file for `index`, replacing any existing file.
    pub fn write(&self, index: usize, image: &CompressedImage) -> Result<PathBuf, PixPdfError> {
        let path = self.path_for(index);
        std::fs::write(&path, &image.data).map_err(|source| PixPdfError::OutputWriteFailed {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} ({} bytes)", path.display(), image.data.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compress::JpegColor;
    use tempfile::TempDir;

    fn jpeg(bytes: &[u8]) -> CompressedImage {
        CompressedImage {
            data: bytes.to_vec(),
            width: 1,
            height: 1,
            color: JpegColor::Gray,
        }
    }

    #[test]
    fn missing_folder_is_rejected_and_not_created() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("out");
        let err = FileWriter::new(&dir, "image_").unwrap_err();
        assert!(matches!(err, PixPdfError::OutputDirNotFound { .. }));
        assert!(!dir.exists());
    }

    #[test]
    fn files_are_named_by_zero_based_index() {
        let tmp = TempDir::new().unwrap();
        let writer = FileWriter::new(tmp.path(), "image_").unwrap();

        let p0 = writer.write(0, &jpeg(b"zero")).unwrap();
        let p10 = writer.write(10, &jpeg(b"ten")).unwrap();

        assert_eq!(p0, tmp.path().join("image_0.jpg"));
        assert_eq!(p10, tmp.path().join("image_10.jpg"));
        assert_eq!(std::fs::read(&p10).unwrap(), b"ten");
    }

    #[test]
    fn rewrite_replaces_contents() {
        let tmp = TempDir::new().unwrap();
        let writer = FileWriter::new(tmp.path(), "page-").unwrap();
        writer.write(0, &jpeg(b"first version, longer")).unwrap();
        let p = writer.write(0, &jpeg(b"second")).unwrap();
        assert_eq!(std::fs::read(p).unwrap(), b"second");
    }
}
