//! Input validation for pdf2images: make sure the path names a readable PDF.
//!
//! pdfium reports a missing file, a permissions problem and a non-PDF all as
//! one generic load failure. Checking existence, readability and the `%PDF`
//! magic bytes up front lets each case surface as its own error.

use crate::error::PixPdfError;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Leading bytes of every PDF file.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate that `path` exists, is readable and starts with `%PDF`.
pub fn validate_pdf(path: &Path) -> Result<(), PixPdfError> {
    if !path.is_file() {
        return Err(PixPdfError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(PixPdfError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(PixPdfError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    // Files shorter than four bytes are padded with zeros in the report.
    let mut magic = [0u8; 4];
    let mut filled = 0;
    while filled < magic.len() {
        match file.read(&mut magic[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(PixPdfError::CorruptPdf {
                    path: path.to_path_buf(),
                    detail: format!("could not read header: {e}"),
                })
            }
        }
    }

    if &magic != PDF_MAGIC {
        return Err(PixPdfError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }

    debug!("Validated input PDF: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = validate_pdf(&tmp.path().join("absent.pdf")).unwrap_err();
        assert!(matches!(err, PixPdfError::FileNotFound { .. }));
    }

    #[test]
    fn directory_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = validate_pdf(tmp.path()).unwrap_err();
        assert!(matches!(err, PixPdfError::FileNotFound { .. }));
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fake.pdf");
        std::fs::write(&path, b"GIF89a....").unwrap();

        match validate_pdf(&path).unwrap_err() {
            PixPdfError::NotAPdf { magic, .. } => assert_eq!(&magic, b"GIF8"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tiny.pdf");
        std::fs::write(&path, b"%P").unwrap();

        match validate_pdf(&path).unwrap_err() {
            PixPdfError::NotAPdf { magic, .. } => assert_eq!(magic, [b'%', b'P', 0, 0]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pdf_header_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ok.pdf");
        std::fs::write(&path, b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n").unwrap();
        validate_pdf(&path).unwrap();
    }
}
