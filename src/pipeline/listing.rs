//! Input listing: the ordered set of images an images2pdf run consumes.
//!
//! Selection is a plain case-sensitive suffix match on the file name, so
//! `photo.PNG` and `photo.jpeg` are ignored with the default extensions.
//! Only regular files (after following symlinks) are listed.
//!
//! Ordering follows [`ListingOrder`]. Birth time is read through
//! [`std::fs::Metadata::created`], which is unsupported on some platforms
//! and filesystems; in that case the modification time stands in. Files with
//! equal keys are ordered by file name.

use crate::config::ListingOrder;
use crate::error::PixPdfError;
use std::cmp::Ordering;
use std::ffi::OsString;
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// A source image selected from the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedImage {
    pub path: PathBuf,
    /// File size in bytes at listing time.
    pub size: u64,
}

struct Candidate {
    image: ListedImage,
    name: OsString,
    key: Option<SystemTime>,
}

/// List the images in `dir` whose names end with one of `extensions`,
/// sorted by `order`.
///
/// # Errors
/// - [`PixPdfError::DirectoryNotFound`] if `dir` is missing or not a folder
/// - [`PixPdfError::PermissionDenied`] if the folder cannot be read
pub fn list_images(
    dir: &Path,
    extensions: &[String],
    order: ListingOrder,
) -> Result<Vec<ListedImage>, PixPdfError> {
    if !dir.is_dir() {
        return Err(PixPdfError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| map_read_error(dir, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| map_read_error(dir, e))?;
        let name = entry.file_name();
        if !has_extension(&name, extensions) {
            continue;
        }

        let path = entry.path();
        // `fs::metadata` follows symlinks, unlike `DirEntry::metadata`.
        let meta = std::fs::metadata(&path).map_err(|e| map_read_error(&path, e))?;
        if !meta.is_file() {
            debug!("Skipping non-file entry {}", path.display());
            continue;
        }

        candidates.push(Candidate {
            key: sort_key(&meta, order),
            image: ListedImage {
                path,
                size: meta.len(),
            },
            name,
        });
    }

    candidates.sort_by(compare_candidates);

    info!(
        "Listed {} images in {} (order: {:?})",
        candidates.len(),
        dir.display(),
        order
    );

    Ok(candidates.into_iter().map(|c| c.image).collect())
}

/// Case-sensitive suffix check on the raw file name.
pub fn has_extension(name: &std::ffi::OsStr, extensions: &[String]) -> bool {
    let name = name.to_string_lossy();
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

fn sort_key(meta: &Metadata, order: ListingOrder) -> Option<SystemTime> {
    match order {
        ListingOrder::CreationTime => meta.created().or_else(|_| meta.modified()).ok(),
        ListingOrder::ModificationTime => meta.modified().ok(),
        ListingOrder::Name => None,
    }
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    a.key.cmp(&b.key).then_with(|| a.name.cmp(&b.name))
}

fn map_read_error(path: &Path, e: io::Error) -> PixPdfError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => PixPdfError::PermissionDenied {
            path: path.to_path_buf(),
        },
        io::ErrorKind::NotFound => PixPdfError::DirectoryNotFound {
            path: path.to_path_buf(),
        },
        _ => PixPdfError::Internal(format!("Failed to list '{}': {}", path.display(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn default_exts() -> Vec<String> {
        vec![".png".to_string(), ".jpg".to_string()]
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, b"not really an image").unwrap();
        p
    }

    fn set_mtime(path: &Path, t: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(t)
            .unwrap();
    }

    fn names(list: &[ListedImage]) -> Vec<String> {
        list.iter()
            .map(|i| i.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn missing_directory_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = list_images(&tmp.path().join("nope"), &default_exts(), ListingOrder::Name)
            .unwrap_err();
        assert!(matches!(err, PixPdfError::DirectoryNotFound { .. }));
    }

    #[test]
    fn file_instead_of_directory_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let file = touch(tmp.path(), "a.png");
        let err = list_images(&file, &default_exts(), ListingOrder::Name).unwrap_err();
        assert!(matches!(err, PixPdfError::DirectoryNotFound { .. }));
    }

    #[test]
    fn suffix_filter_is_case_sensitive() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.png", "b.jpg", "c.PNG", "d.jpeg", "e.txt", "png", "f.png.bak"] {
            touch(tmp.path(), name);
        }
        std::fs::create_dir(tmp.path().join("folder.png")).unwrap();

        let list = list_images(tmp.path(), &default_exts(), ListingOrder::Name).unwrap();
        assert_eq!(names(&list), vec!["a.png", "b.jpg"]);
        assert_eq!(list[0].size, "not really an image".len() as u64);
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "readme.md");
        let list = list_images(tmp.path(), &default_exts(), ListingOrder::CreationTime).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn modification_time_orders_oldest_first() {
        let tmp = TempDir::new().unwrap();
        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let a = touch(tmp.path(), "a.png");
        let b = touch(tmp.path(), "b.jpg");
        let c = touch(tmp.path(), "c.png");
        set_mtime(&c, base);
        set_mtime(&a, base + Duration::from_secs(10));
        set_mtime(&b, base + Duration::from_secs(20));

        let list = list_images(tmp.path(), &default_exts(), ListingOrder::ModificationTime).unwrap();
        assert_eq!(names(&list), vec!["c.png", "a.png", "b.jpg"]);
    }

    #[test]
    fn equal_timestamps_break_ties_by_name() {
        let tmp = TempDir::new().unwrap();
        let t = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        for name in ["z.png", "m.jpg", "a.png"] {
            let p = touch(tmp.path(), name);
            set_mtime(&p, t);
        }

        let list = list_images(tmp.path(), &default_exts(), ListingOrder::ModificationTime).unwrap();
        assert_eq!(names(&list), vec!["a.png", "m.jpg", "z.png"]);
    }

    #[test]
    fn creation_time_follows_creation_sequence() {
        let tmp = TempDir::new().unwrap();
        for name in ["c.png", "a.jpg", "b.png"] {
            touch(tmp.path(), name);
            std::thread::sleep(Duration::from_millis(30));
        }

        let list = list_images(tmp.path(), &default_exts(), ListingOrder::CreationTime).unwrap();
        assert_eq!(names(&list), vec!["c.png", "a.jpg", "b.png"]);
    }

    #[test]
    fn custom_extensions_are_honoured() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.png", "b.jpeg", "c.JPG"] {
            touch(tmp.path(), name);
        }
        let exts = vec![".jpeg".to_string(), ".JPG".to_string()];
        let list = list_images(tmp.path(), &exts, ListingOrder::Name).unwrap();
        assert_eq!(names(&list), vec!["b.jpeg", "c.JPG"]);
    }
}
