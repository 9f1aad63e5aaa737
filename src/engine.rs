//! Locate and bind the pdfium shared library.
//!
//! pdfium is loaded at runtime, not linked. Candidates are tried in order:
//!
//! 1. `PDFIUM_LIB_PATH`: the library file itself, or a folder containing it
//! 2. the folder holding the running executable
//! 3. the current working directory
//! 4. the platform's default library search path
//!
//! The first candidate that binds is remembered for the rest of the process,
//! so later conversions skip the probing.

use crate::error::PixPdfError;
use pdfium_render::prelude::Pdfium;
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

/// Environment variable pointing at an existing pdfium library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

#[derive(Debug, Clone)]
enum Resolved {
    File(PathBuf),
    System,
}

static RESOLVED: OnceLock<Resolved> = OnceLock::new();

/// Platform file name of the pdfium library, e.g. `libpdfium.so`.
pub fn library_file_name() -> String {
    format!("{DLL_PREFIX}pdfium{DLL_SUFFIX}")
}

/// Bind to pdfium, probing the candidate locations on first use.
pub fn bind_pdfium() -> Result<Pdfium, PixPdfError> {
    if let Some(resolved) = RESOLVED.get() {
        return bind_resolved(resolved);
    }

    let mut failures = Vec::new();

    for candidate in candidate_paths() {
        match Pdfium::bind_to_library(&candidate) {
            Ok(bindings) => {
                info!("Bound pdfium from {}", candidate.display());
                let _ = RESOLVED.set(Resolved::File(candidate));
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => {
                debug!("pdfium not usable at {}: {}", candidate.display(), e);
                failures.push(format!("{}: {}", candidate.display(), e));
            }
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            info!("Bound pdfium from the system library path");
            let _ = RESOLVED.set(Resolved::System);
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            failures.push(format!("system library: {e}"));
            Err(PixPdfError::PdfiumBindingFailed(failures.join("; ")))
        }
    }
}

fn bind_resolved(resolved: &Resolved) -> Result<Pdfium, PixPdfError> {
    let bindings = match resolved {
        Resolved::File(path) => Pdfium::bind_to_library(path),
        Resolved::System => Pdfium::bind_to_system_library(),
    };
    bindings
        .map(Pdfium::new)
        .map_err(|e| PixPdfError::PdfiumBindingFailed(e.to_string()))
}

/// Explicit library locations to try, most specific first.
fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(p) = std::env::var_os(PDFIUM_LIB_PATH_ENV) {
        let p = PathBuf::from(p);
        candidates.push(library_in(&p));
    }

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join(library_file_name()));
    }

    candidates.push(PathBuf::from(".").join(library_file_name()));
    candidates.dedup();
    candidates
}

/// Accept either the library file or the folder that holds it.
fn library_in(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(library_file_name())
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn library_name_matches_platform_conventions() {
        let name = library_file_name();
        assert!(name.contains("pdfium"));
        if cfg!(target_os = "linux") {
            assert_eq!(name, "libpdfium.so");
        } else if cfg!(target_os = "macos") {
            assert_eq!(name, "libpdfium.dylib");
        } else if cfg!(target_os = "windows") {
            assert_eq!(name, "pdfium.dll");
        }
    }

    #[test]
    fn folder_override_resolves_to_library_inside() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(library_in(tmp.path()), tmp.path().join(library_file_name()));

        let file = tmp.path().join("custom-pdfium.so");
        assert_eq!(library_in(&file), file);
    }

    #[test]
    fn working_directory_is_always_a_candidate() {
        let candidates = candidate_paths();
        assert!(candidates
            .iter()
            .any(|c| c == &PathBuf::from(".").join(library_file_name())));
    }
}
