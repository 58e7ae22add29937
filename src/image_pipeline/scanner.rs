//! Directory scanning for FITS candidates
//!
//! Lists the `*.fit*` files directly inside the input directory and prepares
//! the output directory next to them.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::ConversionConfig;

/// Marker every candidate file name contains (`*.fit*`).
const FITS_MARKER: &[u8] = b".fit";

/// Returns whether a file name matches the `*.fit*` glob.
///
/// Matching is case-sensitive and, as with shell globbing, hidden names
/// starting with a dot never match. Names need not be valid UTF-8.
pub fn matches_fits_pattern<S: AsRef<OsStr>>(file_name: S) -> bool {
    let name = file_name.as_ref().as_encoded_bytes();
    !name.starts_with(b".")
        && name
            .windows(FITS_MARKER.len())
            .any(|window| window == FITS_MARKER)
}

fn ensure_input_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ConversionError::DirectoryNotFound(dir.to_path_buf()))
    }
}

/// Creates the output directory and any missing parents.
///
/// Safe to call repeatedly. Nothing is created if the input directory is
/// missing.
pub fn prepare_output_dir(config: &ConversionConfig) -> Result<()> {
    ensure_input_dir(&config.input_dir)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        ConversionError::OutputWriteError(format!("{}: {}", config.output_dir.display(), e))
    })?;

    debug!("Output directory ready: {}", config.output_dir.display());
    Ok(())
}

/// Lists the FITS candidates directly inside the input directory, sorted by name.
///
/// Subdirectories are not entered, so the output directory is never rescanned.
pub fn scan_directory(config: &ConversionConfig) -> Result<Vec<PathBuf>> {
    let root = &config.input_dir;
    ensure_input_dir(root)?;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", root.display(), e))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if matches_fits_pattern(entry.file_name()) {
            candidates.push(entry.into_path());
        }
    }

    debug!(
        "Found {} FITS candidates in {}",
        candidates.len(),
        root.display()
    );
    Ok(candidates)
}
