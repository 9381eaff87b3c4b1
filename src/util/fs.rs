//! Filesystem helpers for conversion output.
//!
//! Provides [`ensure_dir`] to create the output directory (and parents)
//! before a conversion writes its CSV and summary files.

use std::path::Path;

use crate::PerfError;

/// Create a directory and any missing parents. Existing directories are
/// left untouched.
pub fn ensure_dir(dir: &Path) -> Result<(), PerfError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| PerfError::Io(format!("Cannot create directory {}: {}", dir.display(), e)))
}
