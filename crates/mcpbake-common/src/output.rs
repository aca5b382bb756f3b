//! Atomic artifact writing.
//!
//! Artifacts are rendered fully in memory by the caller, written to a
//! temporary file next to the destination, and renamed into place so a
//! failed run never leaves a half-written file behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{BakeError, Result};

/// Writes `contents` to `path`, replacing any existing file atomically.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the
/// temporary file cannot be written or renamed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| BakeError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| BakeError::io(parent, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| BakeError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| BakeError::io(tmp.path(), e))?;
    let _ = tmp
        .persist(path)
        .map_err(|e| BakeError::io(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "artifact written");
    Ok(())
}
