//! File loading and output persistence

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Read a whole input file into memory
pub fn read_input(path: &Path, what: &str) -> Result<Vec<u8>> {
    let data = fs::read(path)
        .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    log::debug!("Loaded {} ({} bytes)", path.display(), data.len());
    Ok(data)
}

/// Length of an input file, read from its metadata without loading it
pub fn input_len(path: &Path, what: &str) -> Result<usize> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    usize::try_from(metadata.len())
        .with_context(|| format!("{what} file too large: {}", path.display()))
}

/// Default output path: `<stem>.patched.<ext>` next to the target
pub fn default_output_path(target: &Path) -> PathBuf {
    let stem = target
        .file_stem()
        .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().into_owned());

    let name = match target.extension() {
        Some(ext) => format!("{stem}.patched.{}", ext.to_string_lossy()),
        None => format!("{stem}.patched"),
    };
    target.with_file_name(name)
}

/// Write `data` to `path` through a temporary file in the same directory
///
/// The destination only appears once every byte has been written, so a
/// failed run never leaves a partial output behind. Unless `overwrite` is
/// set, an existing destination is never replaced.
pub fn write_atomically(path: &Path, data: &[u8], overwrite: bool) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp_file
        .write_all(data)
        .context("Failed to write patched data")?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to flush patched data")?;
    let persisted = if overwrite {
        temp_file.persist(path)
    } else {
        temp_file.persist_noclobber(path)
    };
    persisted.with_context(|| format!("Failed to create output file: {}", path.display()))?;

    Ok(())
}
