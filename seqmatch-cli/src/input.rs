//! Reading texts from disk.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// A text read from a file, identified by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    /// The file name of the canonical path, used as the text identifier.
    pub identifier: String,
    /// The UTF-8 file content.
    pub content: String,
}

/// Reads a regular file as UTF-8 text. The identifier is the file name of
/// the canonicalized path, so the same file reached through different
/// relative paths replaces one stored text instead of creating two.
pub fn read_text(path: &Path) -> Result<LoadedFile> {
    if path.as_os_str().is_empty() {
        bail!("empty path");
    }

    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve path: {}", path.display()))?;
    if !canonical.is_file() {
        bail!("not a regular file: {}", canonical.display());
    }

    let content = std::fs::read_to_string(&canonical)
        .with_context(|| format!("failed to read file: {}", canonical.display()))?;
    let identifier = canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("path has no file name: {}", canonical.display()))?;

    Ok(LoadedFile {
        identifier,
        content,
    })
}
