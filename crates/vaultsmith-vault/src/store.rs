//! The document store seam every engine reads and writes through.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use vaultsmith_core::Result;

/// Size and modification time of a stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteStat {
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Whole-file access to documents by vault-relative path.
///
/// Implementations confine every path to the vault root before touching
/// storage and report a missing document as `Error::FileNotFound` carrying
/// the relative path the caller supplied.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Absolute vault root
    fn root(&self) -> &Path;

    /// Extension every note carries, including the dot
    fn note_extension(&self) -> &str;

    /// Read a whole document
    async fn read(&self, path: &Path) -> Result<String>;

    /// Replace a whole document, creating parent directories
    async fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Size and mtime, or `None` when nothing exists at `path`
    async fn stat(&self, path: &Path) -> Result<Option<NoteStat>>;

    /// Note paths under `subtree` (the whole vault when `None`), sorted,
    /// relative to the vault root with `/` separators
    async fn list(&self, subtree: Option<&Path>) -> Result<Vec<String>>;

    /// Move a document, creating the destination's parent directories
    async fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Delete a document
    async fn delete(&self, path: &Path) -> Result<()>;

    /// Create a directory and its parents
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Whether anything exists at `path`
    async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(self.stat(path).await?.is_some())
    }

    /// Whether `path` names a note (ends with the note extension)
    fn is_note_path(&self, path: &str) -> bool {
        path.ends_with(self.note_extension())
    }

    /// Append the note extension when it is missing
    fn with_note_extension(&self, path: &str) -> String {
        if self.is_note_path(path) {
            path.to_string()
        } else {
            format!("{}{}", path, self.note_extension())
        }
    }

    /// Note name without the extension (`folder/Note.md` -> `folder/Note`)
    fn note_name<'a>(&self, path: &'a str) -> &'a str {
        path.strip_suffix(self.note_extension()).unwrap_or(path)
    }
}

/// File name of a vault-relative path without the note extension
pub fn note_basename<'a>(path: &'a str, extension: &str) -> &'a str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(extension).unwrap_or(file)
}

/// Render a path relative to `root` with `/` separators
pub fn relative_display(root: &Path, full: &Path) -> Option<String> {
    let rel: PathBuf = full.strip_prefix(root).ok()?.to_path_buf();
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_basename() {
        assert_eq!(note_basename("folder/sub/Note.md", ".md"), "Note");
        assert_eq!(note_basename("Note.md", ".md"), "Note");
        assert_eq!(note_basename("Note", ".md"), "Note");
    }

    #[test]
    fn test_relative_display() {
        let root = Path::new("/vault");
        assert_eq!(
            relative_display(root, Path::new("/vault/a/b.md")),
            Some("a/b.md".to_string())
        );
        assert_eq!(relative_display(root, Path::new("/other/b.md")), None);
    }
}
