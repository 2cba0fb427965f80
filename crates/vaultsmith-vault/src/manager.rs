//! Filesystem-backed document store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::instrument;
use vaultsmith_core::prelude::*;
use walkdir::WalkDir;

use crate::store::{DocumentStore, NoteStat, relative_display};

/// Vault manager: the [`DocumentStore`] over the default vault directory
#[derive(Debug, Clone)]
pub struct VaultManager {
    vault_path: PathBuf,
    note_extension: String,
    max_file_size: u64,
    excluded_paths: HashSet<String>,
}

impl VaultManager {
    /// Create a new vault manager for the configuration's default vault
    pub fn new(config: ServerConfig) -> Result<Self> {
        let vault = config.default_vault()?;
        let vault_path = vault.path.clone();
        let max_file_size = config.max_file_size_for(vault);
        let excluded_paths = config.excluded_paths_for(vault);

        log::info!("Opened vault '{}' at {}", vault.name, vault_path.display());

        Ok(Self {
            vault_path,
            note_extension: config.note_extension.clone(),
            max_file_size,
            excluded_paths,
        })
    }

    /// Get vault path
    pub fn vault_path(&self) -> &PathBuf {
        &self.vault_path
    }

    /// Join a caller-supplied relative path onto the vault root, rejecting escapes
    fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        PathValidator::validate_path_in_vault(&self.vault_path, path)
    }

    /// Sibling temp file used for write-then-rename
    fn temp_path(full_path: &Path) -> PathBuf {
        let name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        full_path.with_file_name(format!(".{}.tmp", name))
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded_paths.contains(name)
    }
}

#[async_trait]
impl DocumentStore for VaultManager {
    fn root(&self) -> &Path {
        &self.vault_path
    }

    fn note_extension(&self) -> &str {
        &self.note_extension
    }

    #[instrument(skip(self), fields(file = ?path), name = "vault_read_file")]
    async fn read(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve_path(path)?;

        let metadata = match tokio::fs::metadata(&full_path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::file_not_found(path));
            }
            Err(e) => return Err(Error::io(e)),
        };
        if metadata.len() > self.max_file_size {
            log::warn!(
                "Refusing to read {} ({} bytes exceeds {})",
                path.display(),
                metadata.len(),
                self.max_file_size
            );
            return Err(Error::file_too_large(path, metadata.len(), self.max_file_size));
        }

        tokio::fs::read_to_string(&full_path).await.map_err(Error::io)
    }

    /// Write file to disk atomically
    #[instrument(skip(self, content), fields(file = ?path, size = content.len()), name = "vault_write_file")]
    async fn write(&self, path: &Path, content: &str) -> Result<()> {
        let full_path = self.resolve_path(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }

        let temp_path = Self::temp_path(&full_path);
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(Error::io)?;

        if let Err(e) = tokio::fs::rename(&temp_path, &full_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::io(e));
        }

        log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    #[instrument(skip(self), fields(file = ?path), name = "vault_stat")]
    async fn stat(&self, path: &Path) -> Result<Option<NoteStat>> {
        let full_path = self.resolve_path(path)?;
        match tokio::fs::metadata(&full_path).await {
            Ok(metadata) => Ok(Some(NoteStat {
                size: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(e)),
        }
    }

    #[instrument(skip(self), fields(subtree = ?subtree), name = "vault_list")]
    async fn list(&self, subtree: Option<&Path>) -> Result<Vec<String>> {
        let start = match subtree {
            Some(dir) => self.resolve_path(dir)?,
            None => self.vault_path.clone(),
        };
        if !start.is_dir() {
            return Ok(Vec::new());
        }

        let extension = self.note_extension.clone();
        let mut files: Vec<String> = WalkDir::new(&start)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| self.is_excluded(name))
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry while listing: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(&extension))
            })
            .filter_map(|entry| relative_display(&self.vault_path, entry.path()))
            .collect();

        files.sort();
        log::debug!("Listed {} notes", files.len());
        Ok(files)
    }

    #[instrument(skip(self), fields(from = ?from, to = ?to), name = "vault_rename")]
    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let from_full = self.resolve_path(from)?;
        let to_full = self.resolve_path(to)?;

        if let Some(parent) = to_full.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }

        tokio::fs::rename(&from_full, &to_full)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::file_not_found(from),
                _ => Error::io(e),
            })
    }

    #[instrument(skip(self), fields(file = ?path), name = "vault_delete")]
    async fn delete(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve_path(path)?;
        tokio::fs::remove_file(&full_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::file_not_found(path),
                _ => Error::io(e),
            })
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve_path(path)?;
        tokio::fs::create_dir_all(&full_path)
            .await
            .map_err(Error::io)
    }
}
