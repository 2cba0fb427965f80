//! Shared state and argument checks for every tool group

use std::path::Path;
use std::sync::Arc;
use vaultsmith_core::prelude::*;
use vaultsmith_vault::{DocumentStore, VaultManager};

/// Store handle plus the read-only switch, cloned into each tool group
#[derive(Clone)]
pub struct ToolContext {
    store: Arc<dyn DocumentStore>,
    read_only: bool,
}

impl ToolContext {
    pub fn new(store: Arc<dyn DocumentStore>, read_only: bool) -> Self {
        Self { store, read_only }
    }

    /// Open the default vault of `config` on the filesystem
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let read_only = config.read_only;
        let manager = VaultManager::new(config)?;
        Ok(Self::new(Arc::new(manager), read_only))
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Reject a mutating operation when the vault is read-only
    pub fn ensure_writable(&self, operation: &str) -> Result<()> {
        if self.read_only {
            log::warn!("Rejected {} on read-only vault", operation);
            return Err(Error::read_only(operation));
        }
        Ok(())
    }

    /// Require a path that already names a note
    pub fn require_note_path<'a>(&self, path: &'a str) -> Result<&'a str> {
        let path = require(path, "path")?;
        if !self.store.is_note_path(path) {
            return Err(Error::invalid_path(format!(
                "path must end with {}",
                self.store.note_extension()
            )));
        }
        Ok(path)
    }

    /// Require a path, appending the note extension when missing
    pub fn note_path(&self, path: &str) -> Result<String> {
        let path = require(path, "path")?;
        Ok(self.store.with_note_extension(path))
    }
}

/// Reject an empty required argument
pub fn require<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation_error(format!("{} is required", name)));
    }
    Ok(trimmed)
}

/// Read a listed note during a vault-wide scan.
///
/// A note that vanished since the listing is skipped quietly; any other
/// failure is logged and skipped so one bad file cannot sink the scan.
pub(crate) async fn read_for_scan(store: &dyn DocumentStore, path: &str, scan: &str) -> Option<String> {
    match store.read(Path::new(path)).await {
        Ok(content) => Some(content),
        Err(e) if e.is_not_found() => {
            log::debug!("{} vanished during {}", path, scan);
            None
        }
        Err(e) => {
            log::warn!("Skipping {} during {}: {}", path, scan, e);
            None
        }
    }
}

/// Treat an empty optional directory as the whole vault
pub(crate) fn optional_dir(directory: Option<&str>) -> Option<&str> {
    directory.map(str::trim).filter(|d| !d.is_empty())
}
