//! Shared utilities for operations across vaultsmith crates.
//!
//! - Path containment (the guard every caller-supplied path passes through)
//! - Transaction tracking

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

/// Path validation helpers
pub struct PathValidator;

impl PathValidator {
    /// Resolve `.` and `..` segments without touching the filesystem.
    ///
    /// A `..` that would climb above the root is dropped for absolute paths
    /// and kept for relative ones, so a relative escape never collapses into
    /// something that looks contained.
    pub fn clean(path: &Path) -> PathBuf {
        let mut parts: Vec<Component<'_>> = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => match parts.last() {
                    Some(Component::Normal(_)) => {
                        parts.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => parts.push(component),
                },
                other => parts.push(other),
            }
        }
        parts.iter().collect()
    }

    /// Whether `candidate` is the vault root or nested under it, lexically.
    pub fn is_within(vault_root: &Path, candidate: &Path) -> bool {
        let root = Self::clean(vault_root);
        if root.as_os_str().is_empty() {
            return false;
        }
        Self::clean(candidate).starts_with(&root)
    }

    /// Join `path` onto the vault root and ensure the result stays inside it.
    ///
    /// Returns the cleaned absolute path on success.
    pub fn validate_path_in_vault(vault_root: &Path, path: &Path) -> Result<PathBuf> {
        let full_path = Self::clean(&vault_root.join(path));
        if !Self::is_within(vault_root, &full_path) {
            log::warn!("Rejected path outside vault: {}", path.display());
            return Err(Error::path_traversal(path));
        }
        Ok(full_path)
    }
}

/// Transaction tracking utilities
pub struct TransactionBuilder {
    transaction_id: String,
    start_time: Instant,
}

impl TransactionBuilder {
    /// Create a new transaction tracker
    pub fn new() -> Self {
        Self {
            transaction_id: uuid::Uuid::new_v4().to_string(),
            start_time: Instant::now(),
        }
    }

    /// Get the transaction ID
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
