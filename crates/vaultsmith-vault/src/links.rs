//! Vault-wide wikilink rewriting, rename with link fixup, and backlinks.
//!
//! Rewriting is literal substring replacement of `[[old]]` and `[[old|`. A
//! link that merely contains the old name as a prefix of a longer target is
//! left alone, but one written with different case or surrounding spaces is
//! not recognised either.

use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;
use vaultsmith_core::{Error, PathValidator, Result};

use crate::store::{DocumentStore, note_basename};

/// Longest backlink context line
const BACKLINK_CONTEXT_CHARS: usize = 100;

/// Rewrite `[[old]]` and `[[old|alias]]` links to point at `new`
pub fn rewrite_wikilinks(content: &str, old: &str, new: &str) -> String {
    content
        .replace(&format!("[[{}]]", old), &format!("[[{}]]", new))
        .replace(&format!("[[{}|", old), &format!("[[{}|", new))
}

/// Outcome of a rename with link fixup
#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    pub old_path: String,
    pub new_path: String,
    pub updated_files: usize,
}

impl RenameReport {
    pub fn message(&self) -> String {
        format!(
            "Renamed {} -> {}\nUpdated links in {} files",
            self.old_path, self.new_path, self.updated_files
        )
    }
}

/// A note linking to a target, with the matching lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backlink {
    pub path: String,
    pub count: usize,
    /// `L{n}: {line}` for every matching line
    pub context: Vec<String>,
}

/// Link maintenance across every note in a store
#[derive(Clone)]
pub struct LinkRewriter {
    store: Arc<dyn DocumentStore>,
}

impl LinkRewriter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Apply every `(old, new)` rename to each note, writing only notes that
    /// change. Returns the number of notes written.
    ///
    /// Notes that cannot be read or written are skipped with a warning.
    #[instrument(skip(self, renames), name = "links_rewrite_vault")]
    pub async fn rewrite_vault(
        &self,
        renames: &[(&str, &str)],
        exclude: Option<&str>,
    ) -> Result<usize> {
        let mut updated = 0;
        for path in self.store.list(None).await? {
            if exclude == Some(path.as_str()) {
                continue;
            }
            let content = match self.store.read(Path::new(&path)).await {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Skipping {} during link rewrite: {}", path, e);
                    continue;
                }
            };

            let rewritten = renames
                .iter()
                .fold(content.clone(), |acc, (old, new)| rewrite_wikilinks(&acc, old, new));
            if rewritten == content {
                continue;
            }

            match self.store.write(Path::new(&path), &rewritten).await {
                Ok(()) => updated += 1,
                Err(e) => log::warn!("Failed to write {} during link rewrite: {}", path, e),
            }
        }

        log::info!("Link rewrite updated {} notes", updated);
        Ok(updated)
    }

    /// Rename a note and repoint links at it by full name and by basename
    #[instrument(skip(self), name = "links_rename_note")]
    pub async fn rename_note(&self, old_path: &str, new_path: &str) -> Result<RenameReport> {
        let ext = self.store.note_extension();
        if !old_path.ends_with(ext) || !new_path.ends_with(ext) {
            return Err(Error::invalid_path(format!("paths must end with {}", ext)));
        }

        let root = self.store.root();
        if !PathValidator::is_within(root, &root.join(old_path))
            || !PathValidator::is_within(root, &root.join(new_path))
        {
            log::warn!("Rejected rename outside vault: {} -> {}", old_path, new_path);
            return Err(Error::invalid_path("paths must be within vault"));
        }

        if !self.store.exists(Path::new(old_path)).await? {
            return Err(Error::file_not_found(old_path));
        }
        if self.store.exists(Path::new(new_path)).await? {
            return Err(Error::already_exists(new_path));
        }

        let old_name = self.store.note_name(old_path);
        let new_name = self.store.note_name(new_path);
        let old_base = note_basename(old_path, ext);
        let new_base = note_basename(new_path, ext);

        let updated_files = self
            .rewrite_vault(&[(old_name, new_name), (old_base, new_base)], Some(old_path))
            .await?;

        self.store
            .rename(Path::new(old_path), Path::new(new_path))
            .await?;
        log::info!("Renamed {} -> {}", old_path, new_path);

        Ok(RenameReport {
            old_path: old_path.to_string(),
            new_path: new_path.to_string(),
            updated_files,
        })
    }

    /// Notes linking to `target` by full name or basename.
    ///
    /// The target itself is skipped. Each matching line is counted once per
    /// distinct link form it matches.
    #[instrument(skip(self), name = "links_backlinks")]
    pub async fn backlinks(&self, target: &str) -> Result<Vec<Backlink>> {
        let ext = self.store.note_extension();
        let name = target.strip_suffix(ext).unwrap_or(target);
        let base = note_basename(name, ext);

        let mut forms = vec![name];
        if base != name {
            forms.push(base);
        }
        let patterns: Vec<Regex> = forms
            .iter()
            .map(|form| Regex::new(&format!(r"\[\[{}(\|[^\]]+)?\]\]", regex::escape(form))))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::other(format!("Invalid backlink pattern: {}", e)))?;

        let mut found = Vec::new();
        for path in self.store.list(None).await? {
            if path == target || self.store.note_name(&path) == name {
                continue;
            }
            let content = match self.store.read(Path::new(&path)).await {
                Ok(content) => content,
                Err(e) => {
                    log::debug!("Skipping {} during backlink scan: {}", path, e);
                    continue;
                }
            };

            let mut context = Vec::new();
            for pattern in &patterns {
                for (i, line) in content.split('\n').enumerate() {
                    if pattern.is_match(line) {
                        context.push(format!("L{}: {}", i + 1, backlink_excerpt(line)));
                    }
                }
            }

            if !context.is_empty() {
                found.push(Backlink {
                    path,
                    count: context.len(),
                    context,
                });
            }
        }

        Ok(found)
    }
}

fn backlink_excerpt(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= BACKLINK_CONTEXT_CHARS {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(BACKLINK_CONTEXT_CHARS).collect();
    format!("{}...", head)
}
