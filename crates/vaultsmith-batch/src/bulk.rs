//! Multi-note bulk operations.
//!
//! Unlike batch edits, bulk operations are applied note by note: a failure on
//! one note is recorded and the rest still run. The markdown report lists
//! successes and failures separately.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;
use vaultsmith_core::{Error, PathValidator, Result, TransactionBuilder};
use vaultsmith_vault::frontmatter::{set_frontmatter_key, validate_key, validate_value};
use vaultsmith_vault::tags::{add_tag, remove_tag};
use vaultsmith_vault::{DocumentStore, LinkRewriter};

/// A change applied to every note in a bulk request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BulkOperation {
    /// Move notes into a folder
    #[serde(rename = "Move")]
    Move {
        destination: String,
        #[serde(default = "default_update_links")]
        update_links: bool,
    },

    /// Set one frontmatter key to the same value everywhere
    #[serde(rename = "SetFrontmatter")]
    SetFrontmatter { key: String, value: String },

    /// Add a tag (skipped where already present)
    #[serde(rename = "AddTag")]
    AddTag { tag: String },

    /// Remove a tag from frontmatter and body
    #[serde(rename = "RemoveTag")]
    RemoveTag { tag: String },
}

fn default_update_links() -> bool {
    true
}

impl BulkOperation {
    /// Build a tag operation from an `add`/`remove` action name
    pub fn tag(action: &str, tag: &str) -> Result<Self> {
        let tag = tag.trim_start_matches('#').to_string();
        if tag.is_empty() {
            return Err(Error::validation_error("tag is required"));
        }
        match action {
            "add" => Ok(Self::AddTag { tag }),
            "remove" => Ok(Self::RemoveTag { tag }),
            other => Err(Error::validation_error(format!(
                "Invalid action '{}'. Use: add or remove",
                other
            ))),
        }
    }

    /// Report heading
    fn title(&self) -> String {
        match self {
            Self::Move { destination, .. } => format!("Bulk Move to {}", destination),
            Self::SetFrontmatter { key, .. } => format!("Bulk Set Frontmatter: {}", key),
            Self::AddTag { tag } => format!("Bulk Add Tag: #{}", tag),
            Self::RemoveTag { tag } => format!("Bulk Remove Tag: #{}", tag),
        }
    }

    /// Heading of the success section
    fn results_heading(&self) -> &'static str {
        match self {
            Self::Move { .. } => "Moved",
            Self::SetFrontmatter { .. } => "Updated",
            Self::AddTag { .. } | Self::RemoveTag { .. } => "Results",
        }
    }
}

/// Record of one note in a bulk run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Position in the path list
    pub operation_index: usize,
    pub path: String,
    pub success: bool,
    /// Whether the note was written
    pub changed: bool,
    /// Report line for this note (without the leading `- `)
    pub detail: String,
}

/// Result of a bulk run
#[derive(Debug, Clone, Serialize)]
pub struct BulkResult {
    pub operation: BulkOperation,
    pub total: usize,
    pub records: Vec<OperationRecord>,
    pub transaction_id: String,
    pub duration_ms: u64,
}

impl BulkResult {
    pub fn succeeded(&self) -> impl Iterator<Item = &OperationRecord> {
        self.records.iter().filter(|r| r.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &OperationRecord> {
        self.records.iter().filter(|r| !r.success)
    }

    /// Markdown report: title, successes, then errors
    pub fn report(&self) -> String {
        let mut out = format!("# {}\n\n", self.operation.title());

        if self.succeeded().next().is_some() {
            let _ = writeln!(out, "## {}\n", self.operation.results_heading());
            for record in self.succeeded() {
                let _ = writeln!(out, "- {}", record.detail);
            }
        }

        if self.failed().next().is_some() {
            out.push_str("\n## Errors\n\n");
            for record in self.failed() {
                let _ = writeln!(out, "- {}", record.detail);
            }
        }

        out
    }
}

/// Split a caller-supplied path list.
///
/// Accepts a JSON array of strings or text separated by commas and newlines.
/// Blank entries are dropped and `extension` is appended where missing.
pub fn parse_paths(raw: &str, extension: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let items: Vec<String> = match serde_json::from_str::<Vec<String>>(trimmed) {
        Ok(items) if trimmed.starts_with('[') => items,
        _ => trimmed
            .split([',', '\n'])
            .map(|s| s.trim().to_string())
            .collect(),
    };

    items
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.ends_with(extension) {
                p
            } else {
                format!("{}{}", p, extension)
            }
        })
        .collect()
}

/// Runs bulk operations against a store
#[derive(Clone)]
pub struct BulkExecutor {
    store: Arc<dyn DocumentStore>,
    links: LinkRewriter,
}

impl BulkExecutor {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let links = LinkRewriter::new(store.clone());
        Self { store, links }
    }

    /// Validate a bulk request before any note is touched
    pub fn validate(&self, op: &BulkOperation, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Err(Error::validation_error("at least one path is required"));
        }
        match op {
            BulkOperation::Move { destination, .. } => {
                PathValidator::validate_path_in_vault(self.store.root(), Path::new(destination))?;
            }
            BulkOperation::SetFrontmatter { key, value } => {
                validate_key(key)?;
                validate_value(value)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply `op` to each path in turn
    #[instrument(skip(self, paths), fields(count = paths.len()), name = "bulk_execute")]
    pub async fn execute(&self, op: BulkOperation, paths: &[String]) -> Result<BulkResult> {
        let transaction = TransactionBuilder::new();
        self.validate(&op, paths)?;

        if let BulkOperation::Move { destination, .. } = &op {
            self.store.create_dir_all(Path::new(destination)).await?;
        }

        let mut records = Vec::with_capacity(paths.len());
        for (idx, path) in paths.iter().enumerate() {
            let record = if PathValidator::is_within(self.store.root(), &self.store.root().join(path)) {
                self.execute_one(&op, path).await
            } else {
                log::warn!("Bulk operation rejected path outside vault: {}", path);
                Outcome::failed(format!("{}: path must be within vault", path))
            };
            records.push(OperationRecord {
                operation_index: idx,
                path: path.clone(),
                success: record.success,
                changed: record.changed,
                detail: record.detail,
            });
        }

        let failures = records.iter().filter(|r| !r.success).count();
        log::info!(
            "{} finished: {} ok, {} failed [txn {}]",
            op.title(),
            records.len() - failures,
            failures,
            transaction.transaction_id()
        );

        Ok(BulkResult {
            operation: op,
            total: paths.len(),
            records,
            transaction_id: transaction.transaction_id().to_string(),
            duration_ms: transaction.elapsed_ms(),
        })
    }

    async fn execute_one(&self, op: &BulkOperation, path: &str) -> Outcome {
        match op {
            BulkOperation::Move {
                destination,
                update_links,
            } => self.move_one(path, destination, *update_links).await,
            BulkOperation::SetFrontmatter { key, value } => {
                self.rewrite_one(path, |content| (true, set_frontmatter_key(content, key, value)))
                    .await
                    .map_changed(|| format!("{}: set {}={}", path, key, value))
            }
            BulkOperation::AddTag { tag } => self
                .rewrite_one(path, |content| add_tag(content, tag))
                .await
                .map_changed(|| format!("{}: added #{}", path, tag)),
            BulkOperation::RemoveTag { tag } => self
                .rewrite_one(path, |content| remove_tag(content, tag))
                .await
                .map_changed(|| format!("{}: removed #{}", path, tag)),
        }
    }

    /// Read, transform and write back one note
    async fn rewrite_one<F>(&self, path: &str, transform: F) -> Outcome
    where
        F: FnOnce(&str) -> (bool, String),
    {
        let content = match self.store.read(Path::new(path)).await {
            Ok(content) => content,
            Err(e) => {
                log::debug!("Bulk read of {} failed: {}", path, e);
                return Outcome::failed(format!("{}: read failed", path));
            }
        };

        let (changed, updated) = transform(&content);
        if !changed {
            return Outcome::unchanged(format!("{}: no change", path));
        }

        match self.store.write(Path::new(path), &updated).await {
            Ok(()) => Outcome::changed(String::new()),
            Err(e) => {
                log::warn!("Bulk write of {} failed: {}", path, e);
                Outcome::failed(format!("{}: write failed", path))
            }
        }
    }

    async fn move_one(&self, path: &str, destination: &str, update_links: bool) -> Outcome {
        let filename = path.rsplit('/').next().unwrap_or(path);
        let dest = destination.trim_matches('/');
        let new_path = if dest.is_empty() || dest == "." {
            filename.to_string()
        } else {
            format!("{}/{}", dest, filename)
        };

        match self.store.exists(Path::new(path)).await {
            Ok(true) => {}
            _ => return Outcome::failed(format!("{}: not found", path)),
        }
        if self.store.exists(Path::new(&new_path)).await.unwrap_or(true) {
            return Outcome::failed(format!("{}: already exists at destination", filename));
        }
        if let Err(e) = self.store.rename(Path::new(path), Path::new(&new_path)).await {
            log::warn!("Bulk move of {} failed: {}", path, e);
            return Outcome::failed(format!("{}: move failed", path));
        }

        if update_links {
            // Wikilinks resolve by note name, which a move leaves unchanged
            let name = self.store.note_name(filename);
            if let Err(e) = self.links.rewrite_vault(&[(name, name)], None).await {
                log::warn!("Link update after moving {} failed: {}", path, e);
            }
        }

        Outcome::changed(format!("{} -> {}", path, new_path))
    }
}

/// Per-note outcome before it becomes an [`OperationRecord`]
struct Outcome {
    success: bool,
    changed: bool,
    detail: String,
}

impl Outcome {
    fn changed(detail: String) -> Self {
        Self {
            success: true,
            changed: true,
            detail,
        }
    }

    fn unchanged(detail: String) -> Self {
        Self {
            success: true,
            changed: false,
            detail,
        }
    }

    fn failed(detail: String) -> Self {
        Self {
            success: false,
            changed: false,
            detail,
        }
    }

    /// Fill in the detail of a successful write
    fn map_changed(self, detail: impl FnOnce() -> String) -> Self {
        if self.success && self.changed {
            Self::changed(detail())
        } else {
            self
        }
    }
}
