//! All-or-nothing batch find/replace against one note.
//!
//! Every edit is located in the same pristine snapshot. The batch is rejected
//! unless each `old_text` occurs exactly once and no two matched ranges
//! overlap; an accepted batch is spliced from the highest offset down and
//! written once.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;
use vaultsmith_core::{Error, Result, TransactionBuilder};
use vaultsmith_vault::context::{context_for_replacement, truncate_line};
use vaultsmith_vault::{DocumentStore, compute_hash, replace_at};

/// Longest `old_text` preview in validation messages
const PREVIEW_CHARS: usize = 80;

/// One find/replace pair as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSpec {
    pub old_text: String,
    pub new_text: String,
}

/// An edit whose `old_text` was found exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedEdit {
    /// 1-based position in the caller's list
    pub index: usize,
    /// Byte offset of `old_text` in the snapshot
    pub offset: usize,
    pub old_len: usize,
    pub new_text: String,
}

impl LocatedEdit {
    /// One past the last matched byte
    pub fn end(&self) -> usize {
        self.offset + self.old_len
    }

    /// Whether the matched ranges share any byte
    pub fn overlaps(&self, other: &LocatedEdit) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// Parse the caller's JSON edit list
pub fn parse_edits(raw: &str) -> Result<Vec<EditSpec>> {
    let edits: Vec<EditSpec> = serde_json::from_str(raw).map_err(|e| {
        Error::parse_error(format!(
            "Invalid edits JSON: {}. Expected [{{\"old_text\": \"...\", \"new_text\": \"...\"}}, ...]",
            e
        ))
    })?;
    if edits.is_empty() {
        return Err(Error::validation_error("edits array is empty"));
    }
    Ok(edits)
}

/// Locate every edit in `content`, or explain every edit that cannot be.
///
/// Returns the located edits sorted by offset.
pub fn validate_edits(path: &str, content: &str, edits: &[EditSpec]) -> Result<Vec<LocatedEdit>> {
    let mut located = Vec::with_capacity(edits.len());
    let mut problems = Vec::new();

    for (i, edit) in edits.iter().enumerate() {
        let index = i + 1;
        if edit.old_text.is_empty() {
            problems.push(format!("edit {}: old_text is empty", index));
            continue;
        }

        let preview = truncate_line(&edit.old_text, PREVIEW_CHARS);
        match content.matches(edit.old_text.as_str()).count() {
            0 => problems.push(format!("edit {}: old_text not found: {:?}", index, preview)),
            1 => {
                if let Some(offset) = content.find(edit.old_text.as_str()) {
                    located.push(LocatedEdit {
                        index,
                        offset,
                        old_len: edit.old_text.len(),
                        new_text: edit.new_text.clone(),
                    });
                }
            }
            n => problems.push(format!(
                "edit {}: old_text found {} times (must be unique): {:?}",
                index, n, preview
            )),
        }
    }

    if !problems.is_empty() {
        return Err(Error::conflict(format!(
            "Batch edit validation failed for {}:\n- {}",
            path,
            problems.join("\n- ")
        )));
    }

    located.sort_by_key(|edit| edit.offset);
    for pair in located.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            let (a, b) = if pair[0].index < pair[1].index {
                (pair[0].index, pair[1].index)
            } else {
                (pair[1].index, pair[0].index)
            };
            return Err(Error::conflict(format!(
                "Batch edit validation failed for {}: edits {} and {} overlap",
                path, a, b
            )));
        }
    }

    Ok(located)
}

/// Splice located edits into `content`, highest offset first
pub fn apply_located(content: &str, located: &[LocatedEdit]) -> String {
    let mut ordered: Vec<&LocatedEdit> = located.iter().collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));
    ordered.into_iter().fold(content.to_string(), |acc, edit| {
        replace_at(&acc, edit.offset, edit.old_len, &edit.new_text)
    })
}

/// Result of an applied batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchEditResult {
    pub path: String,
    pub message: String,
    pub applied: usize,
    pub old_hash: String,
    pub new_hash: String,
    pub transaction_id: String,
    pub duration_ms: u64,
}

/// Batch edit engine over a document store
#[derive(Clone)]
pub struct BatchEditEngine {
    store: Arc<dyn DocumentStore>,
}

impl BatchEditEngine {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Parse, validate and apply a JSON edit list to one note
    #[instrument(skip(self, edits_json), fields(file = %path), name = "batch_edit_note")]
    pub async fn apply_json(
        &self,
        path: &str,
        edits_json: &str,
        context_lines: usize,
    ) -> Result<BatchEditResult> {
        let edits = parse_edits(edits_json)?;
        self.apply(path, &edits, context_lines).await
    }

    /// Validate and apply `edits` to one note; nothing is written on rejection
    pub async fn apply(
        &self,
        path: &str,
        edits: &[EditSpec],
        context_lines: usize,
    ) -> Result<BatchEditResult> {
        let transaction = TransactionBuilder::new();
        if edits.is_empty() {
            return Err(Error::validation_error("edits array is empty"));
        }

        let snapshot = self.store.read(Path::new(path)).await?;
        let located = validate_edits(path, &snapshot, edits).inspect_err(|e| {
            log::warn!("Rejected batch edit for {}: {}", path, e);
        })?;
        let result = apply_located(&snapshot, &located);
        self.store.write(Path::new(path), &result).await?;

        log::info!(
            "Applied {} edit(s) to {} [txn {}]",
            edits.len(),
            path,
            transaction.transaction_id()
        );

        let mut message = format!("Applied {} edit(s) to {}", edits.len(), path);
        // `located` is sorted by offset, so the first entry is the first edit in the file
        if context_lines > 0
            && let Some(first) = located.first()
            && let Some(excerpt) = context_for_replacement(&result, &first.new_text, context_lines)
        {
            message.push_str("\n\n--- Context (first edit) ---\n");
            message.push_str(&excerpt);
        }

        Ok(BatchEditResult {
            path: path.to_string(),
            message,
            applied: edits.len(),
            old_hash: compute_hash(&snapshot),
            new_hash: compute_hash(&result),
            transaction_id: transaction.transaction_id().to_string(),
            duration_ms: transaction.elapsed_ms(),
        })
    }
}
