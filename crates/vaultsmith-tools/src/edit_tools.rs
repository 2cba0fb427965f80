//! Surgical edits: find/replace, section replace, batch find/replace

use crate::context::{ToolContext, require};
use vaultsmith_batch::{BatchEditEngine, BatchEditResult};
use vaultsmith_core::prelude::*;
use vaultsmith_vault::{EditEngine, EditOutcome};

/// Edit tools context
#[derive(Clone)]
pub struct EditTools {
    ctx: ToolContext,
    engine: EditEngine,
    batch: BatchEditEngine,
}

impl EditTools {
    pub fn new(ctx: ToolContext) -> Self {
        let engine = EditEngine::new(ctx.store().clone());
        let batch = BatchEditEngine::new(ctx.store().clone());
        Self { ctx, engine, batch }
    }

    /// Replace `old_text` with `new_text` in one note.
    ///
    /// Without `replace_all` the old text must occur exactly once.
    pub async fn edit_note(
        &self,
        path: &str,
        old_text: &str,
        new_text: &str,
        replace_all: bool,
        context_lines: usize,
    ) -> Result<EditOutcome> {
        self.ctx.ensure_writable("edit_note")?;
        let path = self.ctx.note_path(path)?;
        self.engine
            .replace_text(&path, old_text, new_text, replace_all, context_lines)
            .await
    }

    /// Replace everything under `heading` up to the next heading of the same
    /// or higher level
    pub async fn replace_section(
        &self,
        path: &str,
        heading: &str,
        content: &str,
        context_lines: usize,
    ) -> Result<EditOutcome> {
        self.ctx.ensure_writable("replace_section")?;
        let path = self.ctx.note_path(path)?;
        let heading = require(heading, "heading")?;
        self.engine
            .replace_section(&path, heading, content, context_lines)
            .await
    }

    /// Apply a JSON list of find/replace pairs to one note, all or nothing
    pub async fn batch_edit_note(
        &self,
        path: &str,
        edits_json: &str,
        context_lines: usize,
    ) -> Result<BatchEditResult> {
        self.ctx.ensure_writable("batch_edit_note")?;
        let path = self.ctx.note_path(path)?;
        let edits_json = require(edits_json, "edits")?;
        self.batch.apply_json(&path, edits_json, context_lines).await
    }
}
