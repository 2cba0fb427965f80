//! Whole-note operations: list, read, write, delete

use crate::context::{ToolContext, optional_dir};
use std::path::Path;
use tracing::instrument;
use vaultsmith_core::prelude::*;

/// File tools context
#[derive(Clone)]
pub struct FileTools {
    ctx: ToolContext,
}

impl FileTools {
    /// Create new file tools
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// List notes, optionally under a directory, with pagination.
    ///
    /// `limit` and `offset` of zero mean "no limit" and "from the start".
    pub async fn list_notes(
        &self,
        directory: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<String> {
        let notes = self
            .ctx
            .store()
            .list(optional_dir(directory).map(Path::new))
            .await?;

        let total = notes.len();
        if total == 0 {
            return Ok("No notes found".to_string());
        }
        if offset > 0 && offset >= total {
            return Ok(format!("Offset {} exceeds total count {}", offset, total));
        }

        let take = if limit > 0 { limit } else { total };
        let page: Vec<&str> = notes
            .iter()
            .skip(offset)
            .take(take)
            .map(String::as_str)
            .collect();

        let mut out = format!("Found {} notes", total);
        if offset > 0 || limit > 0 {
            out.push_str(&format!(" (showing {}-{})", offset + 1, offset + page.len()));
        }
        out.push_str(":\n\n");
        out.push_str(&page.join("\n"));
        Ok(out)
    }

    /// Read a note's content
    pub async fn read_note(&self, path: &str) -> Result<String> {
        let path = self.ctx.require_note_path(path)?;
        self.ctx.store().read(Path::new(path)).await
    }

    /// Create or replace a note (creates directories as needed)
    #[instrument(skip(self, content), fields(file = %path), name = "tool_write_note")]
    pub async fn write_note(&self, path: &str, content: &str) -> Result<String> {
        self.ctx.ensure_writable("write_note")?;
        let path = self.ctx.require_note_path(path)?;
        self.ctx.store().write(Path::new(path), content).await?;
        Ok(format!("Successfully wrote: {}", path))
    }

    /// Delete a note
    #[instrument(skip(self), name = "tool_delete_note")]
    pub async fn delete_note(&self, path: &str) -> Result<String> {
        self.ctx.ensure_writable("delete_note")?;
        let path = self.ctx.require_note_path(path)?;
        self.ctx.store().delete(Path::new(path)).await?;
        log::info!("Deleted {}", path);
        Ok(format!("Successfully deleted: {}", path))
    }
}
