//! Bulk tools: one change applied to many notes

use crate::context::{ToolContext, require};
use vaultsmith_batch::{BulkExecutor, BulkOperation, BulkResult, parse_paths};
use vaultsmith_core::prelude::*;
use vaultsmith_vault::frontmatter::{validate_key, validate_value};

/// Bulk tools context
#[derive(Clone)]
pub struct BulkTools {
    ctx: ToolContext,
    executor: BulkExecutor,
}

impl BulkTools {
    pub fn new(ctx: ToolContext) -> Self {
        let executor = BulkExecutor::new(ctx.store().clone());
        Self { ctx, executor }
    }

    fn paths(&self, raw: &str) -> Result<Vec<String>> {
        let raw = require(raw, "paths")?;
        Ok(parse_paths(raw, self.ctx.store().note_extension()))
    }

    /// Move notes into `destination`, optionally refreshing links to them
    pub async fn bulk_move(
        &self,
        paths: &str,
        destination: &str,
        update_links: bool,
    ) -> Result<BulkResult> {
        self.ctx.ensure_writable("bulk_move")?;
        let destination = require(destination, "destination")?;
        let op = BulkOperation::Move {
            destination: destination.to_string(),
            update_links,
        };
        self.executor.execute(op, &self.paths(paths)?).await
    }

    /// Set one frontmatter key on every listed note
    pub async fn bulk_set_frontmatter(
        &self,
        paths: &str,
        key: &str,
        value: &str,
    ) -> Result<BulkResult> {
        self.ctx.ensure_writable("bulk_set_frontmatter")?;
        let op = BulkOperation::SetFrontmatter {
            key: validate_key(key)?.to_string(),
            value: validate_value(value)?.to_string(),
        };
        self.executor.execute(op, &self.paths(paths)?).await
    }

    /// Add (`action = "add"`) or remove (`"remove"`) a tag on every listed note
    pub async fn bulk_tag(&self, paths: &str, tag: &str, action: &str) -> Result<BulkResult> {
        self.ctx.ensure_writable("bulk_tag")?;
        let op = BulkOperation::tag(action.trim(), tag.trim())?;
        self.executor.execute(op, &self.paths(paths)?).await
    }
}
