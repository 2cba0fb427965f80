//! Link tools: backlinks, link-preserving rename, map-of-content discovery

use crate::context::{ToolContext, optional_dir, read_for_scan, require};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use vaultsmith_core::prelude::*;
use vaultsmith_parser::ParsedNote;
use vaultsmith_vault::LinkRewriter;
use vaultsmith_vault::store::note_basename;

/// A note tagged `#moc`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MocEntry {
    pub path: String,
    /// First H1, or the file stem when there is none
    pub title: String,
    pub tags: Vec<String>,
    pub linked_notes: Vec<String>,
}

/// Link tools context
#[derive(Clone)]
pub struct LinkTools {
    ctx: ToolContext,
    links: LinkRewriter,
}

impl LinkTools {
    pub fn new(ctx: ToolContext) -> Self {
        let links = LinkRewriter::new(ctx.store().clone());
        Self { ctx, links }
    }

    /// Notes linking to `target`, with line-numbered context
    pub async fn get_backlinks(&self, target: &str) -> Result<String> {
        let target = require(target, "path")?;
        let found = self.links.backlinks(target).await?;
        if found.is_empty() {
            return Ok(format!("No backlinks found for: {}", target));
        }

        let mut out = format!("Found {} notes linking to {}:\n\n", found.len(), target);
        for backlink in &found {
            let _ = writeln!(out, "## {} ({} links)", backlink.path, backlink.count);
            for line in &backlink.context {
                let _ = writeln!(out, "  {}", line);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Rename a note and repoint every link at it
    pub async fn rename_note(&self, old_path: &str, new_path: &str) -> Result<String> {
        self.ctx.ensure_writable("rename_note")?;
        let old_path = require(old_path, "old_path")?;
        let new_path = require(new_path, "new_path")?;
        let report = self.links.rename_note(old_path, new_path).await?;
        Ok(report.message())
    }

    /// Every note carrying the `moc` tag, in path order
    pub async fn find_mocs(&self, directory: Option<&str>) -> Result<Vec<MocEntry>> {
        let store = self.ctx.store();
        let ext = store.note_extension();

        let mut mocs = Vec::new();
        for path in store.list(optional_dir(directory).map(Path::new)).await? {
            let Some(content) = read_for_scan(&**store, &path, "MOC discovery").await else {
                continue;
            };

            let note = ParsedNote::parse(&content);
            if !note.is_moc() {
                continue;
            }
            let title = if note.title.is_empty() {
                note_basename(&path, ext).to_string()
            } else {
                note.title
            };
            mocs.push(MocEntry {
                path,
                title,
                tags: note.tags,
                linked_notes: note.links,
            });
        }
        Ok(mocs)
    }

    /// Markdown listing of [`LinkTools::find_mocs`]
    pub async fn discover_mocs(&self, directory: Option<&str>) -> Result<String> {
        Ok(render_mocs(&self.find_mocs(directory).await?))
    }
}

/// Render MOC entries as a markdown report
pub fn render_mocs(mocs: &[MocEntry]) -> String {
    if mocs.is_empty() {
        return "No MOCs found (notes with #moc tag)".to_string();
    }

    let mut out = format!("Found {} MOCs:\n\n", mocs.len());
    for moc in mocs {
        let _ = writeln!(out, "## {}", moc.title);
        let _ = writeln!(out, "Path: {}", moc.path);
        let _ = writeln!(out, "Tags: {}", moc.tags.join(", "));
        if !moc.linked_notes.is_empty() {
            let _ = writeln!(
                out,
                "Links ({}): {}",
                moc.linked_notes.len(),
                moc.linked_notes.join(", ")
            );
        }
        out.push('\n');
    }
    out
}
