//! Read-only vault scans: substring search, tag search, task listing

use crate::context::{ToolContext, optional_dir, read_for_scan, require};
use std::fmt::Write;
use std::path::Path;
use std::str::FromStr;
use vaultsmith_core::prelude::*;
use vaultsmith_parser::{Task, extract_tags, parse_tasks};
use vaultsmith_vault::truncate_line;

/// Longest line excerpt shown in search results
const EXCERPT_CHARS: usize = 100;

/// Which tasks `list_tasks` reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Open,
    Completed,
}

impl TaskFilter {
    fn admits(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Open => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "open" => Ok(Self::Open),
            "completed" => Ok(Self::Completed),
            other => Err(Error::validation_error(format!(
                "Invalid status '{}'. Use: all, open or completed",
                other
            ))),
        }
    }
}

/// Split a comma-separated tag list, dropping `#` and empty items
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().trim_start_matches('#').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Search tools context
#[derive(Clone)]
pub struct SearchTools {
    ctx: ToolContext,
}

impl SearchTools {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Every (path, content) under `directory`, in path order
    async fn scan(&self, directory: Option<&str>, scan: &str) -> Result<Vec<(String, String)>> {
        let store = self.ctx.store();
        let mut notes = Vec::new();
        for path in store.list(optional_dir(directory).map(Path::new)).await? {
            if let Some(content) = read_for_scan(&**store, &path, scan).await {
                notes.push((path, content));
            }
        }
        Ok(notes)
    }

    /// Lines containing `query`, case-insensitively, grouped by note
    pub async fn search_vault(&self, query: &str, directory: Option<&str>) -> Result<String> {
        let query = require(query, "query")?;
        let needle = query.to_lowercase();

        let mut hits: Vec<(String, Vec<String>)> = Vec::new();
        for (path, content) in self.scan(directory, "search").await? {
            let lines: Vec<String> = content
                .split('\n')
                .enumerate()
                .filter(|(_, line)| line.to_lowercase().contains(&needle))
                .map(|(idx, line)| format!("L{}: {}", idx + 1, truncate_line(line.trim(), EXCERPT_CHARS)))
                .collect();
            if !lines.is_empty() {
                hits.push((path, lines));
            }
        }

        if hits.is_empty() {
            return Ok(format!("No matches found for: {}", query));
        }

        let total: usize = hits.iter().map(|(_, lines)| lines.len()).sum();
        let mut out = format!(
            "Found {} matches in {} notes for {:?}:\n\n",
            total,
            hits.len(),
            query
        );
        for (path, lines) in &hits {
            let _ = writeln!(out, "## {}", path);
            for line in lines {
                let _ = writeln!(out, "  {}", line);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Notes carrying every tag in the comma-separated `tags`
    pub async fn search_by_tags(&self, tags: &str, directory: Option<&str>) -> Result<String> {
        let wanted = parse_tag_list(require(tags, "tags")?);
        if wanted.is_empty() {
            return Err(Error::validation_error("tags is required"));
        }
        let label = wanted.join(", ");

        let mut found: Vec<(String, Vec<String>)> = Vec::new();
        for (path, content) in self.scan(directory, "tag search").await? {
            let note_tags = extract_tags(&content);
            let has_all = wanted
                .iter()
                .all(|w| note_tags.iter().any(|t| t.eq_ignore_ascii_case(w)));
            if has_all {
                found.push((path, note_tags));
            }
        }

        if found.is_empty() {
            return Ok(format!("No notes found with tags: {}", label));
        }

        let mut out = format!("Found {} notes with tags: {}\n\n", found.len(), label);
        for (path, note_tags) in &found {
            let _ = writeln!(out, "- {} (tags: {})", path, note_tags.join(", "));
        }
        Ok(out)
    }

    /// Checkbox tasks across the vault, grouped by note
    pub async fn list_tasks(&self, status: Option<&str>, directory: Option<&str>) -> Result<String> {
        let filter = status.map(TaskFilter::from_str).transpose()?.unwrap_or_default();

        let mut found: Vec<(String, Vec<Task>)> = Vec::new();
        for (path, content) in self.scan(directory, "task listing").await? {
            let tasks: Vec<Task> = parse_tasks(&content)
                .into_iter()
                .filter(|t| filter.admits(t))
                .collect();
            if !tasks.is_empty() {
                found.push((path, tasks));
            }
        }

        let total: usize = found.iter().map(|(_, tasks)| tasks.len()).sum();
        if total == 0 {
            return Ok("No tasks found".to_string());
        }

        let mut out = format!("Found {} tasks:\n\n", total);
        for (idx, (path, tasks)) in found.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "## {}", path);
            for task in tasks {
                let checkbox = if task.completed { "[x]" } else { "[ ]" };
                let _ = write!(out, "  L{}: - {} {}", task.line, checkbox, task.text);
                if let Some(priority) = task.priority {
                    let _ = write!(out, " [{}]", priority);
                }
                if let Some(due) = &task.due_date {
                    let _ = write!(out, " (due: {})", due);
                }
                out.push('\n');
            }
        }
        Ok(out)
    }
}
