//! Frontmatter tools: read, query, and single-note mutation

use crate::context::{ToolContext, optional_dir, read_for_scan, require};
use std::fmt::Write;
use std::path::Path;
use tracing::instrument;
use vaultsmith_core::prelude::*;
use vaultsmith_parser::{Frontmatter, parse_frontmatter};
use vaultsmith_vault::frontmatter::{
    add_to_frontmatter_array, remove_frontmatter_key, set_frontmatter_key, validate_key,
    validate_value,
};

/// A `key=value` or `key:value` frontmatter query.
///
/// Both sides are lowercased; a note matches when its value for `key`
/// contains `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterQuery {
    pub key: String,
    pub value: String,
}

impl FrontmatterQuery {
    /// Parse `key=value`, falling back to `key:value`
    pub fn parse(query: &str) -> Result<Self> {
        let split = query
            .find('=')
            .filter(|&idx| idx > 0)
            .or_else(|| query.find(':').filter(|&idx| idx > 0));

        match split {
            Some(idx) => Ok(Self {
                key: query[..idx].trim().to_lowercase(),
                value: query[idx + 1..].trim().to_lowercase(),
            }),
            None => Err(Error::validation_error(
                "Invalid query format. Use: key=value or key:value",
            )),
        }
    }

    pub fn matches(&self, frontmatter: &Frontmatter) -> bool {
        frontmatter
            .get(&self.key)
            .is_some_and(|v| v.to_lowercase().contains(&self.value))
    }
}

/// Metadata tools context
#[derive(Clone)]
pub struct MetadataTools {
    ctx: ToolContext,
}

impl MetadataTools {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Frontmatter of one note as `key: value` lines in document order
    pub async fn get_frontmatter(&self, path: &str) -> Result<String> {
        let path = self.ctx.require_note_path(path)?;
        let content = self.ctx.store().read(Path::new(path)).await?;

        let frontmatter = parse_frontmatter(&content);
        if frontmatter.is_empty() {
            return Ok(format!("No frontmatter found in: {}", path));
        }

        let mut out = format!("Frontmatter for {}:\n\n", path);
        for (key, value) in frontmatter.iter() {
            let _ = writeln!(out, "{}: {}", key, value);
        }
        Ok(out)
    }

    /// Notes whose frontmatter matches `query`, optionally under a directory
    pub async fn query_frontmatter(&self, query: &str, directory: Option<&str>) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation_error(
                "query is required (format: key=value or key:value)",
            ));
        }
        let parsed = FrontmatterQuery::parse(query)?;

        let store = self.ctx.store();
        let mut found: Vec<(String, Frontmatter)> = Vec::new();
        for path in store.list(optional_dir(directory).map(Path::new)).await? {
            let Some(content) = read_for_scan(&**store, &path, "frontmatter query").await
            else {
                continue;
            };
            let frontmatter = parse_frontmatter(&content);
            if parsed.matches(&frontmatter) {
                found.push((path, frontmatter));
            }
        }

        if found.is_empty() {
            return Ok(format!("No notes found matching: {}", query));
        }

        let mut out = format!("Found {} notes matching {:?}:\n\n", found.len(), query);
        for (path, frontmatter) in &found {
            let _ = writeln!(out, "## {}", path);
            for (key, value) in frontmatter.iter() {
                let _ = writeln!(out, "  {}: {}", key, value);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Set a scalar key, creating the frontmatter block when absent
    #[instrument(skip(self, value), fields(file = %path), name = "tool_set_frontmatter")]
    pub async fn set_frontmatter(&self, path: &str, key: &str, value: &str) -> Result<String> {
        self.ctx.ensure_writable("set_frontmatter")?;
        let path = self.ctx.require_note_path(path)?;
        let key = validate_key(key)?;
        let value = validate_value(value)?;

        let content = self.ctx.store().read(Path::new(path)).await?;
        let updated = set_frontmatter_key(&content, key, value);
        if updated != content {
            self.ctx.store().write(Path::new(path), &updated).await?;
        }
        Ok(format!("Set {}: {} in {}", key, value, path))
    }

    /// Remove a key; the block disappears with its last key
    #[instrument(skip(self), name = "tool_remove_frontmatter")]
    pub async fn remove_frontmatter(&self, path: &str, key: &str) -> Result<String> {
        self.ctx.ensure_writable("remove_frontmatter")?;
        let path = self.ctx.require_note_path(path)?;
        let key = validate_key(key)?;

        let content = self.ctx.store().read(Path::new(path)).await?;
        let (updated, removed) = remove_frontmatter_key(&content, key);
        if !removed {
            return Ok(format!("Key '{}' not found in: {}", key, path));
        }
        self.ctx.store().write(Path::new(path), &updated).await?;
        Ok(format!("Removed {} from {}", key, path))
    }

    /// Append a value to a list key, converting scalar or inline forms
    #[instrument(skip(self, value), fields(file = %path), name = "tool_add_to_frontmatter_array")]
    pub async fn add_to_frontmatter_array(
        &self,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<String> {
        self.ctx.ensure_writable("add_to_frontmatter_array")?;
        let path = self.ctx.require_note_path(path)?;
        let key = validate_key(key)?;
        let value = require(validate_value(value)?, "value")?;

        let content = self.ctx.store().read(Path::new(path)).await?;
        let updated = add_to_frontmatter_array(&content, key, value);
        self.ctx.store().write(Path::new(path), &updated).await?;
        Ok(format!("Added {} to {} in {}", value, key, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_forms() {
        let eq = FrontmatterQuery::parse("Status = Draft").unwrap();
        assert_eq!(eq.key, "status");
        assert_eq!(eq.value, "draft");

        let colon = FrontmatterQuery::parse("type:project").unwrap();
        assert_eq!(colon.key, "type");
        assert_eq!(colon.value, "project");
    }

    #[test]
    fn test_parse_query_prefers_equals() {
        let q = FrontmatterQuery::parse("url=https://example.com").unwrap();
        assert_eq!(q.key, "url");
        assert_eq!(q.value, "https://example.com");
    }

    #[test]
    fn test_parse_query_invalid() {
        for bad in ["status", "=draft", ":draft"] {
            assert_eq!(
                FrontmatterQuery::parse(bad).unwrap_err().to_string(),
                "Invalid query format. Use: key=value or key:value"
            );
        }
    }

    #[test]
    fn test_query_matches_case_insensitive_substring() {
        let fm = parse_frontmatter("---\nStatus: In Review\n---\n");
        assert!(FrontmatterQuery::parse("status=review").unwrap().matches(&fm));
        assert!(!FrontmatterQuery::parse("status=done").unwrap().matches(&fm));
        assert!(!FrontmatterQuery::parse("owner=x").unwrap().matches(&fm));
    }
}
