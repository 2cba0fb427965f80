//! Find/replace and heading-scoped section replacement.
//!
//! Both engines read the document once, build the new content in memory and
//! write it back once. The pure halves ([`replace_text`], [`replace_section`])
//! never touch storage and are what the async [`EditEngine`] drives.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;
use unicode_normalization::UnicodeNormalization;
use vaultsmith_core::{Error, Result};
use vaultsmith_parser::parse_heading_line;

use crate::context::{context_for_replacement, render_edit_context};
use crate::store::DocumentStore;

/// Outcome of a pure text replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub content: String,
    pub replaced: usize,
}

/// Replace `old_text` in `content`.
///
/// `old_text` must occur exactly once unless `replace_all` is set. `path` is
/// only used in error messages.
pub fn replace_text(
    path: &str,
    content: &str,
    old_text: &str,
    new_text: &str,
    replace_all: bool,
) -> Result<Replacement> {
    if old_text.is_empty() {
        return Err(Error::validation_error("old_text must not be empty"));
    }

    let count = content.matches(old_text).count();
    if count == 0 {
        return Err(Error::conflict(format!("old_text not found in {}", path)));
    }
    if count > 1 && !replace_all {
        return Err(Error::conflict(format!(
            "Found {} occurrences of old_text in {}. Use replace_all=true to replace all, or provide more context to match uniquely.",
            count, path
        )));
    }

    let content = if replace_all {
        content.replace(old_text, new_text)
    } else {
        content.replacen(old_text, new_text, 1)
    };
    Ok(Replacement {
        content,
        replaced: count,
    })
}

/// Splice `replacement` over `len` bytes at `pos`
pub fn replace_at(content: &str, pos: usize, len: usize, replacement: &str) -> String {
    let mut result = String::with_capacity(content.len() + replacement.len());
    result.push_str(&content[..pos]);
    result.push_str(replacement);
    result.push_str(&content[pos + len..]);
    result
}

/// Outcome of a pure section replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReplacement {
    pub content: String,
    /// Line index of the first line after the heading
    pub content_start: usize,
    /// Lines removed from the old section body
    pub lines_replaced: usize,
    /// Lines written in their place (blank lead and trail included)
    pub new_lines: Vec<String>,
}

/// Replace the body under `heading` with `section`.
///
/// The section runs from the first heading whose text equals `heading`
/// (case-insensitively) to the next heading of the same or higher level. The
/// new body is framed by one blank line on each side.
pub fn replace_section(
    path: &str,
    content: &str,
    heading: &str,
    section: &str,
) -> Result<SectionReplacement> {
    let lines: Vec<&str> = content.split('\n').collect();
    let wanted = heading.to_lowercase();

    let mut start: Option<(usize, usize)> = None;
    let mut end = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let Some((level, text)) = parse_heading_line(line) else {
            continue;
        };
        match start {
            None if text.to_lowercase() == wanted => start = Some((i, level)),
            Some((_, section_level)) if level <= section_level => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    let Some((heading_line, _)) = start else {
        return Err(Error::conflict(format!(
            "Heading '{}' not found in {}",
            heading, path
        )));
    };

    let content_start = heading_line + 1;
    let normalized = section.trim_end_matches('\n');
    let new_lines: Vec<String> = format!("\n{}\n", normalized)
        .split('\n')
        .map(str::to_string)
        .collect();

    let mut result: Vec<&str> = Vec::with_capacity(lines.len() + new_lines.len());
    result.extend_from_slice(&lines[..content_start]);
    result.extend(new_lines.iter().map(String::as_str));
    result.extend_from_slice(&lines[end..]);

    Ok(SectionReplacement {
        content: result.join("\n"),
        content_start,
        lines_replaced: end - content_start,
        new_lines,
    })
}

/// Compute SHA-256 hash of content (with Unicode NFC normalization)
pub fn compute_hash(content: &str) -> String {
    let normalized: String = content.nfc().collect();
    let hash = Sha256::digest(normalized.as_bytes());
    format!("{:x}", hash)
}

/// Result of a written edit
#[derive(Debug, Clone, Serialize)]
pub struct EditOutcome {
    /// Vault-relative path that was written
    pub path: String,
    /// Human-readable summary, with the context excerpt when requested
    pub message: String,
    /// Occurrences, sections or edits applied
    pub applied: usize,
    /// Hash of the content before the edit
    pub old_hash: String,
    /// Hash of the content written
    pub new_hash: String,
}

impl EditOutcome {
    pub fn new(path: &str, message: String, applied: usize, old: &str, new: &str) -> Self {
        Self {
            path: path.to_string(),
            message,
            applied,
            old_hash: compute_hash(old),
            new_hash: compute_hash(new),
        }
    }
}

/// Single-edit and section engines over a document store
#[derive(Clone)]
pub struct EditEngine {
    store: Arc<dyn DocumentStore>,
}

impl EditEngine {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Find and replace within one note, then write it back
    #[instrument(skip(self, old_text, new_text), fields(file = %path), name = "edit_replace_text")]
    pub async fn replace_text(
        &self,
        path: &str,
        old_text: &str,
        new_text: &str,
        replace_all: bool,
        context_lines: usize,
    ) -> Result<EditOutcome> {
        let original = self.store.read(Path::new(path)).await?;
        let replacement = replace_text(path, &original, old_text, new_text, replace_all)?;
        self.store.write(Path::new(path), &replacement.content).await?;

        log::info!("Replaced {} occurrence(s) in {}", replacement.replaced, path);

        let mut message = format!("Replaced {} occurrence(s) in {}", replacement.replaced, path);
        if context_lines > 0
            && let Some(excerpt) =
                context_for_replacement(&replacement.content, new_text, context_lines)
        {
            message.push_str("\n\n--- Context ---\n");
            message.push_str(&excerpt);
        }

        Ok(EditOutcome::new(
            path,
            message,
            replacement.replaced,
            &original,
            &replacement.content,
        ))
    }

    /// Replace the body under a heading, then write it back
    #[instrument(skip(self, section), fields(file = %path), name = "edit_replace_section")]
    pub async fn replace_section(
        &self,
        path: &str,
        heading: &str,
        section: &str,
        context_lines: usize,
    ) -> Result<EditOutcome> {
        let original = self.store.read(Path::new(path)).await?;
        let replaced = replace_section(path, &original, heading, section)?;
        self.store.write(Path::new(path), &replaced.content).await?;

        let mut message = format!(
            "Replaced section '{}' in {} ({} lines replaced with {} lines)",
            heading,
            path,
            replaced.lines_replaced,
            replaced.new_lines.len()
        );
        log::info!("{}", message);

        if context_lines > 0 {
            let lines: Vec<&str> = replaced.content.split('\n').collect();
            let inserted: Vec<&str> = replaced.new_lines.iter().map(String::as_str).collect();
            let end = (replaced.content_start + inserted.len()).min(lines.len());
            message.push_str("\n\n--- Context ---\n");
            message.push_str(&render_edit_context(
                &lines,
                replaced.content_start,
                end,
                context_lines,
                &inserted,
            ));
        }

        Ok(EditOutcome::new(path, message, 1, &original, &replaced.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_replacement_changes_length_by_delta() {
        let content = "alpha beta gamma";
        let result = replace_text("n.md", content, "beta", "BETA!", false).unwrap();
        assert_eq!(result.content, "alpha BETA! gamma");
        assert_eq!(result.replaced, 1);
        assert_eq!(result.content.len(), content.len() + 5 - 4);
    }

    #[test]
    fn test_not_found() {
        let err = replace_text("n.md", "abc", "zzz", "y", false).unwrap_err();
        assert_eq!(err.to_string(), "old_text not found in n.md");
    }

    #[test]
    fn test_ambiguous_without_replace_all() {
        let err = replace_text("n.md", "a a a", "a", "b", false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Found 3 occurrences of old_text in n.md. Use replace_all=true to replace all, or provide more context to match uniquely."
        );
    }

    #[test]
    fn test_replace_all() {
        let result = replace_text("n.md", "a a a", "a", "b", true).unwrap();
        assert_eq!(result.content, "b b b");
        assert_eq!(result.replaced, 3);
    }

    #[test]
    fn test_empty_old_text_rejected() {
        let result = replace_text("n.md", "abc", "", "x", true);
        assert!(matches!(result, Err(Error::ValidationError { .. })));
    }

    #[test]
    fn test_replace_at() {
        assert_eq!(replace_at("hello world", 6, 5, "there"), "hello there");
    }

    #[test]
    fn test_section_stops_at_same_level() {
        let content = "# H\n\nold line\n\n## Sub\nkeep";
        let result = replace_section("n.md", content, "H", "new line").unwrap();
        assert_eq!(result.content, "# H\n\nnew line\n");
        assert_eq!(result.lines_replaced, 5);
        assert_eq!(result.new_lines.len(), 3);
    }

    #[test]
    fn test_section_keeps_following_sibling() {
        let content = "# Doc\n## A\nold\n## B\nkeep";
        let result = replace_section("n.md", content, "a", "fresh\n\n").unwrap();
        assert_eq!(result.content, "# Doc\n## A\n\nfresh\n\n## B\nkeep");
        assert_eq!(result.lines_replaced, 1);
    }

    #[test]
    fn test_section_missing_heading() {
        let err = replace_section("n.md", "# A\ntext", "B", "x").unwrap_err();
        assert_eq!(err.to_string(), "Heading 'B' not found in n.md");
    }

    #[test]
    fn test_section_read_back_is_normalized_content() {
        let content = "intro\n## Tasks\n- a\n- b\n## Done\n- c";
        let result = replace_section("n.md", content, "Tasks", "- x\n- y\n").unwrap();
        let again = replace_section("n.md", &result.content, "Tasks", "- x\n- y").unwrap();
        assert_eq!(result.content, again.content);
        assert!(result.content.contains("## Tasks\n\n- x\n- y\n\n## Done"));
    }

    #[test]
    fn test_hash_computation() {
        let hash1 = compute_hash("test content");
        let hash2 = compute_hash("test content");
        let hash3 = compute_hash("different");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_unicode_normalization_in_hash() {
        // café as precomposed vs decomposed
        let precomposed = "caf\u{00E9}";
        let decomposed = "caf\u{0065}\u{0301}";

        assert_eq!(compute_hash(precomposed), compute_hash(decomposed));
    }
}
