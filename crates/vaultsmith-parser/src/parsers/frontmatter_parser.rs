//! Frontmatter block location and line-oriented scalar parsing.
//!
//! A block is present when the first line is the `---` marker and a later
//! line is the marker again. Trailing whitespace (including `\r`) on marker
//! lines is ignored.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Line that opens and closes a frontmatter block
pub const FRONTMATTER_MARKER: &str = "---";

/// Matches `key: value` on a trimmed line
static KEY_VALUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_-]*)\s*:\s*(.*)$").unwrap());

/// A whole string that can stand as a frontmatter key
static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_-]*$").unwrap());

/// Whether `key` is a name the line parser recognises as a key
pub fn is_frontmatter_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Whether a raw line is a frontmatter marker
pub fn is_marker(line: &str) -> bool {
    line.trim_end() == FRONTMATTER_MARKER
}

/// Where the frontmatter block sits in a document.
///
/// Line indices refer to `content.split('\n')`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterSpan {
    /// Index of the closing marker line
    pub closing_line: usize,
    /// Byte offset just past the closing marker line and its newline
    pub end_offset: usize,
}

/// Locate the frontmatter block, if any
pub fn locate_frontmatter(content: &str) -> Option<FrontmatterSpan> {
    let mut offset = 0;
    for (idx, line) in content.split('\n').enumerate() {
        let line_end = offset + line.len();
        if idx == 0 {
            if !is_marker(line) {
                return None;
            }
        } else if is_marker(line) {
            let end_offset = (line_end + 1).min(content.len());
            return Some(FrontmatterSpan {
                closing_line: idx,
                end_offset,
            });
        }
        offset = line_end + 1;
    }
    None
}

/// Lines strictly between the two markers (empty when there is no block)
pub fn frontmatter_lines(content: &str) -> Vec<&str> {
    match locate_frontmatter(content) {
        Some(span) => content
            .split('\n')
            .skip(1)
            .take(span.closing_line - 1)
            .collect(),
        None => Vec::new(),
    }
}

/// Document content with any frontmatter block removed
pub fn strip_frontmatter(content: &str) -> &str {
    match locate_frontmatter(content) {
        Some(span) => &content[span.end_offset..],
        None => content,
    }
}

/// Scalar view of a frontmatter block.
///
/// Keys are lowercased; values are trimmed with surrounding quotes removed.
/// Entries keep document order and a repeated key keeps its first position
/// with the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    /// Value for a key (case-insensitive)
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Strip `"` and `'` from both ends of a trimmed value
pub fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Parse the frontmatter block into a scalar mapping.
///
/// Never fails: content without a block yields an empty mapping.
pub fn parse_frontmatter(content: &str) -> Frontmatter {
    let mut fm = Frontmatter::default();
    for line in frontmatter_lines(content) {
        if let Some(caps) = KEY_VALUE_PATTERN.captures(line.trim()) {
            fm.insert(caps[1].to_lowercase(), unquote(&caps[2]).to_string());
        }
    }
    fm
}

/// Split the key of a raw frontmatter line, if it has one.
///
/// Returns the lowercased key and the raw (untrimmed) value text.
pub fn split_key_line(line: &str) -> Option<(String, &str)> {
    // Indented lines belong to the preceding key
    if line.starts_with([' ', '\t']) {
        return None;
    }
    KEY_VALUE_PATTERN
        .captures(line.trim_end())
        .and_then(|caps| caps.get(1).zip(caps.get(2)))
        .map(|(k, v)| (k.as_str().to_lowercase(), v.as_str()))
}

/// Whether a frontmatter line continues the previous key (dash item or indent)
pub fn is_continuation(line: &str) -> bool {
    line.starts_with([' ', '\t']) || line.trim_start().starts_with("- ") || line.trim() == "-"
}

/// Parse a list-valued frontmatter key.
///
/// Handles inline `[a, b]`, an indented dash-list following the key, and a
/// comma-separated scalar. Items are unquoted; empty items are dropped.
pub fn frontmatter_list(content: &str, key: &str) -> Vec<String> {
    let lines = frontmatter_lines(content);
    let key = key.to_lowercase();

    let Some(idx) = lines
        .iter()
        .position(|line| split_key_line(line).is_some_and(|(k, _)| k == key))
    else {
        return Vec::new();
    };

    let value = split_key_line(lines[idx]).map(|(_, v)| v.trim()).unwrap_or("");
    if value.is_empty() {
        return lines[idx + 1..]
            .iter()
            .take_while(|line| is_continuation(line))
            .filter_map(|line| line.trim().strip_prefix('-'))
            .map(unquote)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
    }

    split_inline_list(value)
}

/// Items of an inline `[a, b]` list or a bare `a, b` scalar
pub fn split_inline_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    inner
        .split(',')
        .map(unquote)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_frontmatter() {
        let content = "---\ntitle: Test\n---\nContent here";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.get("title"), Some("Test"));
        assert_eq!(strip_frontmatter(content), "Content here");
    }

    #[test]
    fn test_keys_lowercased_values_unquoted() {
        let content = "---\nTitle: \"Quoted\"\nStatus: 'draft'\n---\n";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.get("title"), Some("Quoted"));
        assert_eq!(fm.get("STATUS"), Some("draft"));
        let keys: Vec<_> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "status"]);
    }

    #[test]
    fn test_dash_list_not_resolved_into_scalar() {
        let content = "---\ntitle: Test\ntags:\n  - rust\n  - parser\n---\nContent";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.len(), 2);
        assert_eq!(fm.get("tags"), Some(""));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just content\nNo frontmatter";
        assert!(parse_frontmatter(content).is_empty());
        assert_eq!(strip_frontmatter(content), content);
        assert!(locate_frontmatter(content).is_none());
    }

    #[test]
    fn test_malformed_frontmatter_only_opening() {
        let content = "---\ntitle: Test\nNo closing";
        assert!(parse_frontmatter(content).is_empty());
        assert!(locate_frontmatter(content).is_none());
    }

    #[test]
    fn test_truncated_inputs_do_not_panic() {
        for content in ["", "-", "---", "---\n", "---\n---", "---\r\n---\r\nbody"] {
            let _ = parse_frontmatter(content);
            let _ = strip_frontmatter(content);
            let _ = frontmatter_list(content, "tags");
        }
    }

    #[test]
    fn test_locate_span() {
        let content = "---\na: 1\n---\n\nbody";
        let span = locate_frontmatter(content).unwrap();
        assert_eq!(span.closing_line, 2);
        assert_eq!(&content[span.end_offset..], "\nbody");

        let content = "---\na: 1\n---";
        let span = locate_frontmatter(content).unwrap();
        assert_eq!(span.end_offset, content.len());
    }

    #[test]
    fn test_frontmatter_list_forms() {
        assert_eq!(
            frontmatter_list("---\ntags: [a, \"b\"]\n---\n", "tags"),
            vec!["a", "b"]
        );
        assert_eq!(
            frontmatter_list("---\ntags:\n  - one\n  - two\ntitle: x\n---\n", "tags"),
            vec!["one", "two"]
        );
        assert_eq!(
            frontmatter_list("---\ntags: x, y\n---\n", "TAGS"),
            vec!["x", "y"]
        );
        assert!(frontmatter_list("---\ntitle: x\n---\n", "tags").is_empty());
    }

    #[test]
    fn test_split_key_line() {
        assert_eq!(split_key_line("Tags: [a]"), Some(("tags".to_string(), "[a]")));
        assert_eq!(split_key_line("  - a"), None);
        assert_eq!(split_key_line("not a key"), None);
    }
}
