//! Line-based frontmatter mutation.
//!
//! Every function takes the whole document and returns the whole document.
//! Lines outside the touched key are carried over byte-for-byte; the block is
//! never re-serialized.

use vaultsmith_core::{Error, Result};
use vaultsmith_parser::{
    FRONTMATTER_MARKER, is_continuation, is_frontmatter_key, locate_frontmatter,
    split_inline_list, split_key_line, unquote,
};

/// Check a caller-supplied key before it reaches the mutator.
///
/// Only keys the line parser can find again are accepted, so that set, remove
/// and append all address the same line. Returns the trimmed key.
pub fn validate_key(key: &str) -> Result<&str> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::validation_error("key is required"));
    }
    if !is_frontmatter_key(key) {
        return Err(Error::validation_error(format!(
            "Invalid frontmatter key: {:?} (letters, digits, '_' and '-', not starting with a digit or '-')",
            key
        )));
    }
    Ok(key)
}

/// Check a caller-supplied value: it must fit on the key's line. Returns it trimmed.
pub fn validate_value(value: &str) -> Result<&str> {
    if value.contains(['\n', '\r']) {
        return Err(Error::validation_error("value must be a single line"));
    }
    Ok(value.trim())
}

/// A document split into lines with its frontmatter bounds
struct Blocked<'a> {
    lines: Vec<&'a str>,
    /// Index of the closing marker
    closing: usize,
}

impl<'a> Blocked<'a> {
    fn split(content: &'a str) -> Option<Self> {
        let span = locate_frontmatter(content)?;
        Some(Self {
            lines: content.split('\n').collect(),
            closing: span.closing_line,
        })
    }

    /// Index of the first line owning `key`
    fn key_line(&self, key: &str) -> Option<usize> {
        (1..self.closing).find(|&i| split_key_line(self.lines[i]).is_some_and(|(k, _)| k == key))
    }

    /// One past the last continuation line following `idx`
    fn continuation_end(&self, idx: usize) -> usize {
        let mut end = idx + 1;
        while end < self.closing && is_continuation(self.lines[end]) {
            end += 1;
        }
        end
    }

    fn splice(&self, range: std::ops::Range<usize>, replacement: &[String]) -> String {
        let mut out: Vec<&str> = Vec::with_capacity(self.lines.len() + replacement.len());
        out.extend_from_slice(&self.lines[..range.start]);
        out.extend(replacement.iter().map(String::as_str));
        out.extend_from_slice(&self.lines[range.end..]);
        out.join("\n")
    }
}

fn new_block(inner: &[String], content: &str) -> String {
    format!(
        "{marker}\n{}\n{marker}\n\n{}",
        inner.join("\n"),
        content,
        marker = FRONTMATTER_MARKER
    )
}

/// Set `key` to a scalar `value`.
///
/// The key is lowercased. An existing key keeps its position and loses any
/// list items it owned; a missing key is added before the closing marker; a
/// document without a block gets one.
pub fn set_frontmatter_key(content: &str, key: &str, value: &str) -> String {
    let key = key.to_lowercase();
    let line = vec![format!("{}: {}", key, value)];

    let Some(doc) = Blocked::split(content) else {
        return new_block(&line, content);
    };

    match doc.key_line(&key) {
        Some(idx) => doc.splice(idx..doc.continuation_end(idx), &line),
        None => doc.splice(doc.closing..doc.closing, &line),
    }
}

/// Remove `key` and the lines it owns.
///
/// When nothing but blank lines is left the whole block goes, and the body
/// loses its leading blank lines. Returns the new content and whether the
/// key was present.
pub fn remove_frontmatter_key(content: &str, key: &str) -> (String, bool) {
    let key = key.to_lowercase();
    let Some(doc) = Blocked::split(content) else {
        return (content.to_string(), false);
    };
    let Some(idx) = doc.key_line(&key) else {
        return (content.to_string(), false);
    };
    let end = doc.continuation_end(idx);

    let block_empty = (1..doc.closing)
        .filter(|i| !(idx..end).contains(i))
        .all(|i| doc.lines[i].trim().is_empty());

    if block_empty {
        let body: Vec<&str> = doc.lines[doc.closing + 1..]
            .iter()
            .copied()
            .skip_while(|line| line.trim().is_empty())
            .collect();
        return (body.join("\n"), true);
    }

    (doc.splice(idx..end, &[]), true)
}

/// Append `value` to a list-valued `key`, converting it to dash-list form.
///
/// Inline `[a, b]` lists and scalars are rewritten as dash-lists first. A
/// missing key is created; a document without a block gets one.
pub fn add_to_frontmatter_array(content: &str, key: &str, value: &str) -> String {
    let key = key.to_lowercase();
    let item = |v: &str| format!("  - {}", v);

    let Some(doc) = Blocked::split(content) else {
        return new_block(&[format!("{}:", key), item(value)], content);
    };

    let Some(idx) = doc.key_line(&key) else {
        return doc.splice(
            doc.closing..doc.closing,
            &[format!("{}:", key), item(value)],
        );
    };

    let end = doc.continuation_end(idx);
    let existing = split_key_line(doc.lines[idx])
        .map(|(_, v)| v.trim())
        .unwrap_or("");

    if existing.is_empty() {
        // Already a dash-list (or an empty key): append after the last item
        return doc.splice(end..end, &[item(value)]);
    }

    let mut items: Vec<String> = if existing.starts_with('[') && existing.ends_with(']') {
        split_inline_list(existing)
    } else {
        vec![unquote(existing).to_string()]
    };
    items.push(value.to_string());

    let mut replacement = vec![format!("{}:", key)];
    replacement.extend(items.iter().map(|v| item(v)));
    doc.splice(idx..end, &replacement)
}
