//! Tag extraction: inline `#tag` tokens plus frontmatter `tags`

use super::frontmatter_parser::{frontmatter_list, strip_frontmatter};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches #tag tokens (letters, digits, `_`, `-`)
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([a-zA-Z0-9_\-]+)").unwrap());

/// Inline tags in the body, in order of appearance (may repeat)
pub fn inline_tags(body: &str) -> Vec<String> {
    TAG_PATTERN
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Every tag on a note: frontmatter `tags` first, then inline body tags.
///
/// Case-sensitive, de-duplicated, order-preserving.
pub fn extract_tags(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    frontmatter_list(content, "tags")
        .into_iter()
        .map(|tag| tag.trim_start_matches('#').to_string())
        .chain(inline_tags(strip_frontmatter(content)))
        .filter(|tag| !tag.is_empty() && seen.insert(tag.clone()))
        .collect()
}
