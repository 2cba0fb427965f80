//! Wikilink extraction: `[[Note]]`, `[[folder/Note|Alias]]`

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches [[target]] and [[target|alias]]; the alias is not captured
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").unwrap());

/// Unique wikilink targets in first-seen order.
///
/// Targets are trimmed and compared exactly as written.
pub fn extract_wikilinks(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WIKILINK_PATTERN
        .captures_iter(content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|target| seen.insert(target.clone()))
        .collect()
}
