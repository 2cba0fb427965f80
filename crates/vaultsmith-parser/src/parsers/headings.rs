//! Heading parser: # H1, ## H2, etc.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Matches # Heading, ## Heading, etc. on a single line
    static ref HEADING_PATTERN: Regex = Regex::new(r"^(#{1,6})\s+(.+)$").unwrap();

    /// First `# Title` line; the separator may not span lines
    static ref H1_PATTERN: Regex = Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap();
}

/// A heading line within a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// 0-based index into `content.split('\n')`
    pub line: usize,
    /// Number of leading `#`
    pub level: usize,
    /// Trimmed heading text
    pub text: String,
}

/// Parse a single line as a heading
pub fn parse_heading_line(line: &str) -> Option<(usize, String)> {
    HEADING_PATTERN
        .captures(line)
        .map(|caps| (caps[1].len(), caps[2].trim().to_string()))
}

/// Parse all headings from content
pub fn parse_headings(content: &str) -> Vec<Heading> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            parse_heading_line(line).map(|(level, text)| Heading {
                line: idx,
                level,
                text,
            })
        })
        .collect()
}

/// Text of the first H1 line, or an empty string
pub fn extract_h1_title(content: &str) -> String {
    H1_PATTERN
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}
