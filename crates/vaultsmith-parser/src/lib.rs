//! # vaultsmith parser
//!
//! Pure functions over raw note text. Nothing here touches the filesystem and
//! nothing here fails: malformed or truncated input yields an empty result.
//!
//! - Wikilinks: `[[Note]]` and `[[Note|Alias]]` targets, unique, first-seen order
//! - H1 title: the first `# Title` line
//! - Tags: frontmatter `tags` (inline list, dash-list or comma scalar) plus
//!   inline `#tag` tokens from the body
//! - Frontmatter: line-oriented `key: value` scalars with lowercased keys
//! - Headings: level and text for every `#`..`######` line
//! - Tasks: `- [ ]` / `- [x]` checkboxes with due date, priority and tags
//!
//! ## Quick Start
//!
//! ```
//! use vaultsmith_parser::ParsedNote;
//!
//! let content = "---\ntags: [moc]\nstatus: draft\n---\n\n# Index\n\nSee [[Alpha]] and [[Beta|b]] #review";
//! let note = ParsedNote::parse(content);
//!
//! assert_eq!(note.title, "Index");
//! assert_eq!(note.links, vec!["Alpha", "Beta"]);
//! assert_eq!(note.tags, vec!["moc", "review"]);
//! assert_eq!(note.frontmatter.get("status"), Some("draft"));
//! assert!(note.is_moc());
//! ```
//!
//! ### Individual Parsers
//!
//! ```
//! use vaultsmith_parser::{extract_wikilinks, parse_headings};
//!
//! let headings = parse_headings("# A\n## B");
//! assert_eq!(headings[1].level, 2);
//! assert_eq!(extract_wikilinks("[[x]] [[x]]"), vec!["x"]);
//! ```

pub mod parsers;

pub use parsers::*;

use serde::Serialize;

/// Tag that marks a note as a map of content
pub const MOC_TAG: &str = "moc";

/// Everything the note model exposes about one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedNote {
    pub title: String,
    pub links: Vec<String>,
    pub tags: Vec<String>,
    pub frontmatter: Frontmatter,
    pub headings: Vec<Heading>,
}

impl ParsedNote {
    /// Run every parser over `content`
    pub fn parse(content: &str) -> Self {
        Self {
            title: extract_h1_title(content),
            links: extract_wikilinks(content),
            tags: extract_tags(content),
            frontmatter: parse_frontmatter(content),
            headings: parse_headings(content),
        }
    }

    /// Whether the note carries the `moc` tag (any case)
    pub fn is_moc(&self) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(MOC_TAG))
    }

    /// Whether the note links to `name` (case-insensitive, alias-free target)
    pub fn links_to(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.links.iter().any(|l| l.to_lowercase() == name)
    }
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::ParsedNote;
    pub use crate::parsers::{
        Frontmatter, Heading, extract_h1_title, extract_tags, extract_wikilinks,
        parse_frontmatter, parse_headings,
    };
}
