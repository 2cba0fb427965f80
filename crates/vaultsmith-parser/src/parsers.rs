//! Regex-based note model parsers

mod frontmatter_parser;
mod headings;
mod tags;
mod tasks;
mod wikilinks;

pub use self::frontmatter_parser::{
    FRONTMATTER_MARKER, Frontmatter, FrontmatterSpan, frontmatter_lines, frontmatter_list,
    is_continuation, is_frontmatter_key, is_marker, locate_frontmatter, parse_frontmatter, split_inline_list,
    split_key_line, strip_frontmatter, unquote,
};
pub use self::headings::{Heading, extract_h1_title, parse_heading_line, parse_headings};
pub use self::tags::{extract_tags, inline_tags};
pub use self::tasks::{Task, TaskPriority, parse_task_line, parse_tasks};
pub use self::wikilinks::extract_wikilinks;
