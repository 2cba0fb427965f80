//! Adding and removing a tag on one note

use regex::Regex;
use vaultsmith_parser::{extract_tags, frontmatter_list, locate_frontmatter, parse_frontmatter};

use crate::frontmatter::{add_to_frontmatter_array, remove_frontmatter_key, set_frontmatter_key};

/// Frontmatter key holding a note's tags
pub const TAGS_KEY: &str = "tags";

/// Add `tag` (without `#`) to a note.
///
/// Returns `(false, content)` when the note already carries the tag in any
/// case. Notes with a frontmatter block get the tag appended to their `tags`
/// list; others get an inline `#tag` at the end.
pub fn add_tag(content: &str, tag: &str) -> (bool, String) {
    let tag = tag.trim_start_matches('#');
    if extract_tags(content)
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tag))
    {
        return (false, content.to_string());
    }

    if locate_frontmatter(content).is_none() {
        return (true, format!("{}\n\n#{}", content, tag));
    }

    // A comma scalar (`tags: a, b`) becomes an inline list first so that
    // each existing tag survives as its own item
    let fm = parse_frontmatter(content);
    let content = match fm.get(TAGS_KEY) {
        Some(value) if !value.is_empty() && !value.starts_with('[') && value.contains(',') => {
            let items = frontmatter_list(content, TAGS_KEY);
            set_frontmatter_key(content, TAGS_KEY, &format!("[{}]", items.join(", ")))
        }
        _ => content.to_string(),
    };

    (true, add_to_frontmatter_array(&content, TAGS_KEY, tag))
}

/// Remove `tag` (without `#`) from a note, case-insensitively.
///
/// Inline `#tag` tokens are dropped from the body and the entry is removed
/// from the frontmatter `tags` list; the key goes when the list empties.
pub fn remove_tag(content: &str, tag: &str) -> (bool, String) {
    let tag = tag.trim_start_matches('#');
    if tag.is_empty() {
        return (false, content.to_string());
    }

    let split = locate_frontmatter(content).map_or(0, |span| span.end_offset);
    let (head, body) = content.split_at(split);
    let (body_changed, body) = remove_inline_tag(body, tag);
    let mut result = format!("{}{}", head, body);
    let mut changed = body_changed;

    if parse_frontmatter(&result).contains_key(TAGS_KEY) {
        let tags = frontmatter_list(&result, TAGS_KEY);
        let remaining: Vec<String> = tags
            .iter()
            .filter(|t| !t.trim_start_matches('#').eq_ignore_ascii_case(tag))
            .cloned()
            .collect();

        if remaining.len() != tags.len() {
            changed = true;
            result = if remaining.is_empty() {
                remove_frontmatter_key(&result, TAGS_KEY).0
            } else {
                set_frontmatter_key(&result, TAGS_KEY, &format!("[{}]", remaining.join(", ")))
            };
        }
    }

    (changed, result)
}

fn remove_inline_tag(body: &str, tag: &str) -> (bool, String) {
    let Ok(re) = Regex::new(&format!("(?i)#{}", regex::escape(tag))) else {
        return (false, body.to_string());
    };

    let mut changed = false;
    let lines: Vec<String> = body
        .split('\n')
        .map(|line| {
            let cuts = token_cuts(line, &re);
            if cuts.is_empty() {
                return line.to_string();
            }
            changed = true;
            let mut out = String::with_capacity(line.len());
            let mut pos = 0;
            for (start, end) in cuts {
                out.push_str(&line[pos..start]);
                pos = end;
            }
            out.push_str(&line[pos..]);
            out
        })
        .collect();

    (changed, lines.join("\n"))
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Byte ranges to cut from `line`: each whole `#tag` token plus one separator.
///
/// The separator after the token is taken when there is one, otherwise the one
/// before it, so `"a #x b"` becomes `"a b"` and `"a #x"` becomes `"a"`. Other
/// whitespace on the line is left alone.
fn token_cuts(line: &str, re: &Regex) -> Vec<(usize, usize)> {
    let mut cuts: Vec<(usize, usize)> = Vec::new();
    for m in re.find_iter(line) {
        let (start, end) = (m.start(), m.end());
        let before = line[..start].chars().next_back();
        let after = line[end..].chars().next();
        if before.is_some_and(|c| !is_separator(c)) || after.is_some_and(is_tag_char) {
            continue;
        }

        let taken = cuts.last().map_or(0, |&(_, e)| e);
        let cut = match (before, after) {
            (_, Some(c)) if is_separator(c) => (start, end + c.len_utf8()),
            (Some(c), _) if start - c.len_utf8() >= taken => (start - c.len_utf8(), end),
            _ => (start, end),
        };
        cuts.push(cut);
    }
    cuts
}
