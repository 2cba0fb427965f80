//! Line-numbered excerpts around an edited region.

use std::fmt::Write;

/// Longest line shown before truncation
pub const MAX_CONTEXT_LINE_CHARS: usize = 200;

/// Lines shown from each end of a long edited region
const PREVIEW_EDGE_LINES: usize = 2;

/// Shorten `line` to `max_chars` characters, noting the original length
pub fn truncate_line(line: &str, max_chars: usize) -> String {
    let total = line.chars().count();
    if total <= max_chars {
        return line.to_string();
    }
    let head: String = line.chars().take(max_chars).collect();
    format!("{}... [{} chars total]", head, total)
}

fn push_line(out: &mut String, index: usize, line: &str, marker: &str) {
    let _ = writeln!(
        out,
        "L{}: {}{}",
        index + 1,
        truncate_line(line, MAX_CONTEXT_LINE_CHARS),
        marker
    );
}

/// Render `context` lines either side of the edited region `start..end`.
///
/// `lines` is the document after the edit; `inserted` the lines written into
/// the region. Returns an empty string when `context` is zero.
pub fn render_edit_context(
    lines: &[&str],
    start: usize,
    end: usize,
    context: usize,
    inserted: &[&str],
) -> String {
    if context == 0 {
        return String::new();
    }

    let mut out = String::new();
    let start = start.min(lines.len());

    for (i, line) in lines.iter().enumerate().take(start).skip(start.saturating_sub(context)) {
        push_line(&mut out, i, line, "");
    }

    if !inserted.is_empty() {
        let label = if end <= start { "INSERTED" } else { "CHANGED" };
        write_preview(&mut out, inserted, start, label);
    } else {
        for (i, line) in lines.iter().enumerate().take(end).skip(start) {
            push_line(&mut out, i, line, "");
        }
    }

    let after_end = end.saturating_add(context).min(lines.len());
    for (i, line) in lines.iter().enumerate().take(after_end).skip(end) {
        push_line(&mut out, i, line, "");
    }

    out
}

fn write_preview(out: &mut String, inserted: &[&str], start: usize, label: &str) {
    let marker = format!("  ← {}", label);
    if inserted.len() <= PREVIEW_EDGE_LINES * 2 + 1 {
        for (i, line) in inserted.iter().enumerate() {
            push_line(out, start + i, line, if i == 0 { &marker } else { "" });
        }
        return;
    }

    for (i, line) in inserted.iter().enumerate().take(PREVIEW_EDGE_LINES) {
        push_line(out, start + i, line, if i == 0 { &marker } else { "" });
    }
    let _ = writeln!(
        out,
        "     [... {} more lines ...]",
        inserted.len() - PREVIEW_EDGE_LINES * 2
    );
    let tail_start = inserted.len() - PREVIEW_EDGE_LINES;
    for (i, line) in inserted.iter().enumerate().skip(tail_start) {
        push_line(out, start + i, line, "");
    }
}

/// Context for an edit that wrote `new_text` into `new_content`.
///
/// The region starts at the first occurrence of `new_text` and spans as many
/// lines as `new_text` has. Returns `None` when `new_text` cannot be found.
pub fn context_for_replacement(new_content: &str, new_text: &str, context: usize) -> Option<String> {
    let idx = new_content.find(new_text)?;
    let lines: Vec<&str> = new_content.split('\n').collect();
    let inserted: Vec<&str> = new_text.split('\n').collect();
    let start = new_content[..idx].matches('\n').count();
    let end = start + inserted.len();
    Some(render_edit_context(&lines, start, end, context, &inserted))
}
