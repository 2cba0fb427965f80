//! Task parser: - [ ] Task, - [x] Completed, with due dates and priorities

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static! {
    /// Matches - [ ], - [x] or - [X] followed by task text
    static ref TASK_PATTERN: Regex = Regex::new(r"^(\s*)-\s*\[([ xX])\]\s*(.+)$").unwrap();

    /// 📅 2024-01-15
    static ref DUE_DATE_PATTERN: Regex = Regex::new(r"📅\s*(\d{4}-\d{2}-\d{2})").unwrap();

    static ref PRIORITY_PATTERN: Regex = Regex::new(r"(⏫|🔼|🔽)").unwrap();

    static ref TASK_TAG_PATTERN: Regex = Regex::new(r"#([a-zA-Z0-9_\-]+)").unwrap();
}

/// Task priority marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// ⏫
    High,
    /// 🔼
    Medium,
    /// 🔽
    Low,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(name)
    }
}

/// A checkbox item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// 1-based line number
    pub line: usize,
    pub completed: bool,
    /// Trimmed text after the checkbox
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Parse one line as a task
pub fn parse_task_line(line: &str, line_number: usize) -> Option<Task> {
    let caps = TASK_PATTERN.captures(line)?;
    let text = caps[3].trim().to_string();

    let due_date = DUE_DATE_PATTERN
        .captures(&text)
        .map(|c| c[1].to_string());
    let priority = PRIORITY_PATTERN
        .captures(&text)
        .and_then(|c| match &c[1] {
            "⏫" => Some(TaskPriority::High),
            "🔼" => Some(TaskPriority::Medium),
            "🔽" => Some(TaskPriority::Low),
            _ => None,
        });
    let tags = TASK_TAG_PATTERN
        .captures_iter(&text)
        .map(|c| c[1].to_string())
        .collect();

    Some(Task {
        line: line_number,
        completed: caps[2].eq_ignore_ascii_case("x"),
        text,
        due_date,
        priority,
        tags,
    })
}

/// Parse all tasks from content
pub fn parse_tasks(content: &str) -> Vec<Task> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| parse_task_line(line, idx + 1))
        .collect()
}
