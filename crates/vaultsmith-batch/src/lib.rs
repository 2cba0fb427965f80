//! # Batch Operations
//!
//! Two kinds of multi-step change:
//!
//! - [`edits::BatchEditEngine`]: N find/replace pairs against one note,
//!   validated against one snapshot and written once. Either every edit
//!   lands or the note is left byte-identical.
//! - [`bulk::BulkExecutor`]: one change (move, set frontmatter, add or
//!   remove a tag) applied to many notes, note by note, with a markdown
//!   report of successes and failures.
//!
//! ```
//! use vaultsmith_batch::edits::{apply_located, parse_edits, validate_edits};
//!
//! let content = "alpha beta gamma";
//! let edits = parse_edits(r#"[{"old_text": "gamma", "new_text": "G"},
//!                             {"old_text": "alpha", "new_text": "A"}]"#).unwrap();
//! let located = validate_edits("note.md", content, &edits).unwrap();
//! assert_eq!(apply_located(content, &located), "A beta G");
//! ```

pub mod bulk;
pub mod edits;

pub use bulk::{BulkExecutor, BulkOperation, BulkResult, OperationRecord, parse_paths};
pub use edits::{BatchEditEngine, BatchEditResult, EditSpec, LocatedEdit};
