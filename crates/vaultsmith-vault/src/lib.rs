//! # Vault
//!
//! Document storage and the in-place mutation engines.
//!
//! - [`store::DocumentStore`]: whole-file access by vault-relative path
//! - [`manager::VaultManager`]: the filesystem store (path guard, size limit,
//!   excluded directories, write-to-temp then rename)
//! - [`edit::EditEngine`]: uniqueness-checked find/replace and heading-scoped
//!   section replacement
//! - [`frontmatter`]: set, remove and append-to-array on the header block
//! - [`tags`]: add or remove one tag on a note
//! - [`links::LinkRewriter`]: vault-wide wikilink rewriting, rename with link
//!   fixup, backlinks
//! - [`context`]: line-numbered excerpts around an edit
//!
//! ## Quick Start
//!
//! ```no_run
//! use vaultsmith_vault::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let mut config = ServerConfig::new();
//! config.vaults.push(VaultConfig::builder("notes", "/path/to/vault").build()?);
//!
//! let store: Arc<dyn DocumentStore> = Arc::new(VaultManager::new(config)?);
//! store.write(Path::new("inbox/idea.md"), "# Idea\n\nDraft").await?;
//!
//! let engine = EditEngine::new(store.clone());
//! let outcome = engine.replace_text("inbox/idea.md", "Draft", "Final", false, 1).await?;
//! println!("{}", outcome.message);
//! # Ok(())
//! # }
//! ```
//!
//! ## Frontmatter
//!
//! ```
//! use vaultsmith_vault::frontmatter::{add_to_frontmatter_array, set_frontmatter_key};
//!
//! let note = set_frontmatter_key("# Body", "Status", "draft");
//! assert_eq!(note, "---\nstatus: draft\n---\n\n# Body");
//!
//! let note = add_to_frontmatter_array("---\ntags: [a]\n---\n", "tags", "b");
//! assert_eq!(note, "---\ntags:\n  - a\n  - b\n---\n");
//! ```

pub mod context;
pub mod edit;
pub mod frontmatter;
pub mod links;
pub mod manager;
pub mod store;
pub mod tags;

pub use context::{render_edit_context, truncate_line};
pub use edit::{EditEngine, EditOutcome, compute_hash, replace_at};
pub use links::{Backlink, LinkRewriter, RenameReport, rewrite_wikilinks};
pub use manager::VaultManager;
pub use store::{DocumentStore, NoteStat};
pub use vaultsmith_core::prelude::*;

pub mod prelude {
    pub use crate::edit::{EditEngine, EditOutcome};
    pub use crate::links::{LinkRewriter, RenameReport};
    pub use crate::manager::VaultManager;
    pub use crate::store::{DocumentStore, NoteStat};
    pub use vaultsmith_core::prelude::*;
}
