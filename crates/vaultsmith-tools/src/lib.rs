//! # Vault Tools
//!
//! Tool-layer operations for the vaultsmith MCP server. Each tool group wraps
//! the engines from `vaultsmith-vault` and `vaultsmith-batch` and turns their
//! results into the human-readable text an agent reads back.
//!
//! ## Tool Groups
//!
//! - [`file_tools::FileTools`]: list, read, write and delete notes
//! - [`edit_tools::EditTools`]: find/replace, section replace, batch edits
//! - [`metadata_tools::MetadataTools`]: read, query and mutate frontmatter
//! - [`link_tools::LinkTools`]: backlinks, link-preserving rename, MOC discovery
//! - [`bulk_tools::BulkTools`]: move, set frontmatter or tag many notes
//! - [`search_tools::SearchTools`]: substring search, tag search, task listing
//!
//! Every group shares one [`context::ToolContext`], which carries the document
//! store and the read-only switch. Mutating tools fail with
//! `Error::ReadOnly` before touching the store when the switch is on.
//!
//! ## Example
//!
//! ```no_run
//! use vaultsmith_core::prelude::*;
//! use vaultsmith_tools::{FileTools, ToolContext};
//!
//! # async fn demo() -> Result<()> {
//! let mut config = ConfigProfile::Production.create_config();
//! config.vaults.push(VaultConfig::builder("notes", "/path/to/vault").build()?);
//!
//! let files = FileTools::new(ToolContext::from_config(config)?);
//! println!("{}", files.list_notes(None, 20, 0).await?);
//! # Ok(())
//! # }
//! ```

pub mod bulk_tools;
pub mod context;
pub mod edit_tools;
pub mod file_tools;
pub mod link_tools;
pub mod metadata_tools;
pub mod search_tools;

pub use bulk_tools::BulkTools;
pub use context::ToolContext;
pub use edit_tools::EditTools;
pub use file_tools::FileTools;
pub use link_tools::{LinkTools, MocEntry, render_mocs};
pub use metadata_tools::{FrontmatterQuery, MetadataTools};
pub use search_tools::{SearchTools, TaskFilter};

pub use vaultsmith_batch::{BatchEditResult, BulkOperation, BulkResult, OperationRecord};
pub use vaultsmith_core::prelude::*;
pub use vaultsmith_vault::EditOutcome;
