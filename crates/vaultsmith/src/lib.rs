//! # Vaultsmith Server
//!
//! MCP server exposing surgical edits over one markdown vault, plus the CLI
//! glue that builds its configuration and logger.
//!
//! ```no_run
//! use vaultsmith::VaultsmithServer;
//! use vaultsmith_core::prelude::*;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let mut config = ConfigProfile::Production.create_config();
//! config.vaults.push(VaultConfig::builder("notes", "/path/to/vault").build()?);
//!
//! let server = VaultsmithServer::new(config)?;
//! server
//!     .run_stdio()
//!     .await
//!     .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod response;
pub mod tools;

pub use response::StandardResponse;
pub use tools::VaultsmithServer;
pub use vaultsmith_core::prelude::*;
