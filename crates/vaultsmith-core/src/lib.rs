//! # vaultsmith core
//!
//! Error types, configuration and path containment shared by every
//! vaultsmith crate.
//!
//! ## Core Modules
//!
//! - [`error`] - The [`Error`] taxonomy and `Result` alias
//! - [`config`] - Server and vault configuration, layered loading
//! - [`profiles`] - Configuration profiles for different environments
//! - [`utils`] - Path guard and transaction tracking
//!
//! ## Usage Examples
//!
//! ### Path containment
//!
//! ```
//! use vaultsmith_core::prelude::*;
//! use std::path::Path;
//!
//! let root = Path::new("/vault");
//! assert!(PathValidator::validate_path_in_vault(root, Path::new("notes/a.md")).is_ok());
//! assert!(PathValidator::validate_path_in_vault(root, Path::new("../etc/passwd")).is_err());
//! ```
//!
//! ### Configuration
//!
//! ```
//! use vaultsmith_core::prelude::*;
//!
//! let config = ConfigProfile::ReadOnly.create_config();
//! assert!(config.read_only);
//! ```

pub mod config;
pub mod error;
pub mod profiles;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use profiles::ConfigProfile;
pub use utils::{PathValidator, TransactionBuilder};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ServerConfig, VaultConfig};
    pub use crate::error::{Error, Result};
    pub use crate::profiles::ConfigProfile;
    pub use crate::utils::{PathValidator, TransactionBuilder};
}
