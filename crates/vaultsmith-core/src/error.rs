//! Error types for vault operations.
//!
//! Every fallible operation in the workspace returns [`Error`]. The display
//! text of each variant is what a remote caller sees, so messages name the
//! offending path or edit rather than internal state.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all vault operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Target document does not exist
    #[error("Note not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Malformed path (wrong extension, empty, etc.)
    #[error("{reason}")]
    InvalidPath { reason: String },

    /// Path escapes the vault root
    #[error("path must be within vault: {}", path.display())]
    PathTraversalAttempt { path: PathBuf },

    /// File too large for processing
    #[error("File too large ({size} bytes, max {max} bytes): {}", path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    /// Malformed caller input such as batch JSON
    #[error("{reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Rejected input (empty edit text, missing parameter, ...)
    #[error("{reason}")]
    ValidationError { reason: String },

    /// The request is well-formed but cannot be applied to the current content
    #[error("{reason}")]
    Conflict { reason: String },

    /// Rename or move target is occupied
    #[error("Destination already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// Mutating operation against a read-only configuration
    #[error("Vault is read-only: {operation} is disabled")]
    ReadOnly { operation: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a path traversal error
    pub fn path_traversal(path: impl Into<PathBuf>) -> Self {
        Error::PathTraversalAttempt { path: path.into() }
    }

    /// Create a file too large error
    pub fn file_too_large(path: impl Into<PathBuf>, size: u64, max: u64) -> Self {
        Error::FileTooLarge {
            path: path.into(),
            size,
            max,
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation_error(reason: impl Into<String>) -> Self {
        Error::ValidationError {
            reason: reason.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(reason: impl Into<String>) -> Self {
        Error::Conflict {
            reason: reason.into(),
        }
    }

    /// Create a destination-exists error
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Error::AlreadyExists { path: path.into() }
    }

    /// Create a read-only rejection
    pub fn read_only(operation: impl Into<String>) -> Self {
        Error::ReadOnly {
            operation: operation.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Whether the error reports a missing document.
    ///
    /// I/O errors of kind `NotFound` count as well, since the store surfaces
    /// them before a path-aware error can be built.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::FileNotFound { .. } => true,
            Error::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
