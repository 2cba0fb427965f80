//! Configuration types for the vault server.
//!
//! Follows a builder pattern for vault configuration with validation.
//! [`ServerConfig::load`] layers an optional YAML file and `VAULTSMITH_*`
//! environment variables over the defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides (`VAULTSMITH_READ_ONLY=true`, ...)
pub const ENV_PREFIX: &str = "VAULTSMITH";

/// Configuration for a single vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Unique identifier for this vault
    pub name: String,
    /// Path to the vault directory
    pub path: PathBuf,
    /// Whether this is the default vault
    #[serde(default)]
    pub is_default: bool,

    // Optional overrides
    #[serde(default)]
    pub max_file_size: Option<u64>,
    #[serde(default)]
    pub excluded_paths: Option<HashSet<String>>,
}

impl VaultConfig {
    /// Create a new vault config with builder
    pub fn builder(name: impl Into<String>, path: impl Into<PathBuf>) -> VaultConfigBuilder {
        VaultConfigBuilder::new(name, path)
    }

    /// Validate the vault configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::config_error("Vault name cannot be empty"));
        }

        if !self.path.exists() {
            return Err(Error::config_error(format!(
                "Vault path does not exist: {}",
                self.path.display()
            )));
        }

        if !self.path.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                self.path.display()
            )));
        }

        Ok(())
    }
}

/// Builder for VaultConfig
pub struct VaultConfigBuilder {
    name: String,
    path: PathBuf,
    is_default: bool,
    max_file_size: Option<u64>,
    excluded_paths: Option<HashSet<String>>,
}

impl VaultConfigBuilder {
    /// Create a new builder
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_default: false,
            max_file_size: None,
            excluded_paths: None,
        }
    }

    /// Mark as default vault
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Override the server-wide size limit for this vault
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Override the excluded directory names for this vault
    pub fn excluded_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Build and validate.
    ///
    /// The vault path is made absolute so later containment checks compare
    /// like with like.
    pub fn build(self) -> Result<VaultConfig> {
        let path = std::path::absolute(&self.path).map_err(|e| {
            Error::config_error(format!(
                "Cannot resolve vault path {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let config = VaultConfig {
            name: self.name,
            path,
            is_default: self.is_default,
            max_file_size: self.max_file_size,
            excluded_paths: self.excluded_paths,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Global server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// List of configured vaults
    pub vaults: Vec<VaultConfig>,
    /// Configuration profile name
    pub profile: String,

    /// Extension every addressable note carries
    pub note_extension: String,
    /// Reads of files larger than this fail
    pub max_file_size: u64,
    /// Directory names skipped when enumerating notes
    pub excluded_paths: HashSet<String>,
    pub log_level: String,

    /// Reject every mutating operation
    pub read_only: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            vaults: vec![],
            profile: "default".to_string(),
            note_extension: ".md".to_string(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            excluded_paths: [".obsidian", ".git", ".trash", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            log_level: "INFO".to_string(),
            read_only: false,
        }
    }
}

impl ServerConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from an optional YAML file, then environment.
    ///
    /// Fields missing from both sources keep their defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        use config::{Config, Environment, File, FileFormat};

        let mut builder = Config::builder();
        if let Some(path) = file {
            log::debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        builder
            .build()
            .and_then(|c| c.try_deserialize::<ServerConfig>())
            .map_err(|e| Error::config_error(format!("Failed to load configuration: {}", e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.vaults.is_empty() {
            return Err(Error::config_error("At least one vault must be configured"));
        }

        if !self.note_extension.starts_with('.') || self.note_extension.len() < 2 {
            return Err(Error::config_error(format!(
                "note_extension must look like '.md', got '{}'",
                self.note_extension
            )));
        }

        // Check unique vault names
        let names: HashSet<_> = self.vaults.iter().map(|v| &v.name).collect();
        if names.len() != self.vaults.len() {
            return Err(Error::config_error("Vault names must be unique"));
        }

        // Check unique default vaults
        let defaults: Vec<_> = self.vaults.iter().filter(|v| v.is_default).collect();
        if defaults.len() > 1 {
            return Err(Error::config_error("Only one vault can be default"));
        }

        for vault in &self.vaults {
            vault.validate()?;
        }

        Ok(())
    }

    /// Get default vault config
    pub fn default_vault(&self) -> Result<&VaultConfig> {
        self.vaults
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.vaults.first())
            .ok_or_else(|| Error::config_error("No default vault configured"))
    }

    /// Size limit in effect for a vault
    pub fn max_file_size_for(&self, vault: &VaultConfig) -> u64 {
        vault.max_file_size.unwrap_or(self.max_file_size)
    }

    /// Excluded directory names in effect for a vault
    pub fn excluded_paths_for(&self, vault: &VaultConfig) -> HashSet<String> {
        vault
            .excluded_paths
            .clone()
            .unwrap_or_else(|| self.excluded_paths.clone())
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize configuration: {}", e)))
    }
}
