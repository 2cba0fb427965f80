//! Pre-configured profiles for different deployment scenarios
//!
//! - Development: verbose logging, generous size limit
//! - Production: info logging, default limits
//! - ReadOnly: every mutating tool rejected
//! - Minimal: errors only

use crate::config::ServerConfig;
use crate::error::Error;
use std::str::FromStr;

/// Profile selector for pre-configured deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    /// Development: Verbose logging
    Development,
    /// Production: Quieter logging, default limits
    Production,
    /// ReadOnly: Listing and reading only
    ReadOnly,
    /// Minimal: Bare essentials only
    Minimal,
}

impl ConfigProfile {
    /// Create a ServerConfig from this profile
    pub fn create_config(self) -> ServerConfig {
        self.apply(ServerConfig::new())
    }

    /// Overlay this profile's settings on an existing configuration
    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        config.profile = self.name().to_string();

        match self {
            Self::Development => {
                config.log_level = "DEBUG".to_string();
                config.max_file_size = 50 * 1024 * 1024; // 50MB
            }

            Self::Production => {
                config.log_level = "INFO".to_string();
                config.max_file_size = 10 * 1024 * 1024;
            }

            Self::ReadOnly => {
                config.log_level = "WARN".to_string();
                config.read_only = true;
            }

            Self::Minimal => {
                config.log_level = "ERROR".to_string();
            }
        }

        config
    }

    /// Get profile name
    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::ReadOnly => "read-only",
            Self::Minimal => "minimal",
        }
    }

    /// Get profile description
    pub fn description(self) -> &'static str {
        match self {
            Self::Development => "Verbose logging, all operations enabled",
            Self::Production => "Info logging with default limits",
            Self::ReadOnly => "Listing and reading only, no mutations",
            Self::Minimal => "Bare essentials only",
        }
    }
}

impl FromStr for ConfigProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "read-only" | "readonly" => Ok(Self::ReadOnly),
            "minimal" => Ok(Self::Minimal),
            other => Err(Error::config_error(format!(
                "Unknown profile '{}'. Valid options: development, production, read-only, minimal",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ConfigProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
