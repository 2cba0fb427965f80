//! Command-line arguments, configuration assembly and logging setup

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use vaultsmith_core::{ConfigProfile, ServerConfig, VaultConfig};

/// Log output format (always written to stderr; stdout carries MCP)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain lines via simple_logger
    Human,
    /// Structured JSON events via tracing-subscriber
    Json,
}

/// Vaultsmith - surgical markdown vault editing over MCP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the vault directory
    #[arg(short, long, env = "OBSIDIAN_VAULT_PATH")]
    pub vault: Option<PathBuf>,

    /// Configuration profile (development, production, read-only, minimal)
    #[arg(short, long, default_value = "development")]
    pub profile: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "json")]
    pub log_format: LogFormat,
}

impl Args {
    /// Layer file, environment, profile and `--vault` into one validated config.
    ///
    /// `--vault` replaces any vaults listed in the file.
    pub fn server_config(&self) -> Result<ServerConfig> {
        let profile = ConfigProfile::from_str(&self.profile)?;
        let loaded = ServerConfig::load(self.config.as_deref())?;
        let mut config = profile.apply(loaded);

        if let Some(path) = &self.vault {
            let vault = VaultConfig::builder("default", path)
                .as_default()
                .build()
                .with_context(|| format!("Invalid vault path {}", path.display()))?;
            config.vaults = vec![vault];
        }

        if config.vaults.is_empty() {
            bail!("No vault configured. Pass --vault, set OBSIDIAN_VAULT_PATH, or list vaults in --config");
        }
        config.validate()?;
        Ok(config)
    }
}

/// Install the global logger for `format`.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_logging(format: LogFormat, default_level: &str) -> Result<()> {
    match format {
        LogFormat::Json => {
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level.to_lowercase()))
                .context("Invalid log filter")?;
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
        }
        LogFormat::Human => {
            let level = std::env::var("RUST_LOG")
                .ok()
                .and_then(|v| log::LevelFilter::from_str(&v).ok())
                .or_else(|| log::LevelFilter::from_str(default_level).ok())
                .unwrap_or(log::LevelFilter::Info);
            simple_logger::SimpleLogger::new()
                .with_level(level)
                .with_utc_timestamps()
                .init()
                .context("Failed to initialize logger")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["vaultsmith"]).unwrap();
        assert_eq!(args.profile, "development");
        assert_eq!(args.log_format, LogFormat::Json);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_vault_flag_builds_config() {
        let dir = TempDir::new().unwrap();
        let args = Args::try_parse_from([
            "vaultsmith",
            "--vault",
            dir.path().to_str().unwrap(),
            "--profile",
            "read-only",
            "--log-format",
            "human",
        ])
        .unwrap();

        let config = args.server_config().unwrap();
        assert!(config.read_only);
        assert_eq!(config.vaults.len(), 1);
        assert!(config.vaults[0].is_default);
        assert_eq!(args.log_format, LogFormat::Human);
    }

    #[test]
    fn test_unknown_profile_rejected() {
        let dir = TempDir::new().unwrap();
        let args = Args::try_parse_from([
            "vaultsmith",
            "--vault",
            dir.path().to_str().unwrap(),
            "--profile",
            "fancy",
        ])
        .unwrap();
        let err = args.server_config().unwrap_err();
        assert!(err.to_string().contains("Unknown profile 'fancy'"));
    }

    #[test]
    fn test_missing_vault_path_rejected() {
        let args = Args::try_parse_from(["vaultsmith", "--vault", "/definitely/not/here"]).unwrap();
        assert!(args.server_config().is_err());
    }
}
