//! Vaultsmith Server CLI

use anyhow::{Context, Result};
use clap::Parser;
use vaultsmith::VaultsmithServer;
use vaultsmith::cli::{Args, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Configuration errors are reported before any logger exists
    let config = args.server_config().context("Failed to load configuration")?;
    init_logging(args.log_format, &config.log_level)?;

    log::info!("Vaultsmith MCP Server v{}", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Profile: {} | Log format: {:?} | Read-only: {}",
        config.profile,
        args.log_format,
        config.read_only
    );

    let vault = config.default_vault()?;
    log::info!("Vault registered: {} -> {}", vault.name, vault.path.display());

    let server = VaultsmithServer::new(config).context("Failed to create MCP server")?;

    log::info!("Running in STDIO mode for MCP protocol");
    server
        .run_stdio()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
