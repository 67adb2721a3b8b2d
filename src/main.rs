use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;

use unex_portal::catalog::Catalog;
use unex_portal::cli::commands::{reset_command, run_command, status_command};
use unex_portal::cli::{Cli, Commands};
use unex_portal::config::PortalConfig;
use unex_portal::context::PortalContext;
use unex_portal::storage::SqliteStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PortalConfig::load(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        config.database = Some(db.clone());
    }

    // Initialize logger to file (truncate on each run)
    let log_path = config.log_path()?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {:?}", log_path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting unex-portal");

    let storage = Arc::new(SqliteStorage::open(&config.database_path()?).await?);
    let catalog = Arc::new(Catalog::load()?);
    let mut ctx = PortalContext::new(storage.clone(), catalog, config);

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_command(ctx).await,
        Commands::Status => {
            status_command(&ctx, storage.location());
            Ok(())
        }
        Commands::Reset { all } => {
            reset_command(&mut ctx, all);
            Ok(())
        }
    };

    storage.flush().await?;
    info!("Stopped unex-portal");
    result
}
