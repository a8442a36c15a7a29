//! Interactive teller for the flat-file banking simulator
//!
//! Usage:
//! ```bash
//! bank --store account.txt
//! RUST_LOG=debug bank
//! ```

use anyhow::{Context, Result};
use banking_core::utils::FlatFileStorage;
use banking_core::{BankConfig, BankingSystem, Shell};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Open accounts, log in and move money between accounts kept in a text file
#[derive(Parser, Debug)]
#[command(name = "bank")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Account store file
    #[arg(long, env = "BANK_STORE", default_value = banking_core::DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Log filter (e.g. `info`, `banking_core=debug`); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = BankConfig::with_store_path(&cli.store);
    let storage = FlatFileStorage::new(&config.store_path);
    let bank = BankingSystem::with_config(storage, config)
        .await
        .with_context(|| format!("failed to load accounts from {}", cli.store.display()))?;

    let stdin = io::stdin();
    let mut shell = Shell::new(bank, stdin.lock(), io::stdout());
    shell.run().await.context("terminal I/O failed")?;

    Ok(())
}
