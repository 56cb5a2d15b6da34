mod cli;
mod config;
mod error;
mod notifier;
mod poller;
mod practicum;
mod tracker;
mod validate;

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{Level, debug, error, info};

use cli::{Cli, Command};
use config::NotifierConfig;
use error::ConfigError;
use poller::Poller;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => NotifierConfig::load_from(path),
        None => NotifierConfig::load(),
    }
    .context("failed to load configuration")?;

    if let Some(secs) = cli.retry_secs {
        config.retry_interval_secs = secs;
    }

    execute(cli.command, &config).await
}

/// Gate on credentials, then carry out `command`. Nothing talks to the
/// network before the gate passes.
async fn execute(command: Command, config: &NotifierConfig) -> Result<()> {
    if !config.credentials.check() {
        return Err(ConfigError::MissingCredentials(config.credentials.missing()).into());
    }
    debug!(credentials = ?config.credentials, "all credentials present");

    match command {
        Command::Check => {
            info!("configuration OK");
        }
        Command::Run { once } => {
            let mut poller = Poller::from_config(config, Utc::now().timestamp())?;
            if once {
                poller.tick().await;
                info!(watermark = poller.tracker().watermark(), "single cycle finished");
            } else {
                poller.run().await;
            }
        }
    }
    Ok(())
}
