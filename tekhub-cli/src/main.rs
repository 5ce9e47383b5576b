//! Tekhub CLI
//!
//! Command-line front end for the Tekton Hub catalog and the dashboard
//! webhooks extension.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tekhub")]
#[command(about = "Tekton Hub catalog and webhooks CLI", long_about = None)]
struct Cli {
    /// Hub API URL
    #[arg(long, env = "TEKHUB_API_URL", default_value = config::DEFAULT_HUB_URL)]
    hub_url: String,

    /// Tekton dashboard URL
    #[arg(
        long,
        env = "TEKHUB_DASHBOARD_URL",
        default_value = config::DEFAULT_DASHBOARD_URL
    )]
    dashboard_url: String,

    /// Credentials file (defaults to the user config directory)
    #[arg(long, env = "TEKHUB_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Log requests and state changes
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "tekhub=debug" } else { "tekhub=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::new(cli.hub_url, cli.dashboard_url, cli.credentials)?;
    config.validate()?;

    handle_command(cli.command, &config).await
}
