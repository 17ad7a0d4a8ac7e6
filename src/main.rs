mod commands;
mod config;
mod store;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, CliError};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env");
        }
    }

    let cli = Cli::parse();
    commands::run(cli, &config).await
}
