mod cli;
mod commands;
mod config;
mod main_lib;

use clap::Parser;

use cli::Cli;
use config::Config;
use main_lib::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config);

    tracing::debug!("Using upstream {}", config.api_base_url);
    commands::run(cli.command, &config).await
}
