//! EcoCheck CLI entry point.

use anyhow::Result;
use clap::Parser;

use ecocheck::cli::commands::{auth, badge, init, report, tips};
use ecocheck::cli::{handle_error, AppContext, Cli, Commands};
use ecocheck::domain::models::Config;
use ecocheck::infrastructure::config::ConfigLoader;
use ecocheck::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => handle_error(&err, json_mode),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    if let Err(err) = run(cli.command, config, json_mode).await {
        handle_error(&err, json_mode);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

async fn run(command: Commands, config: Config, json_mode: bool) -> Result<()> {
    let command = match command {
        Commands::Init(args) => return init::execute(args, json_mode).await,
        Commands::Tips(args) => return tips::execute(&args, json_mode),
        other => other,
    };

    let ctx = AppContext::open(config).await?;
    match command {
        Commands::Init(_) | Commands::Tips(_) => Ok(()),
        Commands::Auth(args) => auth::execute(args, &ctx, json_mode).await,
        Commands::Report(args) => report::execute(args, &ctx, json_mode).await,
        Commands::Badge(args) => badge::execute(args, &ctx, json_mode).await,
    }
}
