//! Implementation of the `ecocheck init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::fs;

use crate::adapters::sqlite::initialize_from_config;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, StorageConfig};
use crate::infrastructure::config::CONFIG_DIR;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub initialized_path: PathBuf,
    pub config_written: bool,
    pub database_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nWrote {CONFIG_DIR}/config.yaml"));
        }
        if self.success {
            lines.push(format!("Local store at {}", self.database_path.display()));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let config_dir = target_path.join(CONFIG_DIR);
    let config_path = config_dir.join("config.yaml");
    let database_path = config_dir.join("ecocheck.db");

    if config_path.exists() && !args.force {
        let output_data = InitOutput {
            success: false,
            message: "Project already initialized. Use --force to overwrite the config.".to_string(),
            initialized_path: target_path,
            config_written: false,
            database_path,
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    fs::create_dir_all(&config_dir)
        .await
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;

    let yaml = serde_yaml::to_string(&Config::default()).context("Failed to render default config")?;
    fs::write(&config_path, yaml)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let storage = StorageConfig {
        path: database_path.to_string_lossy().into_owned(),
        ..StorageConfig::default()
    };
    let pool = initialize_from_config(&storage)
        .await
        .context("Failed to initialize local store")?;
    pool.close().await;

    let output_data = InitOutput {
        success: true,
        message: if args.force {
            "Project reinitialized.".to_string()
        } else {
            "Project initialized.".to_string()
        },
        initialized_path: target_path,
        config_written: true,
        database_path,
    };
    output(&output_data, json_mode);
    Ok(())
}
