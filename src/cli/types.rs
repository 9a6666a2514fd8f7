//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{auth::AuthArgs, badge::BadgeArgs, init::InitArgs, report::ReportArgs, tips::TipsArgs};

#[derive(Parser, Debug)]
#[command(name = "ecocheck")]
#[command(about = "EcoCheck - community waste reporting", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .ecocheck/
    #[arg(short, long, global = true, env = "ECOCHECK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .ecocheck/ with a default config and local store
    Init(InitArgs),

    /// Sign in, register, and manage the stored session
    Auth(AuthArgs),

    /// Submit and browse waste reports
    Report(ReportArgs),

    /// Show badge and challenge progress
    Badge(BadgeArgs),

    /// Waste-handling tips
    Tips(TipsArgs),
}
