use serde::{Deserialize, Serialize};

use super::badge::{default_tiers, BadgeCatalog, DEFAULT_CYCLE_SIZE};
use crate::domain::errors::DomainResult;

/// Main configuration structure for EcoCheck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Local key-value store configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Badge tiers and challenge cycle size
    #[serde(default)]
    pub badges: BadgeConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Base URL of the REST API, including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for idempotent reads on transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff between retries in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff between retries in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_initial_backoff_ms() -> u64 {
    200
}

const fn default_max_backoff_ms() -> u64 {
    2_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Local key-value store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StorageConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_storage_path() -> String {
    ".ecocheck/ecocheck.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl StorageConfig {
    /// sqlx connection URL for the configured path.
    pub fn database_url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Number of days to retain logs
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const fn default_retention_days() -> u32 {
    30
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            retention_days: default_retention_days(),
        }
    }
}

/// One configured badge tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeTierConfig {
    pub name: String,
    pub image_key: String,
}

/// Badge tiers and challenge cycle size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BadgeConfig {
    /// Resolved reports per challenge cycle
    #[serde(default = "default_cycle_size")]
    pub cycle_size: u32,

    /// Tiers in unlock order
    #[serde(default = "default_tier_configs")]
    pub tiers: Vec<BadgeTierConfig>,
}

const fn default_cycle_size() -> u32 {
    DEFAULT_CYCLE_SIZE
}

fn default_tier_configs() -> Vec<BadgeTierConfig> {
    default_tiers()
        .into_iter()
        .map(|tier| BadgeTierConfig {
            name: tier.name,
            image_key: tier.image_key,
        })
        .collect()
}

impl BadgeConfig {
    /// Build the runtime catalog from this configuration.
    pub fn catalog(&self) -> DomainResult<BadgeCatalog> {
        BadgeCatalog::new(
            self.cycle_size,
            self.tiers
                .iter()
                .map(|t| (t.name.clone(), t.image_key.clone())),
        )
    }
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            cycle_size: default_cycle_size(),
            tiers: default_tier_configs(),
        }
    }
}
