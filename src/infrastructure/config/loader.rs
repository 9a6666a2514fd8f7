use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project-local directory holding config, local overrides, and the store
pub const CONFIG_DIR: &str = ".ecocheck";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid base_url: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Storage path cannot be empty")]
    EmptyStoragePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid cycle_size: {0}. Must be at least 1")]
    InvalidCycleSize(u32),

    #[error("At least one badge tier must be configured")]
    NoBadgeTiers,

    #[error("Badge tier #{0} has an empty name")]
    EmptyTierName(usize),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .ecocheck/config.yaml (project config, created by init)
    /// 3. .ecocheck/local.yaml (local overrides, optional)
    /// 4. Environment variables (`ECOCHECK_*` prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed("ECOCHECK_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("ECOCHECK_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let api = &config.api;
        if api.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(api.base_url.clone()));
        }
        if api.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(api.timeout_secs));
        }
        if api.initial_backoff_ms >= api.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                api.initial_backoff_ms,
                api.max_backoff_ms,
            ));
        }

        if config.storage.path.is_empty() {
            return Err(ConfigError::EmptyStoragePath);
        }
        if config.storage.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.storage.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.badges.cycle_size == 0 {
            return Err(ConfigError::InvalidCycleSize(config.badges.cycle_size));
        }
        if config.badges.tiers.is_empty() {
            return Err(ConfigError::NoBadgeTiers);
        }
        if let Some(pos) = config
            .badges
            .tiers
            .iter()
            .position(|tier| tier.name.trim().is_empty())
        {
            return Err(ConfigError::EmptyTierName(pos + 1));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage.path, ".ecocheck/ecocheck.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.badges.cycle_size, 10);
        assert_eq!(config.badges.tiers.len(), 4);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
api:
  base_url: https://ecocheck.example.org/api
  timeout_secs: 10
storage:
  path: /tmp/eco.db
logging:
  level: debug
  format: json
badges:
  cycle_size: 5
  tiers:
    - name: Sprout
      image_key: badge_sprout
    - name: Tree
      image_key: badge_tree
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.api.base_url, "https://ecocheck.example.org/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.max_retries, 2);
        assert_eq!(config.storage.path, "/tmp/eco.db");
        assert_eq!(config.storage.max_connections, 5);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.badges.cycle_size, 5);
        assert_eq!(config.badges.tiers[1].name, "Tree");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
        let catalog = config.badges.catalog().unwrap();
        assert_eq!(catalog.cycle_size().get(), 5);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api:\n  base_url: http://10.0.2.2:5000/api").unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.2.2:5000/api");
        assert_eq!(config.badges.tiers.len(), 4);
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "badges:\n  cycle_size: 0").unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidCycleSize(0))
        ));
    }

    #[test]
    fn test_env_override() {
        let file = tempfile::NamedTempFile::new().unwrap();
        temp_env::with_vars(
            [
                ("ECOCHECK_API__TIMEOUT_SECS", Some("5")),
                ("ECOCHECK_LOGGING__LEVEL", Some("warn")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.api.timeout_secs, 5);
                assert_eq!(config.logging.level, "warn");
            },
        );
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyBaseUrl)
        ));

        config.api.base_url = "ftp://example.org".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_invalid_backoff() {
        let mut config = Config::default();
        config.api.initial_backoff_ms = 3000;
        config.api.max_backoff_ms = 1000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(3000, 1000))
        ));
    }

    #[test]
    fn test_validate_storage() {
        let mut config = Config::default();
        config.storage.path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyStoragePath)
        ));

        let mut config = Config::default();
        config.storage.max_connections = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxConnections(0))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_badge_tiers() {
        let mut config = Config::default();
        config.badges.tiers.clear();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::NoBadgeTiers)
        ));

        let mut config = Config::default();
        config.badges.tiers[2].name = " ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyTierName(3))
        ));
    }
}
