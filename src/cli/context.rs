//! Wires adapters into services for one CLI invocation.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::http::{ApiClientConfig, EcoCheckApiClient};
use crate::adapters::sqlite::{initialize_from_config, SqliteKeyValueStore};
use crate::domain::models::Config;
use crate::infrastructure::identity::JwtIdentityDecoder;
use crate::services::{AuthService, ProgressSession, ReportService};

pub type CliAuthService = AuthService<SqliteKeyValueStore, EcoCheckApiClient, JwtIdentityDecoder>;
pub type CliReportService = ReportService<SqliteKeyValueStore, EcoCheckApiClient>;
pub type CliProgressSession =
    ProgressSession<SqliteKeyValueStore, EcoCheckApiClient, JwtIdentityDecoder>;

pub struct AppContext {
    pub config: Config,
    store: Arc<SqliteKeyValueStore>,
    api: Arc<EcoCheckApiClient>,
    decoder: Arc<JwtIdentityDecoder>,
}

impl AppContext {
    /// Open the local store and build the API client.
    pub async fn open(config: Config) -> Result<Self> {
        let pool = initialize_from_config(&config.storage)
            .await
            .with_context(|| format!("Failed to open local store at {}", config.storage.path))?;
        let api = EcoCheckApiClient::new(ApiClientConfig::from(&config.api))
            .context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            store: Arc::new(SqliteKeyValueStore::new(pool)),
            api: Arc::new(api),
            decoder: Arc::new(JwtIdentityDecoder::new()),
        })
    }

    pub fn auth(&self) -> CliAuthService {
        AuthService::new(self.store.clone(), self.api.clone(), self.decoder.clone())
    }

    pub fn reports(&self) -> CliReportService {
        ReportService::new(self.store.clone(), self.api.clone())
    }

    pub fn progress(&self) -> Result<CliProgressSession> {
        let catalog = self
            .config
            .badges
            .catalog()
            .context("Invalid badge configuration")?;
        Ok(ProgressSession::new(
            self.store.clone(),
            self.api.clone(),
            self.decoder.clone(),
            catalog,
        ))
    }
}
