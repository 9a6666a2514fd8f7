//! EcoCheck - community waste-reporting client
//!
//! Users submit geotagged photo reports of uncollected waste and earn
//! badges as their reports are resolved. Every ten resolved reports
//! complete a challenge cycle and unlock the next badge tier.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors, and port traits
//! - **Service Layer** (`services`): badge resolution, cache reconciliation,
//!   progress sessions, auth and report flows
//! - **Adapters** (`adapters`): REST gateway, SQLite and in-memory stores
//! - **Infrastructure Layer** (`infrastructure`): config, logging, token decoding
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ecocheck::adapters::http::{ApiClientConfig, EcoCheckApiClient};
//! use ecocheck::adapters::memory::InMemoryKeyValueStore;
//! use ecocheck::infrastructure::identity::JwtIdentityDecoder;
//! use ecocheck::{BadgeCatalog, ProgressSession};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let session = ProgressSession::new(
//!     Arc::new(InMemoryKeyValueStore::new()),
//!     Arc::new(EcoCheckApiClient::new(ApiClientConfig::default())?),
//!     Arc::new(JwtIdentityDecoder::new()),
//!     BadgeCatalog::default(),
//! );
//!
//! let view = session.refresh().await;
//! println!("{} resolved, {:.0}% to next badge", view.resolved_count, view.ratio * 100.0);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    BadgeCatalog, BadgeResolution, BadgeTier, CachedBadge, Config, NewReport, Report,
    ReportStatus, UserIdentity,
};
pub use domain::ports::{AuthGateway, IdentityDecoder, KeyValueStore, ReportGateway};
pub use domain::{DomainError, DomainResult, LoginFailure};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    resolve, AuthService, BadgeCacheSync, ProgressSession, ProgressView, ReportService,
    ReportTallyFetcher, SessionPhase,
};
