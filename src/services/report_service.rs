//! Report submission and listing for the signed-in user.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AuthToken, NewReport, Report, UserIdentity};
use crate::domain::ports::{storage_keys, KeyValueStore, ReportGateway};

pub struct ReportService<S: KeyValueStore, G: ReportGateway> {
    store: Arc<S>,
    gateway: Arc<G>,
}

impl<S: KeyValueStore, G: ReportGateway> ReportService<S, G> {
    pub const fn new(store: Arc<S>, gateway: Arc<G>) -> Self {
        Self { store, gateway }
    }

    /// Validate and upload a new report.
    #[instrument(skip_all, fields(landmark = %report.landmark))]
    pub async fn submit(&self, report: &NewReport) -> DomainResult<Report> {
        report.validate().map_err(DomainError::ValidationFailed)?;
        let token = self.token().await?;

        let created = self.gateway.create_report(&token, report).await?;
        info!(report_id = %created.id, "report submitted");
        Ok(created)
    }

    /// Every report visible to the stored token.
    pub async fn list(&self) -> DomainResult<Vec<Report>> {
        let token = self.token().await?;
        let reports = self.gateway.list_reports(&token).await?;
        debug!(count = reports.len(), "listed reports");
        Ok(reports)
    }

    /// Reports owned by `identity`, newest first.
    pub async fn list_mine(&self, identity: &UserIdentity) -> DomainResult<Vec<Report>> {
        let mut reports: Vec<Report> = self
            .list()
            .await?
            .into_iter()
            .filter(|r| r.is_owned_by(&identity.user_id))
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    async fn token(&self) -> DomainResult<AuthToken> {
        self.store
            .get(storage_keys::TOKEN)
            .await?
            .filter(|t| !t.is_empty())
            .map(AuthToken::new)
            .ok_or(DomainError::NotAuthenticated)
    }
}

/// Keep reports whose status label matches `status`, ignoring case.
pub fn filter_by_status(reports: Vec<Report>, status: &str) -> Vec<Report> {
    let wanted = status.trim();
    reports
        .into_iter()
        .filter(|r| r.status.as_str().eq_ignore_ascii_case(wanted))
        .collect()
}
