use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AuthToken, NewReport, Report};

/// Backend report endpoints
#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// List every report visible to the token's request scope
    async fn list_reports(&self, token: &AuthToken) -> DomainResult<Vec<Report>>;

    /// Submit a new report, returning the stored report
    async fn create_report(&self, token: &AuthToken, report: &NewReport) -> DomainResult<Report>;
}
