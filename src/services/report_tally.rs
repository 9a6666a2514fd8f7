//! Resolved-report tally for the signed-in user.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::models::{AuthToken, Report, UserIdentity};
use crate::domain::ports::ReportGateway;

/// Count reports owned by `user_id` that reached `Resolved`.
pub fn count_resolved_for(reports: &[Report], user_id: &str) -> u32 {
    let count = reports
        .iter()
        .filter(|r| r.status.is_resolved() && r.is_owned_by(user_id))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Fetches the report list and reduces it to a resolved count.
pub struct ReportTallyFetcher<G: ReportGateway> {
    gateway: Arc<G>,
}

impl<G: ReportGateway> ReportTallyFetcher<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Resolved reports owned by `identity`.
    ///
    /// Any fetch or parse failure is logged and yields `None`. Callers render
    /// it as 0 but must not treat it as an authoritative count.
    pub async fn count_resolved(&self, token: &AuthToken, identity: &UserIdentity) -> Option<u32> {
        match self.gateway.list_reports(token).await {
            Ok(reports) => {
                let count = count_resolved_for(&reports, &identity.user_id);
                debug!(
                    user_id = %identity.user_id,
                    total_reports = reports.len(),
                    resolved_count = count,
                    "tallied resolved reports"
                );
                Some(count)
            }
            Err(err) => {
                warn!(user_id = %identity.user_id, error = %err, "report fetch failed, tally unavailable");
                None
            }
        }
    }
}
