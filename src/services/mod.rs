pub mod auth_service;
pub mod badge_cache;
pub mod badge_resolver;
pub mod progress_session;
pub mod report_service;
pub mod report_tally;

pub use auth_service::AuthService;
pub use badge_cache::{BadgeCacheSync, ReconcileOutcome, TierChange};
pub use badge_resolver::resolve;
pub use progress_session::{FetchTicket, ProgressSession, ProgressView, SessionPhase};
pub use report_service::ReportService;
pub use report_tally::{count_resolved_for, ReportTallyFetcher};
