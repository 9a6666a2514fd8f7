//! One screen session of badge progress.
//!
//! Ties the tally fetcher, resolver, and cache sync together and walks the
//! `Idle -> Fetching -> Resolved -> (Unchanged | TierAdvanced) -> Idle`
//! cycle. Overlapping refreshes are tagged with a generation number; only
//! the newest one is allowed to touch state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::badge_cache::{BadgeCacheSync, ReconcileOutcome, TierChange};
use super::report_tally::ReportTallyFetcher;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AuthToken, BadgeCatalog, CachedBadge, UserIdentity};
use crate::domain::ports::{storage_keys, IdentityDecoder, KeyValueStore, ReportGateway};

/// Where the session is in its refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Fetching,
    Resolved,
    Unchanged,
    TierAdvanced,
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Everything a progress screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressView {
    pub resolved_count: u32,
    pub completed_cycles: u32,
    pub cycle_progress: u32,
    pub cycle_goal: u32,
    /// Fill ratio in `0.0..1.0`.
    pub ratio: f64,
    pub badge: Option<CachedBadge>,
    pub milestone_reached: bool,
    /// Outcome of the pass that produced this view.
    pub phase: SessionPhase,
}

impl ProgressView {
    fn from_outcome(outcome: &ReconcileOutcome) -> Self {
        let resolution = &outcome.resolution;
        Self {
            resolved_count: resolution.resolved_count,
            completed_cycles: resolution.completed_cycles,
            cycle_progress: resolution.cycle_progress,
            cycle_goal: resolution.cycle_goal,
            ratio: resolution.progress_ratio(),
            badge: resolution.tier.as_ref().map(CachedBadge::from),
            milestone_reached: outcome.milestone_reached,
            phase: if outcome.change == TierChange::Advanced {
                SessionPhase::TierAdvanced
            } else {
                SessionPhase::Unchanged
            },
        }
    }
}

struct SessionState {
    phase: SessionPhase,
    last_view: Option<ProgressView>,
}

pub struct ProgressSession<S, G, D>
where
    S: KeyValueStore,
    G: ReportGateway,
    D: IdentityDecoder,
{
    store: Arc<S>,
    decoder: Arc<D>,
    tally: ReportTallyFetcher<G>,
    cache: BadgeCacheSync<S>,
    generation: AtomicU64,
    state: Mutex<SessionState>,
}

impl<S, G, D> ProgressSession<S, G, D>
where
    S: KeyValueStore,
    G: ReportGateway,
    D: IdentityDecoder,
{
    pub fn new(store: Arc<S>, gateway: Arc<G>, decoder: Arc<D>, catalog: BadgeCatalog) -> Self {
        Self {
            cache: BadgeCacheSync::new(store.clone(), catalog),
            tally: ReportTallyFetcher::new(gateway),
            store,
            decoder,
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState {
                phase: SessionPhase::Idle,
                last_view: None,
            }),
        }
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.lock().await.phase
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        self.cache.catalog()
    }

    /// Render from the cached badge alone, before any network call.
    pub async fn cached_view(&self) -> ProgressView {
        ProgressView {
            resolved_count: 0,
            completed_cycles: 0,
            cycle_progress: 0,
            cycle_goal: self.catalog().cycle_size().get(),
            ratio: 0.0,
            badge: self.cache.cached_badge().await,
            milestone_reached: false,
            phase: SessionPhase::Idle,
        }
    }

    /// Full pass: identity, tally, resolve, reconcile.
    ///
    /// An identity failure aborts before any request and returns the last
    /// rendered view (or the cached one on a first run). A failed fetch renders
    /// 0 but leaves the cached badge and milestone baseline alone. A fetch
    /// that was overtaken by a newer refresh returns the newer state.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> ProgressView {
        let (token, identity) = match self.identity().await {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, "no usable identity, skipping report fetch");
                return self.latest_view().await;
            }
        };

        let ticket = self.begin_fetch().await;
        let applied = match self.tally.count_resolved(&token, &identity).await {
            Some(count) => self.apply(ticket, count).await,
            None => self.apply_failed(ticket).await,
        };

        match applied {
            Some(view) => view,
            None => self.latest_view().await,
        }
    }

    /// Start a fetch. Any ticket issued earlier becomes stale.
    pub async fn begin_fetch(&self) -> FetchTicket {
        let mut state = self.state.lock().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        state.phase = SessionPhase::Fetching;
        debug!(generation, "fetch started");
        FetchTicket { generation }
    }

    /// Apply a tally if `ticket` is still the newest fetch.
    ///
    /// Returns `None` for stale tickets without touching the cache.
    pub async fn apply(&self, ticket: FetchTicket, resolved_count: u32) -> Option<ProgressView> {
        let mut state = self.state.lock().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if ticket.generation != latest {
            debug!(
                generation = ticket.generation,
                latest, resolved_count, "dropping stale fetch result"
            );
            return None;
        }

        state.phase = SessionPhase::Resolved;
        let outcome = self.cache.reconcile(resolved_count).await;
        let view = ProgressView::from_outcome(&outcome);

        if view.phase == SessionPhase::TierAdvanced {
            info!(
                generation = ticket.generation,
                resolved_count,
                tier_rank = ?outcome.resolution.tier_rank(),
                "tier advanced"
            );
        }

        state.last_view = Some(view.clone());
        state.phase = SessionPhase::Idle;
        Some(view)
    }

    /// Record a failed fetch if `ticket` is still the newest one.
    ///
    /// The view shows a zero tally with whatever badge is cached; nothing is
    /// reconciled.
    pub async fn apply_failed(&self, ticket: FetchTicket) -> Option<ProgressView> {
        let mut state = self.state.lock().await;
        if ticket.generation != self.generation.load(Ordering::SeqCst) {
            debug!(generation = ticket.generation, "dropping stale fetch failure");
            return None;
        }

        let view = ProgressView {
            phase: SessionPhase::Unchanged,
            ..self.cached_view().await
        };
        state.last_view = Some(view.clone());
        state.phase = SessionPhase::Idle;
        Some(view)
    }

    async fn latest_view(&self) -> ProgressView {
        let last = self.state.lock().await.last_view.clone();
        match last {
            Some(view) => view,
            None => self.cached_view().await,
        }
    }

    async fn identity(&self) -> DomainResult<(AuthToken, UserIdentity)> {
        let raw = self
            .store
            .get(storage_keys::TOKEN)
            .await?
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::NotAuthenticated)?;
        let token = AuthToken::new(raw);
        let identity = self.decoder.decode(&token)?;
        Ok((token, identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryKeyValueStore;
    use crate::domain::models::{NewReport, Report};
    use async_trait::async_trait;

    struct NoReports;

    #[async_trait]
    impl ReportGateway for NoReports {
        async fn list_reports(&self, _token: &AuthToken) -> DomainResult<Vec<Report>> {
            Ok(Vec::new())
        }

        async fn create_report(&self, _token: &AuthToken, _report: &NewReport) -> DomainResult<Report> {
            Err(DomainError::Transport("unused".to_string()))
        }
    }

    struct FixedIdentity;

    impl IdentityDecoder for FixedIdentity {
        fn decode(&self, _token: &AuthToken) -> DomainResult<UserIdentity> {
            Ok(UserIdentity::new("u1"))
        }
    }

    fn session() -> ProgressSession<InMemoryKeyValueStore, NoReports, FixedIdentity> {
        ProgressSession::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(NoReports),
            Arc::new(FixedIdentity),
            BadgeCatalog::default(),
        )
    }

    #[tokio::test]
    async fn test_stale_ticket_is_dropped() {
        let session = session();

        let old = session.begin_fetch().await;
        let new = session.begin_fetch().await;
        assert!(new.generation() > old.generation());

        assert!(session.apply(old, 30).await.is_none());
        assert_eq!(session.phase().await, SessionPhase::Fetching);

        let view = session.apply(new, 12).await.unwrap();
        assert_eq!(view.resolved_count, 12);
        assert_eq!(view.phase, SessionPhase::TierAdvanced);
        assert_eq!(session.phase().await, SessionPhase::Idle);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_cache() {
        let session = session();
        let ticket = session.begin_fetch().await;
        session.apply(ticket, 10).await.unwrap();

        let ticket = session.begin_fetch().await;
        let view = session.apply_failed(ticket).await.unwrap();
        assert_eq!(view.resolved_count, 0);
        assert_eq!(view.badge.unwrap().id, 1);
        assert_eq!(view.phase, SessionPhase::Unchanged);
        assert_eq!(session.phase().await, SessionPhase::Idle);

        let stale = session.begin_fetch().await;
        session.begin_fetch().await;
        assert!(session.apply_failed(stale).await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_without_token_keeps_previous_view() {
        let session = session();
        let view = session.refresh().await;
        assert_eq!(view.resolved_count, 0);
        assert_eq!(view.phase, SessionPhase::Idle);
        assert_eq!(session.phase().await, SessionPhase::Idle);
    }

    #[tokio::test]
    async fn test_cached_view_uses_cycle_size_as_goal() {
        let view = session().cached_view().await;
        assert_eq!(view.cycle_goal, 10);
        assert!(view.badge.is_none());
    }
}
