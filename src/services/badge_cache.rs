//! Reconciles freshly resolved badge state with the locally cached badge.
//!
//! The cache is only a head start for rendering: the resolved count from the
//! backend always wins, and a failing store never blocks a render.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::models::{BadgeCatalog, BadgeResolution, CachedBadge};
use crate::domain::ports::{storage_keys, KeyValueStore};

/// How the resolved tier compares to the cached one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierChange {
    Unchanged,
    Advanced,
    /// The count dropped below the cached tier (a status was reverted).
    Regressed,
    /// The count fell to 0 and the cached badge was removed.
    Cleared,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileOutcome {
    pub resolution: BadgeResolution,
    pub change: TierChange,
    /// Set exactly once per tier crossing that lands on a cycle boundary.
    pub milestone_reached: bool,
}

pub struct BadgeCacheSync<S: KeyValueStore> {
    store: Arc<S>,
    catalog: BadgeCatalog,
    /// Completed cycles seen by the previous pass of this session.
    last_completed_cycles: Mutex<Option<u32>>,
}

impl<S: KeyValueStore> BadgeCacheSync<S> {
    pub fn new(store: Arc<S>, catalog: BadgeCatalog) -> Self {
        Self {
            store,
            catalog,
            last_completed_cycles: Mutex::new(None),
        }
    }

    pub const fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    /// Read the cached badge. Unreadable or corrupt entries count as absent.
    pub async fn cached_badge(&self) -> Option<CachedBadge> {
        let raw = match self.store.get(storage_keys::CURRENT_BADGE).await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(error = %err, "failed to read cached badge");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(badge) => Some(badge),
            Err(err) => {
                warn!(error = %err, "cached badge is not valid JSON, ignoring");
                None
            }
        }
    }

    /// Resolve `resolved_count` and bring the cache in line with it.
    pub async fn reconcile(&self, resolved_count: u32) -> ReconcileOutcome {
        let resolution = self.catalog.resolve(resolved_count);
        let cached = self.cached_badge().await;
        let cached_rank = cached.as_ref().map(|b| b.id);

        let mut last_completed = self.last_completed_cycles.lock().await;
        // On the first pass the cached rank is the best estimate of how many
        // cycles were already celebrated.
        let previous_completed = last_completed.unwrap_or_else(|| cached_rank.unwrap_or(0));

        if resolved_count == 0 {
            self.remove(storage_keys::CURRENT_BADGE).await;
            self.remove(storage_keys::COMPLETED_CHALLENGES).await;
            *last_completed = Some(0);

            let change = if cached.is_some() {
                TierChange::Cleared
            } else {
                TierChange::Unchanged
            };
            debug!(?change, "resolved count is 0, badge cache cleared");
            return ReconcileOutcome {
                resolution,
                change,
                milestone_reached: false,
            };
        }

        let new_rank = resolution.tier_rank();
        let mut milestone_reached = false;

        let change = if new_rank == cached_rank {
            TierChange::Unchanged
        } else {
            match &resolution.tier {
                Some(tier) => self.persist(&CachedBadge::from(tier)).await,
                None => self.remove(storage_keys::CURRENT_BADGE).await,
            }

            milestone_reached =
                resolution.on_cycle_boundary() && previous_completed < resolution.completed_cycles;

            if new_rank > cached_rank {
                TierChange::Advanced
            } else {
                TierChange::Regressed
            }
        };

        *last_completed = Some(resolution.completed_cycles);

        if milestone_reached {
            info!(
                resolved_count,
                tier_rank = ?new_rank,
                completed_cycles = resolution.completed_cycles,
                "milestone reached"
            );
        } else {
            debug!(resolved_count, tier_rank = ?new_rank, ?change, "badge reconciled");
        }

        ReconcileOutcome {
            resolution,
            change,
            milestone_reached,
        }
    }

    async fn persist(&self, badge: &CachedBadge) {
        let value = match serde_json::to_string(badge) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "failed to serialize badge");
                return;
            }
        };
        if let Err(err) = self.store.set(storage_keys::CURRENT_BADGE, &value).await {
            warn!(error = %err, tier_rank = badge.id, "failed to persist badge");
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(err) = self.store.remove(key).await {
            warn!(error = %err, key, "failed to remove cached entry");
        }
    }
}
