use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Keys the client persists locally.
pub mod storage_keys {
    /// Bearer token from the last login or registration.
    pub const TOKEN: &str = "token";
    /// Serialized [`CachedBadge`](crate::domain::models::CachedBadge).
    pub const CURRENT_BADGE: &str = "currentBadge";
    /// Legacy completed-cycle counter. Never written; removed on reset.
    pub const COMPLETED_CHALLENGES: &str = "completedChallenges";
}

/// Local string key-value storage
///
/// Values are opaque strings; callers serialize structured values as JSON.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` if present
    /// * `Ok(None)` if absent
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
