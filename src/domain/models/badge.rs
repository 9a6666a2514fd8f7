//! Badge tiers and challenge-cycle progress.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Resolved reports needed to complete one challenge cycle by default.
pub const DEFAULT_CYCLE_SIZE: u32 = 10;

/// One achievement level. Tier with rank `i` unlocks at `i * cycle_size`
/// resolved reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BadgeTier {
    /// 1-based position in the catalog.
    pub rank: u32,
    pub name: String,
    pub image_key: String,
}

/// The ordered tier list plus the cycle size that gates each tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeCatalog {
    cycle_size: NonZeroU32,
    tiers: Vec<BadgeTier>,
}

impl BadgeCatalog {
    /// Build a catalog from `(name, image_key)` pairs in unlock order.
    /// Ranks are assigned 1..=n.
    pub fn new<I, N, K>(cycle_size: u32, tiers: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (N, K)>,
        N: Into<String>,
        K: Into<String>,
    {
        let cycle_size = NonZeroU32::new(cycle_size).ok_or_else(|| {
            DomainError::ValidationFailed("cycle size must be at least 1".to_string())
        })?;

        let tiers: Vec<BadgeTier> = tiers
            .into_iter()
            .zip(1u32..)
            .map(|((name, image_key), rank)| BadgeTier {
                rank,
                name: name.into(),
                image_key: image_key.into(),
            })
            .collect();

        if let Some(tier) = tiers.iter().find(|t| t.name.trim().is_empty()) {
            return Err(DomainError::ValidationFailed(format!(
                "badge tier {} has an empty name",
                tier.rank
            )));
        }

        Ok(Self { cycle_size, tiers })
    }

    pub const fn cycle_size(&self) -> NonZeroU32 {
        self.cycle_size
    }

    pub fn tiers(&self) -> &[BadgeTier] {
        &self.tiers
    }

    pub fn tier_by_rank(&self, rank: u32) -> Option<&BadgeTier> {
        rank.checked_sub(1)
            .and_then(|index| self.tiers.get(index as usize))
    }
}

impl Default for BadgeCatalog {
    fn default() -> Self {
        Self {
            cycle_size: NonZeroU32::MIN.saturating_add(DEFAULT_CYCLE_SIZE - 1),
            tiers: default_tiers(),
        }
    }
}

/// The four tiers shipped with the app.
pub fn default_tiers() -> Vec<BadgeTier> {
    [
        ("Eco Starter", "badge_eco_starter"),
        ("Green Guardian", "badge_green_guardian"),
        ("Waste Warrior", "badge_waste_warrior"),
        ("Planet Protector", "badge_planet_protector"),
    ]
    .into_iter()
    .zip(1u32..)
    .map(|((name, image_key), rank)| BadgeTier {
        rank,
        name: name.to_string(),
        image_key: image_key.to_string(),
    })
    .collect()
}

/// Tier and in-cycle progress derived from a resolved-report count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeResolution {
    pub resolved_count: u32,
    pub tier: Option<BadgeTier>,
    pub completed_cycles: u32,
    pub cycle_progress: u32,
    pub cycle_goal: u32,
}

impl BadgeResolution {
    /// 0-based position of the tier in the catalog.
    pub fn tier_index(&self) -> Option<usize> {
        self.tier.as_ref().map(|t| (t.rank - 1) as usize)
    }

    pub fn tier_rank(&self) -> Option<u32> {
        self.tier.as_ref().map(|t| t.rank)
    }

    /// Fill ratio for a progress bar, in `0.0..1.0`.
    pub fn progress_ratio(&self) -> f64 {
        if self.cycle_goal == 0 {
            return 0.0;
        }
        f64::from(self.cycle_progress) / f64::from(self.cycle_goal)
    }

    /// Whether the count sits exactly on a cycle boundary.
    pub const fn on_cycle_boundary(&self) -> bool {
        self.resolved_count > 0 && self.cycle_progress == 0
    }
}

/// Serialized badge snapshot kept under `currentBadge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedBadge {
    /// Tier rank.
    pub id: u32,
    pub name: String,
    pub image_key: String,
}

impl From<&BadgeTier> for CachedBadge {
    fn from(tier: &BadgeTier) -> Self {
        Self {
            id: tier.rank,
            name: tier.name.clone(),
            image_key: tier.image_key.clone(),
        }
    }
}
