//! Badge tier and challenge-cycle resolution.
//!
//! Pure functions: the same resolved count always yields the same tier and
//! progress, and nothing here touches storage or the network.

use std::num::NonZeroU32;

use crate::domain::models::{BadgeCatalog, BadgeResolution, BadgeTier};

/// Resolve a resolved-report count into a tier and in-cycle progress.
///
/// `completed_cycles = count / cycle_size`; the tier is the
/// `completed_cycles`-th one, clamped to the last configured tier. With no
/// completed cycle (or no tiers) there is no tier.
pub fn resolve(resolved_count: u32, cycle_size: NonZeroU32, tiers: &[BadgeTier]) -> BadgeResolution {
    let cycle_goal = cycle_size.get();

    if resolved_count == 0 {
        return BadgeResolution {
            resolved_count,
            tier: None,
            completed_cycles: 0,
            cycle_progress: 0,
            cycle_goal,
        };
    }

    let completed_cycles = resolved_count / cycle_goal;
    let cycle_progress = resolved_count - completed_cycles * cycle_goal;

    let tier = completed_cycles
        .checked_sub(1)
        .and_then(|index| {
            let last = tiers.len().checked_sub(1)?;
            tiers.get((index as usize).min(last))
        })
        .cloned();

    BadgeResolution {
        resolved_count,
        tier,
        completed_cycles,
        cycle_progress,
        cycle_goal,
    }
}

impl BadgeCatalog {
    /// Resolve `resolved_count` against this catalog.
    pub fn resolve(&self, resolved_count: u32) -> BadgeResolution {
        resolve(resolved_count, self.cycle_size(), self.tiers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> BadgeCatalog {
        BadgeCatalog::default()
    }

    #[test]
    fn test_zero_has_no_tier() {
        let r = catalog().resolve(0);
        assert!(r.tier.is_none());
        assert_eq!(r.completed_cycles, 0);
        assert_eq!(r.cycle_progress, 0);
        assert_eq!(r.cycle_goal, 10);
    }

    #[test]
    fn test_below_first_cycle_has_no_tier() {
        let r = catalog().resolve(9);
        assert!(r.tier.is_none());
        assert_eq!(r.completed_cycles, 0);
        assert_eq!(r.cycle_progress, 9);
    }

    #[test]
    fn test_first_boundary() {
        let r = catalog().resolve(10);
        assert_eq!(r.completed_cycles, 1);
        assert_eq!(r.tier_index(), Some(0));
        assert_eq!(r.cycle_progress, 0);
        assert!(r.on_cycle_boundary());
    }

    #[test]
    fn test_mid_cycle() {
        let r = catalog().resolve(35);
        assert_eq!(r.completed_cycles, 3);
        assert_eq!(r.tier_index(), Some(2));
        assert_eq!(r.cycle_progress, 5);
    }

    #[test]
    fn test_clamps_to_last_tier() {
        let r = catalog().resolve(100);
        assert_eq!(r.completed_cycles, 10);
        assert_eq!(r.tier_index(), Some(3));
        assert_eq!(r.cycle_progress, 0);
    }

    #[test]
    fn test_empty_tier_list() {
        let r = resolve(25, NonZeroU32::new(10).unwrap(), &[]);
        assert!(r.tier.is_none());
        assert_eq!(r.completed_cycles, 2);
        assert_eq!(r.cycle_progress, 5);
    }

    #[test]
    fn test_cycle_size_one() {
        let catalog = BadgeCatalog::new(1, [("A", "a"), ("B", "b")]).unwrap();
        let r = catalog.resolve(7);
        assert_eq!(r.completed_cycles, 7);
        assert_eq!(r.tier_rank(), Some(2));
        assert_eq!(r.cycle_progress, 0);
    }

    #[test]
    fn test_handles_max_count() {
        let r = catalog().resolve(u32::MAX);
        assert_eq!(r.completed_cycles, u32::MAX / 10);
        assert_eq!(r.cycle_progress, u32::MAX % 10);
        assert_eq!(r.tier_rank(), Some(4));
    }
}
