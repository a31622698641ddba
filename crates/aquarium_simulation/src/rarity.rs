//! Rarity tiers и spawn weights
//!
//! Tier ordinal grows with rarity. New tiers are appended at the end so
//! stored ordinals (and bucketing order) never shift.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tier of a fish (data tag + weighting key)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize,
)]
pub enum RarityTier {
    Common,
    Rare,
    Epic,
}

impl RarityTier {
    /// All tiers in ordinal order (bucketing order)
    pub const ALL: [RarityTier; 3] = [RarityTier::Common, RarityTier::Rare, RarityTier::Epic];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Display label (UI text)
    pub fn label(self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relative spawn weight per tier
///
/// Вероятность тира = weight / total. Веса целые, как в редакторе уровней.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityWeights {
    pub common: u32,
    pub rare: u32,
    pub epic: u32,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: 70,
            rare: 25,
            epic: 5,
        }
    }
}

impl RarityWeights {
    pub fn new(common: u32, rare: u32, epic: u32) -> Self {
        Self { common, rare, epic }
    }

    pub fn weight(&self, tier: RarityTier) -> u32 {
        match tier {
            RarityTier::Common => self.common,
            RarityTier::Rare => self.rare,
            RarityTier::Epic => self.epic,
        }
    }

    /// Sum of all weights (u64 so three u32::MAX never overflow)
    pub fn total(&self) -> u64 {
        RarityTier::ALL
            .iter()
            .map(|&tier| u64::from(self.weight(tier)))
            .sum()
    }

    /// Map a roll in `[0, total)` to a tier
    ///
    /// Linear scan Common → Rare → Epic: first bucket whose cumulative upper
    /// bound exceeds `roll` wins. Zero-weight tiers have an empty bucket and
    /// are never chosen. Returns `None` when `roll >= total`.
    pub fn tier_for_roll(&self, roll: u64) -> Option<RarityTier> {
        let mut upper = 0u64;
        for tier in RarityTier::ALL {
            upper += u64::from(self.weight(tier));
            if roll < upper {
                return Some(tier);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_tier_ordinals_are_stable() {
        assert_eq!(RarityTier::Common.ordinal(), 0);
        assert_eq!(RarityTier::Rare.ordinal(), 1);
        assert_eq!(RarityTier::Epic.ordinal(), 2);
        assert!(RarityTier::Common < RarityTier::Epic);
    }

    #[test]
    fn test_default_weights() {
        let weights = RarityWeights::default();
        assert_eq!(weights.total(), 100);
    }

    #[rstest]
    #[case(0, Some(RarityTier::Common))]
    #[case(69, Some(RarityTier::Common))]
    #[case(70, Some(RarityTier::Rare))]
    #[case(94, Some(RarityTier::Rare))]
    #[case(95, Some(RarityTier::Epic))]
    #[case(99, Some(RarityTier::Epic))]
    #[case(100, None)]
    fn test_cumulative_bucketing(#[case] roll: u64, #[case] expected: Option<RarityTier>) {
        let weights = RarityWeights::new(70, 25, 5);
        assert_eq!(weights.tier_for_roll(roll), expected);
    }

    #[test]
    fn test_zero_weight_tier_never_chosen() {
        let weights = RarityWeights::new(0, 3, 0);
        for roll in 0..3 {
            assert_eq!(weights.tier_for_roll(roll), Some(RarityTier::Rare));
        }
    }

    #[test]
    fn test_total_does_not_overflow() {
        let weights = RarityWeights::new(u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(weights.total(), 3 * u64::from(u32::MAX));
    }
}
