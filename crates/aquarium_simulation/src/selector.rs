//! Weighted rarity selection
//!
//! Один вызов = один descriptor. Tier is rolled by weight first, then a fish is
//! picked uniformly inside that tier. A tier with weight but no catalog
//! members falls back to a uniform pick over the whole catalog (warning
//! logged), so a non-empty catalog always yields a fish.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{FishDescriptor, SpawnCatalog};
use crate::rarity::{RarityTier, RarityWeights};
use crate::spawner::SpawnError;

/// Result of one selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    pub descriptor: &'a FishDescriptor,
    /// Tier produced by the weighted roll
    pub rolled_tier: RarityTier,
    /// true when `rolled_tier` had no members and the whole catalog was used
    pub fallback: bool,
}

/// Draw one fish from the catalog
///
/// Errors:
/// - `EmptyCatalog`: nothing to return (checked before any RNG use)
/// - `ZeroWeights`: no distribution to roll from
pub fn select<'a, R: Rng + ?Sized>(
    weights: &RarityWeights,
    catalog: &'a SpawnCatalog,
    rng: &mut R,
) -> Result<Selection<'a>, SpawnError> {
    if catalog.is_empty() {
        return Err(SpawnError::EmptyCatalog);
    }

    let total = weights.total();
    if total == 0 {
        return Err(SpawnError::ZeroWeights);
    }

    let roll = rng.gen_range(0..total);
    let rolled_tier = weights
        .tier_for_roll(roll)
        .ok_or(SpawnError::ZeroWeights)?;

    let members = catalog.of_tier(rolled_tier);
    if let Some(&descriptor) = members.choose(rng) {
        return Ok(Selection {
            descriptor,
            rolled_tier,
            fallback: false,
        });
    }

    crate::log_warning(&format!(
        "Selector: tier {} rolled but catalog has no {} fish, falling back to full catalog ({} entries)",
        rolled_tier,
        rolled_tier,
        catalog.len()
    ));

    let descriptor = catalog
        .entries()
        .choose(rng)
        .ok_or(SpawnError::EmptyCatalog)?;

    Ok(Selection {
        descriptor,
        rolled_tier,
        fallback: true,
    })
}
