//! Fish registry: explicit entity → tier tagging
//!
//! Вместо поиска по строковым тегам: спавнер регистрирует каждую рыбу,
//! UI спрашивает count по тиру.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::Fish;
use crate::rarity::RarityTier;

/// Live fish by tier (resource)
#[derive(Resource, Debug, Clone, Default)]
pub struct FishRegistry {
    tiers: HashMap<Entity, RarityTier>,
}

impl FishRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a fish (re-registering overwrites the tier)
    pub fn register(&mut self, entity: Entity, tier: RarityTier) {
        self.tiers.insert(entity, tier);
    }

    /// Forget a fish, returns its tier if it was known
    pub fn unregister(&mut self, entity: Entity) -> Option<RarityTier> {
        self.tiers.remove(&entity)
    }

    pub fn tier_of(&self, entity: Entity) -> Option<RarityTier> {
        self.tiers.get(&entity).copied()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.tiers.contains_key(&entity)
    }

    pub fn count(&self, tier: RarityTier) -> usize {
        self.tiers.values().filter(|&&t| t == tier).count()
    }

    pub fn total(&self) -> usize {
        self.tiers.len()
    }

    /// Counts for every tier, ordinal order
    pub fn counts(&self) -> [(RarityTier, usize); 3] {
        RarityTier::ALL.map(|tier| (tier, self.count(tier)))
    }

    /// Registered entities sorted by index (stable order for UI cycling)
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.tiers.keys().copied().collect();
        entities.sort_by_key(|entity| entity.index());
        entities
    }
}

/// Система: drop registry entries of fish that lost their `Fish` component
/// (despawned by anything, not only ReleaseFish)
pub fn forget_removed_fish(mut removed: RemovedComponents<Fish>, mut registry: ResMut<FishRegistry>) {
    for entity in removed.read() {
        if registry.unregister(entity).is_some() {
            crate::log(&format!("Registry: {:?} removed, {} fish left", entity, registry.total()));
        }
    }
}
