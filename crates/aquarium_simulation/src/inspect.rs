//! Inspection data for the UI layer
//!
//! Core отдаёт четыре сырых значения; the label layout below is the one the
//! info panel shows.

use std::fmt;

use crate::catalog::FishDescriptor;
use crate::rarity::RarityTier;

/// Inspectable fish data
#[derive(Debug, Clone, PartialEq)]
pub struct FishInspection {
    pub name: String,
    pub tier: RarityTier,
    pub size: f32,
    pub speed: f32,
}

impl From<&FishDescriptor> for FishInspection {
    fn from(descriptor: &FishDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            tier: descriptor.tier,
            size: descriptor.size,
            speed: descriptor.speed,
        }
    }
}

impl fmt::Display for FishInspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\nTier: {}\nSize: {:.1}\nSpeed: {:.1}",
            self.name, self.tier, self.size, self.speed
        )
    }
}
