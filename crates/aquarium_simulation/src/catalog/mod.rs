//! Fish catalog: статические описания рыб
//!
//! # Architecture
//!
//! **FishDescriptor**: immutable authored record (name, tier, size, speed, color).
//! Created once at configuration time, cloned into the `Fish` component on spawn.
//!
//! **SpawnCatalog**: ordered list of descriptors owned by the spawner.
//! Duplicates are fine, a tier may have zero members. An empty catalog is
//! representable here; it only becomes an error when a spawn is attempted.
//!
//! Catalogs come either from `SpawnCatalog::default()` (hardcoded stock) or
//! from a RON file via `load_catalog`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

use crate::rarity::RarityTier;

/// Authored size factor range (uniform scale)
pub const SIZE_RANGE: RangeInclusive<f32> = 0.3..=3.0;
/// Authored speed range (units per second)
pub const SPEED_RANGE: RangeInclusive<f32> = 0.5..=5.0;

// ============================================================================
// SurfaceColor
// ============================================================================

/// RGBA surface color, each channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct SurfaceColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl SurfaceColor {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub fn channels(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

// ============================================================================
// FishDescriptor
// ============================================================================

/// Static fish definition (blueprint)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct FishDescriptor {
    /// Display name
    pub name: String,
    /// Rarity tier (spawn weight key + label)
    pub tier: RarityTier,
    /// Uniform scale factor, `SIZE_RANGE`
    pub size: f32,
    /// Swim speed, `SPEED_RANGE`
    pub speed: f32,
    /// Surface color
    pub color: SurfaceColor,
}

impl FishDescriptor {
    pub fn new(
        name: impl Into<String>,
        tier: RarityTier,
        size: f32,
        speed: f32,
        color: SurfaceColor,
    ) -> Self {
        Self {
            name: name.into(),
            tier,
            size,
            speed,
            color,
        }
    }

    /// Check authored ranges
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if !SIZE_RANGE.contains(&self.size) {
            return Err(CatalogError::SizeOutOfRange {
                name: self.name.clone(),
                size: self.size,
            });
        }
        if !SPEED_RANGE.contains(&self.speed) {
            return Err(CatalogError::SpeedOutOfRange {
                name: self.name.clone(),
                speed: self.speed,
            });
        }
        if self
            .color
            .channels()
            .iter()
            .any(|channel| !(0.0..=1.0).contains(channel))
        {
            return Err(CatalogError::ColorOutOfRange {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("fish descriptor has an empty name")]
    EmptyName,
    #[error("fish '{name}': size {size} outside 0.3..=3.0")]
    SizeOutOfRange { name: String, size: f32 },
    #[error("fish '{name}': speed {speed} outside 0.5..=5.0")]
    SpeedOutOfRange { name: String, speed: f32 },
    #[error("fish '{name}': color channel outside 0..=1")]
    ColorOutOfRange { name: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

// ============================================================================
// SpawnCatalog (Resource)
// ============================================================================

/// Ordered fish catalog (resource)
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnCatalog {
    entries: Vec<FishDescriptor>,
}

impl SpawnCatalog {
    /// Build a validated catalog
    pub fn new(entries: Vec<FishDescriptor>) -> Result<Self, CatalogError> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    /// Empty catalog (spawns will fail until something is added)
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a validated descriptor
    pub fn add(&mut self, descriptor: FishDescriptor) -> Result<(), CatalogError> {
        descriptor.validate()?;
        self.entries.push(descriptor);
        Ok(())
    }

    pub fn entries(&self) -> &[FishDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptors of one tier, in catalog order
    pub fn of_tier(&self, tier: RarityTier) -> Vec<&FishDescriptor> {
        self.entries.iter().filter(|entry| entry.tier == tier).collect()
    }

    pub fn find(&self, name: &str) -> Option<&FishDescriptor> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl Default for SpawnCatalog {
    /// Hardcoded aquarium stock (all three tiers)
    fn default() -> Self {
        Self {
            entries: builtin_fish(),
        }
    }
}

/// Load a catalog from a RON list of `FishDescriptor`
pub fn load_catalog(path: &Path) -> Result<SpawnCatalog, CatalogError> {
    let contents = fs::read_to_string(path)?;
    parse_catalog(&contents)
}

/// Parse + validate catalog RON text
pub fn parse_catalog(contents: &str) -> Result<SpawnCatalog, CatalogError> {
    let entries: Vec<FishDescriptor> = ron::from_str(contents)?;
    SpawnCatalog::new(entries)
}

fn builtin_fish() -> Vec<FishDescriptor> {
    vec![
        // === COMMON ===
        FishDescriptor::new(
            "Clownfish",
            RarityTier::Common,
            0.6,
            2.0,
            SurfaceColor::rgb(1.0, 0.45, 0.1),
        ),
        FishDescriptor::new(
            "Neon Tetra",
            RarityTier::Common,
            0.3,
            3.5,
            SurfaceColor::rgb(0.1, 0.6, 1.0),
        ),
        FishDescriptor::new(
            "Guppy",
            RarityTier::Common,
            0.4,
            2.8,
            SurfaceColor::rgb(0.9, 0.8, 0.2),
        ),
        FishDescriptor::new(
            "Goldfish",
            RarityTier::Common,
            0.8,
            1.5,
            SurfaceColor::rgb(1.0, 0.6, 0.0),
        ),
        // === RARE ===
        FishDescriptor::new(
            "Angelfish",
            RarityTier::Rare,
            1.2,
            1.8,
            SurfaceColor::rgb(0.95, 0.95, 0.85),
        ),
        FishDescriptor::new(
            "Blue Tang",
            RarityTier::Rare,
            1.0,
            2.5,
            SurfaceColor::rgb(0.1, 0.3, 0.9),
        ),
        FishDescriptor::new(
            "Lionfish",
            RarityTier::Rare,
            1.4,
            1.2,
            SurfaceColor::rgb(0.8, 0.2, 0.2),
        ),
        // === EPIC ===
        FishDescriptor::new(
            "Golden Koi",
            RarityTier::Epic,
            2.2,
            1.0,
            SurfaceColor::rgb(1.0, 0.84, 0.0),
        ),
        FishDescriptor::new(
            "Ghost Jellyfish",
            RarityTier::Epic,
            1.6,
            0.6,
            SurfaceColor::rgba(0.8, 0.9, 1.0, 0.5),
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================
