//! Базовые ECS компоненты аквариума
//!
//! - Fish: descriptor копия (что за рыба)
//! - FishAppearance: то, что нужно рендеру (surface color + uniform scale)
//! - TankBounds: swim envelope (resource)

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::{FishDescriptor, SurfaceColor};
use crate::config::TankConfig;

/// Fish marker + its authored data
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Fish {
    pub descriptor: FishDescriptor,
}

/// Render-facing appearance (setSurfaceColor / setUniformScale)
///
/// Simulation пишет, клиент читает. Nothing else couples core to rendering.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FishAppearance {
    pub color: SurfaceColor,
    pub scale: f32,
}

impl From<&FishDescriptor> for FishAppearance {
    fn from(descriptor: &FishDescriptor) -> Self {
        Self {
            color: descriptor.color,
            scale: descriptor.size,
        }
    }
}

/// Axis-aligned swim envelope (resource)
///
/// Инвариант: size ≥ 0 по всем осям (caller contract, не проверяется здесь)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct TankBounds {
    pub center: Vec3,
    pub size: Vec3,
}

impl Default for TankBounds {
    fn default() -> Self {
        TankConfig::default().into()
    }
}

impl From<TankConfig> for TankBounds {
    fn from(config: TankConfig) -> Self {
        Self {
            center: Vec3::from_array(config.center),
            size: Vec3::from_array(config.size),
        }
    }
}

impl TankBounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        point.cmpge(min).all() && point.cmple(max).all()
    }

    /// Uniform point inside the box, componentwise
    ///
    /// Zero-size axis returns the center coordinate exactly.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let unit = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
        self.center + self.size * (unit - Vec3::splat(0.5))
    }
}
