//! Aquarium Simulation Core
//!
//! ECS-симуляция аквариума на Bevy 0.16 (headless, no rendering).
//!
//! LAYERING:
//! - Simulation = fish data, rarity-weighted spawning, waypoint navigation
//! - Client = meshes, materials, camera, UI text (reads `FishAppearance`,
//!   `FishInspection`, `FishRegistry`)
//!
//! Determinism: fixed 60Hz timestep + one seeded ChaCha8 RNG shared by the
//! spawner and every navigator.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::time::Duration;

pub mod catalog;
pub mod components;
pub mod config;
pub mod inspect;
pub mod logger;
pub mod navigation;
pub mod rarity;
pub mod registry;
pub mod selector;
pub mod spawner;

pub use catalog::{load_catalog, CatalogError, FishDescriptor, SpawnCatalog, SurfaceColor};
pub use components::{Fish, FishAppearance, TankBounds};
pub use config::{load_config, AquariumConfig, ConfigError, NavigationConfig};
pub use inspect::FishInspection;
pub use logger::*;
pub use navigation::{FishRetargeted, NavigationPlugin, NavigatorStep, WaypointNavigator};
pub use rarity::{RarityTier, RarityWeights};
pub use registry::FishRegistry;
pub use selector::{select, Selection};
pub use spawner::{
    spawn_fish, FishSpawned, ReleaseFish, SpawnError, SpawnFish, SpawnParams, SpawningPlugin,
};

/// Simulation tick rate
pub const FIXED_HZ: f64 = 60.0;

/// Length of one fixed tick
pub fn fixed_timestep() -> Duration {
    Duration::from_secs_f64(1.0 / FIXED_HZ)
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Inserts config, catalog, tank bounds and the RNG (unless the host already
/// provided one, e.g. `create_headless_app` with an explicit seed).
#[derive(Clone, Default)]
pub struct SimulationPlugin {
    pub config: AquariumConfig,
    pub catalog: SpawnCatalog,
}

impl SimulationPlugin {
    pub fn new(config: AquariumConfig, catalog: SpawnCatalog) -> Self {
        Self { config, catalog }
    }

    /// Build from a config file; the catalog comes from `catalog_path`
    /// (override > config file, relative to it > built-in stock)
    pub fn from_files(config_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_path {
            Some(path) => load_config(path)?,
            None => AquariumConfig::default(),
        };

        let catalog_file = match catalog_path {
            Some(path) => Some(path.to_path_buf()),
            None => config.resolve_catalog_path(config_path),
        };
        let catalog = match catalog_file {
            Some(path) => load_catalog(&path)?,
            None => SpawnCatalog::default(),
        };

        Ok(Self { config, catalog })
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(self.config.seed));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_duration(fixed_timestep()))
            .insert_resource(self.config.clone())
            .insert_resource(self.catalog.clone())
            .insert_resource(TankBounds::from(self.config.tank))
            .register_type::<TankBounds>()
            .add_plugins((NavigationPlugin, SpawningPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Time advances by exactly one fixed tick per `app.update()` (after the
/// first update, which only starts the clock), so runs are reproducible
/// regardless of wall-clock speed.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(fixed_timestep()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(fixed_timestep()));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Entities sorted by index, component formatted via Debug.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
