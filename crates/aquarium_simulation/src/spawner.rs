//! Fish spawner
//!
//! Flow (один spawn request):
//! 1. capacity check (max_population)
//! 2. `selector::select` → descriptor (weighted tier, fallback on empty tier)
//! 3. spawn entity: Fish + Name + FishAppearance + Transform + WaypointNavigator
//! 4. tag in FishRegistry, emit FishSpawned
//!
//! Errors abort that one spawn, get logged, and the simulation keeps running.
//! Spawn requests are designer/user triggered, so nothing is retried.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

use crate::catalog::SpawnCatalog;
use crate::components::{Fish, FishAppearance, TankBounds};
use crate::config::{AquariumConfig, NavigationConfig};
use crate::navigation::WaypointNavigator;
use crate::rarity::{RarityTier, RarityWeights};
use crate::registry::FishRegistry;
use crate::selector;
use crate::DeterministicRng;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpawnError {
    #[error("spawn catalog is empty, nothing to spawn")]
    EmptyCatalog,
    #[error("all rarity weights are zero")]
    ZeroWeights,
    #[error("tank is full ({capacity} fish)")]
    TankFull { capacity: usize },
}

// ============================================================================
// Events
// ============================================================================

/// Event: request one new fish
#[derive(Event, Debug, Clone, Default)]
pub struct SpawnFish {
    /// Spawn point (random point in the tank when `None`)
    pub position: Option<Vec3>,
}

/// Event: fish spawned
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FishSpawned {
    pub entity: Entity,
    pub name: String,
    pub tier: RarityTier,
    /// Selector used the whole-catalog fallback
    pub fallback: bool,
}

/// Event: remove a fish from the tank
#[derive(Event, Debug, Clone)]
pub struct ReleaseFish {
    pub entity: Entity,
}

// ============================================================================
// spawn_fish
// ============================================================================

/// Everything a spawn reads (borrowed from resources)
pub struct SpawnParams<'a> {
    pub catalog: &'a SpawnCatalog,
    pub weights: RarityWeights,
    pub bounds: TankBounds,
    pub navigation: NavigationConfig,
    pub max_population: Option<usize>,
}

impl<'a> SpawnParams<'a> {
    pub fn new(catalog: &'a SpawnCatalog, config: &AquariumConfig, bounds: TankBounds) -> Self {
        Self {
            catalog,
            weights: config.spawning.weights,
            bounds,
            navigation: config.navigation,
            max_population: config.spawning.max_population,
        }
    }
}

/// Spawn one fish (selection + entity + registry tag)
pub fn spawn_fish<R: Rng + ?Sized>(
    commands: &mut Commands,
    registry: &mut FishRegistry,
    params: &SpawnParams,
    position: Option<Vec3>,
    rng: &mut R,
) -> Result<FishSpawned, SpawnError> {
    if let Some(capacity) = params.max_population {
        if registry.total() >= capacity {
            return Err(SpawnError::TankFull { capacity });
        }
    }

    let selection = selector::select(&params.weights, params.catalog, rng)?;
    let descriptor = selection.descriptor;

    let position = position.unwrap_or_else(|| params.bounds.random_point(rng));

    let mut navigator = WaypointNavigator::new(params.navigation);
    navigator.initialize(params.bounds.center, params.bounds.size);
    navigator.set_speed(descriptor.speed);

    let entity = commands
        .spawn((
            Fish {
                descriptor: descriptor.clone(),
            },
            Name::new(descriptor.name.clone()),
            FishAppearance::from(descriptor),
            Transform::from_translation(position).with_scale(Vec3::splat(descriptor.size)),
            navigator,
        ))
        .id();

    registry.register(entity, descriptor.tier);

    Ok(FishSpawned {
        entity,
        name: descriptor.name.clone(),
        tier: descriptor.tier,
        fallback: selection.fallback,
    })
}

// ============================================================================
// Systems
// ============================================================================

/// Система: стартовая популяция (Startup)
pub fn spawn_initial_population(
    mut commands: Commands,
    mut registry: ResMut<FishRegistry>,
    mut rng: ResMut<DeterministicRng>,
    catalog: Res<SpawnCatalog>,
    config: Res<AquariumConfig>,
    bounds: Res<TankBounds>,
    mut spawned: EventWriter<FishSpawned>,
) {
    let params = SpawnParams::new(&catalog, &config, *bounds);
    let wanted = config.spawning.initial_population;

    for _ in 0..wanted {
        match spawn_fish(&mut commands, &mut registry, &params, None, &mut rng.rng) {
            Ok(event) => {
                spawned.write(event);
            }
            Err(err) => {
                crate::log_error(&format!("Spawner: initial population stopped: {}", err));
                break;
            }
        }
    }

    crate::log_info(&format!(
        "Spawner: initial population {}/{} (seed {})",
        registry.total(),
        wanted,
        rng.seed
    ));
}

/// Система: обработка SpawnFish requests (Update)
pub fn handle_spawn_requests(
    mut commands: Commands,
    mut requests: EventReader<SpawnFish>,
    mut registry: ResMut<FishRegistry>,
    mut rng: ResMut<DeterministicRng>,
    catalog: Res<SpawnCatalog>,
    config: Res<AquariumConfig>,
    bounds: Res<TankBounds>,
    mut spawned: EventWriter<FishSpawned>,
) {
    let params = SpawnParams::new(&catalog, &config, *bounds);

    for request in requests.read() {
        match spawn_fish(&mut commands, &mut registry, &params, request.position, &mut rng.rng) {
            Ok(event) => {
                crate::log_info(&format!(
                    "🐟 Spawned {} [{}] as {:?}{}",
                    event.name,
                    event.tier,
                    event.entity,
                    if event.fallback { " (fallback)" } else { "" }
                ));
                spawned.write(event);
            }
            Err(err) => {
                crate::log_error(&format!("Spawner: spawn aborted: {}", err));
            }
        }
    }
}

/// Система: обработка ReleaseFish (despawn + untag)
pub fn handle_release_requests(
    mut commands: Commands,
    mut requests: EventReader<ReleaseFish>,
    mut registry: ResMut<FishRegistry>,
    fish: Query<&Fish>,
) {
    let mut released_this_frame = HashSet::new();

    for request in requests.read() {
        let Ok(released) = fish.get(request.entity) else {
            crate::log_warning(&format!("Spawner: release of {:?} ignored, not a fish", request.entity));
            continue;
        };

        // Double release в одном кадре: despawn уже запланирован
        if !released_this_frame.insert(request.entity) {
            continue;
        }

        if registry.unregister(request.entity).is_none() {
            crate::log_warning(&format!(
                "Spawner: {} ({:?}) was not in the registry, despawning anyway",
                released.descriptor.name, request.entity
            ));
        }
        commands.entity(request.entity).despawn();
        crate::log_info(&format!(
            "Released {} ({:?}), {} fish left",
            released.descriptor.name,
            request.entity,
            registry.total()
        ));
    }
}

/// Spawning plugin
///
/// Startup: initial population. Update: registry cleanup → release → spawn.
pub struct SpawningPlugin;

impl Plugin for SpawningPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnFish>()
            .add_event::<FishSpawned>()
            .add_event::<ReleaseFish>()
            .init_resource::<FishRegistry>()
            .register_type::<Fish>()
            .register_type::<FishAppearance>()
            .add_systems(Startup, spawn_initial_population)
            .add_systems(
                Update,
                (
                    crate::registry::forget_removed_fish,
                    handle_release_requests,
                    handle_spawn_requests,
                )
                    .chain(),
            );
    }
}
