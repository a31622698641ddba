//! Aquarium integration test
//!
//! Headless App + SimulationPlugin: startup population, spawn/release
//! requests, fish staying inside the tank, misconfiguration handling.
//!
//! Проверяем:
//! - Registry/world инварианты
//! - Fish never leave the tank envelope
//! - Ошибки спавна не роняют симуляцию

use bevy::prelude::*;
use aquarium_simulation::*;

/// Helper: headless App с полной симуляцией
fn create_aquarium_app(config: AquariumConfig, catalog: SpawnCatalog) -> App {
    let mut app = create_headless_app(config.seed);
    app.add_plugins(SimulationPlugin::new(config, catalog));
    app
}

fn fish_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&Fish>().iter(world).count()
}

fn fish_positions(app: &mut App) -> Vec<(Entity, Vec3)> {
    let world = app.world_mut();
    let mut positions: Vec<_> = world
        .query_filtered::<(Entity, &Transform), With<Fish>>()
        .iter(world)
        .map(|(entity, transform)| (entity, transform.translation))
        .collect();
    positions.sort_by_key(|(entity, _)| entity.index());
    positions
}

#[test]
fn test_initial_population_spawns_on_startup() {
    let config = AquariumConfig::default();
    let expected = config.spawning.initial_population;
    let mut app = create_aquarium_app(config, SpawnCatalog::default());

    app.update();

    assert_eq!(fish_count(&mut app), expected);
    assert_eq!(app.world().resource::<FishRegistry>().total(), expected);
}

#[test]
fn test_spawn_request_adds_fish() {
    let mut app = create_aquarium_app(AquariumConfig::default(), SpawnCatalog::default());
    app.update();
    let before = fish_count(&mut app);

    let drop_point = Vec3::new(1.0, 2.0, 0.5);
    app.world_mut().send_event(SpawnFish {
        position: Some(drop_point),
    });
    app.update();

    assert_eq!(fish_count(&mut app), before + 1);
    assert_eq!(app.world().resource::<FishRegistry>().total(), before + 1);
    assert!(
        fish_positions(&mut app).iter().any(|(_, position)| *position == drop_point),
        "new fish should appear at the requested point"
    );
}

#[test]
fn test_release_removes_fish() {
    let mut app = create_aquarium_app(AquariumConfig::default(), SpawnCatalog::default());
    app.update();

    let registry = app.world().resource::<FishRegistry>();
    let before = registry.total();
    let victim = registry.entities()[0];

    app.world_mut().send_event(ReleaseFish { entity: victim });
    app.update();
    app.update();

    assert!(app.world().get_entity(victim).is_err(), "released fish still alive");
    let registry = app.world().resource::<FishRegistry>();
    assert_eq!(registry.total(), before - 1);
    assert!(!registry.contains(victim));
    assert_eq!(fish_count(&mut app), before - 1);
}

#[test]
fn test_release_of_unregistered_fish_still_despawns() {
    let mut app = create_aquarium_app(AquariumConfig::default(), SpawnCatalog::default());
    app.update();
    let before = app.world().resource::<FishRegistry>().total();

    // Рыба заспавнена мимо spawner'а: в registry её нет
    let descriptor = SpawnCatalog::default().entries()[0].clone();
    let stray = app.world_mut().spawn((Fish { descriptor }, Transform::default())).id();

    app.world_mut().send_event(ReleaseFish { entity: stray });
    app.update();

    assert!(app.world().get_entity(stray).is_err(), "unregistered fish was not released");
    assert_eq!(app.world().resource::<FishRegistry>().total(), before);
}

#[test]
fn test_double_release_despawns_once() {
    let mut app = create_aquarium_app(AquariumConfig::default(), SpawnCatalog::default());
    app.update();

    let registry = app.world().resource::<FishRegistry>();
    let before = registry.total();
    let victim = registry.entities()[0];

    app.world_mut().send_event(ReleaseFish { entity: victim });
    app.world_mut().send_event(ReleaseFish { entity: victim });
    app.update();
    app.update();

    assert!(app.world().get_entity(victim).is_err());
    assert_eq!(app.world().resource::<FishRegistry>().total(), before - 1);
    assert_eq!(fish_count(&mut app), before - 1);
}

#[test]
fn test_despawned_fish_is_forgotten() {
    let mut app = create_aquarium_app(AquariumConfig::default(), SpawnCatalog::default());
    app.update();

    let victim = app.world().resource::<FishRegistry>().entities()[0];
    let before = app.world().resource::<FishRegistry>().total();

    // Despawn мимо ReleaseFish, registry должен заметить через RemovedComponents
    app.world_mut().despawn(victim);
    app.update();

    let registry = app.world().resource::<FishRegistry>();
    assert!(!registry.contains(victim));
    assert_eq!(registry.total(), before - 1);
}

#[test]
fn test_fish_swim_and_stay_in_tank() {
    let config = AquariumConfig::default();
    let bounds = TankBounds::from(config.tank);
    let mut app = create_aquarium_app(config, SpawnCatalog::default());

    app.update();
    let start = fish_positions(&mut app);

    for tick in 0..900 {
        app.update();

        if tick % 60 == 0 {
            for (entity, position) in fish_positions(&mut app) {
                let slack = Vec3::splat(1e-3);
                assert!(
                    position.cmpge(bounds.min() - slack).all() && position.cmple(bounds.max() + slack).all(),
                    "tick {}: {:?} left the tank at {:?}",
                    tick,
                    entity,
                    position
                );
            }
        }
    }

    let end = fish_positions(&mut app);
    for ((entity, before), (_, after)) in start.iter().zip(end.iter()) {
        assert!(before.distance(*after) > 1e-3, "{:?} never moved", entity);
    }
}

#[test]
fn test_tank_capacity_is_enforced() {
    let mut config = AquariumConfig::default();
    config.spawning.initial_population = 10;
    config.spawning.max_population = Some(3);
    let mut app = create_aquarium_app(config, SpawnCatalog::default());

    app.update();
    assert_eq!(fish_count(&mut app), 3);

    app.world_mut().send_event(SpawnFish::default());
    app.update();
    app.update();

    assert_eq!(fish_count(&mut app), 3);
    assert_eq!(app.world().resource::<FishRegistry>().total(), 3);
}

#[test]
fn test_empty_catalog_keeps_running() {
    let mut app = create_aquarium_app(AquariumConfig::default(), SpawnCatalog::empty());

    app.update();
    app.world_mut().send_event(SpawnFish::default());
    for _ in 0..30 {
        app.update();
    }

    assert_eq!(fish_count(&mut app), 0);
    assert_eq!(app.world().resource::<FishRegistry>().total(), 0);
}

#[test]
fn test_zero_size_tank_pins_waypoints() {
    let mut config = AquariumConfig::default();
    config.tank.center = [2.0, 3.0, -1.0];
    config.tank.size = [0.0, 0.0, 0.0];
    let center = Vec3::from_array(config.tank.center);
    let mut app = create_aquarium_app(config, SpawnCatalog::default());

    for _ in 0..30 {
        app.update();
    }

    let world = app.world_mut();
    let mut navigators = world.query::<&WaypointNavigator>();
    let mut checked = 0;
    for navigator in navigators.iter(world) {
        assert_eq!(navigator.current_target(), center);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn test_registry_counts_match_world() {
    let mut config = AquariumConfig::default();
    config.spawning.initial_population = 40;
    let mut app = create_aquarium_app(config, SpawnCatalog::default());
    app.update();

    let world = app.world_mut();
    let mut per_tier = [0usize; 3];
    for fish in world.query::<&Fish>().iter(world) {
        per_tier[fish.descriptor.tier.ordinal()] += 1;
    }

    let registry = app.world().resource::<FishRegistry>();
    for tier in RarityTier::ALL {
        assert_eq!(registry.count(tier), per_tier[tier.ordinal()], "{tier} count mismatch");
    }
}

#[test]
fn test_retarget_events_within_bounds() {
    let config = AquariumConfig::default();
    let bounds = TankBounds::from(config.tank);
    let mut app = create_aquarium_app(config, SpawnCatalog::default());

    let mut retargets = Vec::new();
    for _ in 0..600 {
        app.update();
        retargets.extend(
            app.world_mut()
                .resource_mut::<Events<FishRetargeted>>()
                .drain(),
        );
    }

    // Каждая рыба выбирает waypoint на первом fixed тике
    let fish = app.world().resource::<FishRegistry>().total();
    assert!(retargets.len() >= fish, "{} retargets for {} fish", retargets.len(), fish);
    for event in retargets {
        assert!(bounds.contains(event.target), "waypoint {:?} outside the tank", event.target);
    }
}
