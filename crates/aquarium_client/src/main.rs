use std::path::{Path, PathBuf};

use bevy::prelude::*;
use aquarium_simulation::{
    init_logger, load_catalog, load_config, log_error, log_info, AquariumConfig, SimulationPlugin, SpawnCatalog,
    TankBounds,
};

mod camera;
mod rendering;
mod ui;

use camera::{CameraPlugin, OrbitCamera};
use rendering::{FishVisualAssets, RenderingSyncPlugin};
use ui::AquariumUiPlugin;

fn main() {
    init_logger();

    // Optional first argument: RON config path
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let simulation = load_simulation(config_path.as_deref());
    log_info(&format!(
        "Aquarium client: {} catalog entries, seed {}",
        simulation.catalog.len(),
        simulation.config.seed
    ));

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Aquarium".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Simulation (headless ECS logic)
        .add_plugins(simulation)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        .add_plugins(CameraPlugin)
        .add_plugins(AquariumUiPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

/// Config и каталог падают на дефолты независимо друг от друга
fn load_simulation(config_path: Option<&Path>) -> SimulationPlugin {
    let config = match config_path.map(load_config) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log_error(&format!("Config load failed ({}), using default config", err));
            AquariumConfig::default()
        }
        None => AquariumConfig::default(),
    };

    let catalog = match config.resolve_catalog_path(config_path) {
        Some(path) => load_catalog(&path).unwrap_or_else(|err| {
            log_error(&format!(
                "Catalog {} failed to load ({}), using built-in stock",
                path.display(),
                err
            ));
            SpawnCatalog::default()
        }),
        None => SpawnCatalog::default(),
    };

    SimulationPlugin::new(config, catalog)
}

/// Tank floor, lights, camera + shared fish mesh
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    bounds: Res<TankBounds>,
) {
    // Sand floor под танком
    let floor_y = bounds.min().y;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::new(bounds.size.x * 0.5 + 1.0, bounds.size.z * 0.5 + 1.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.76, 0.7, 0.5))),
        Transform::from_xyz(bounds.center.x, floor_y, bounds.center.z),
    ));

    // Directional light (sun through the water)
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_3)),
    ));

    // Ambient: голубоватый подводный свет
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.6, 0.8, 1.0),
        brightness: 400.0,
        affects_lightmapped_meshes: false,
    });
    commands.insert_resource(ClearColor(Color::srgb(0.02, 0.12, 0.22)));

    commands.spawn((
        Camera3d::default(),
        Transform::default(),
        OrbitCamera::framing(&bounds),
    ));

    // Shared fish body; color lives in per-fish materials
    commands.insert_resource(FishVisualAssets {
        body: meshes.add(Capsule3d::new(0.25, 0.5)),
    });
}
