use bevy::prelude::*;
use aquarium_simulation::{log_error, Fish, FishAppearance, SurfaceColor, TankBounds, WaypointNavigator};

use crate::ui::SelectedFish;

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (
            spawn_visuals_for_new_fish,
            sync_transforms,
            despawn_orphaned_visuals,
            draw_tank_gizmos,
        ).chain());
    }
}

/// Visual template for fish (inserted by the scene setup)
#[derive(Resource)]
pub struct FishVisualAssets {
    pub body: Handle<Mesh>,
}

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Capsule is modeled along +Y, fish swim along -Z
fn body_offset() -> Transform {
    Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
}

/// setSurfaceColor: SurfaceColor → StandardMaterial
pub fn fish_material(color: SurfaceColor) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba(color.r, color.g, color.b, color.a),
        alpha_mode: if color.is_opaque() { AlphaMode::Opaque } else { AlphaMode::Blend },
        perceptual_roughness: 0.4,
        ..default()
    }
}

/// Spawn mesh visuals for freshly spawned fish
fn spawn_visuals_for_new_fish(
    mut commands: Commands,
    query: Query<(Entity, &Fish, &FishAppearance, &Transform), Added<Fish>>,
    assets: Option<Res<FishVisualAssets>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, fish, appearance, sim_transform) in query.iter() {
        // Нет шаблона → рыба живёт без визуала
        let Some(assets) = assets.as_ref() else {
            log_error(&format!(
                "Rendering: no fish visual template, {} ({:?}) left invisible",
                fish.descriptor.name, sim_entity
            ));
            continue;
        };

        // setUniformScale
        let scaled = Transform {
            scale: Vec3::splat(appearance.scale),
            ..*sim_transform
        };

        let visual_entity = commands.spawn((
            Mesh3d(assets.body.clone()),
            MeshMaterial3d(materials.add(fish_material(appearance.color))),
            scaled.mul_transform(body_offset()),
            VisualOf(sim_entity),
        )).id();

        commands.entity(sim_entity).insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<(&Transform, &HasVisual), Changed<Transform>>,
    mut visual_query: Query<&mut Transform, (With<VisualOf>, Without<HasVisual>)>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        if let Ok(mut visual_transform) = visual_query.get_mut(has_visual.0) {
            *visual_transform = sim_transform.mul_transform(body_offset());
        }
    }
}

/// Despawn visuals whose fish was released
fn despawn_orphaned_visuals(
    mut commands: Commands,
    visuals: Query<(Entity, &VisualOf)>,
    fish: Query<(), With<Fish>>,
) {
    for (visual_entity, visual_of) in visuals.iter() {
        if fish.get(visual_of.0).is_err() {
            commands.entity(visual_entity).despawn();
        }
    }
}

/// Tank outline + waypoint of the selected fish
fn draw_tank_gizmos(
    mut gizmos: Gizmos,
    bounds: Res<TankBounds>,
    selected: Res<SelectedFish>,
    navigators: Query<(&Transform, &WaypointNavigator)>,
) {
    gizmos.cuboid(
        Transform::from_translation(bounds.center).with_scale(bounds.size),
        Color::srgba(0.6, 0.9, 1.0, 0.6),
    );

    let Some(entity) = selected.0 else {
        return;
    };
    let Ok((transform, navigator)) = navigators.get(entity) else {
        return;
    };

    let target = navigator.current_target();
    let highlight = Color::srgb(1.0, 0.9, 0.2);
    gizmos.line(transform.translation, target, highlight);
    gizmos.sphere(
        bevy::math::Isometry3d::from_translation(target),
        navigator.config().reach_threshold,
        highlight,
    );
    gizmos.sphere(
        bevy::math::Isometry3d::from_translation(transform.translation),
        transform.scale.x * 0.6,
        highlight,
    );
}
