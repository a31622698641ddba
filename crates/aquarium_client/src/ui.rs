//! Info panel + keyboard controls
//!
//! Space: spawn a fish, Tab: select next fish, Delete: release the selected one.

use bevy::prelude::*;
use aquarium_simulation::{
    log_info, Fish, FishInspection, FishRegistry, RarityTier, ReleaseFish, SpawnFish,
};

pub struct AquariumUiPlugin;

impl Plugin for AquariumUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedFish>()
            .add_systems(Startup, spawn_ui)
            .add_systems(Update, (
                handle_keyboard,
                drop_stale_selection,
                update_inspector_text,
                update_population_text,
            ).chain());
    }
}

/// Currently inspected fish
#[derive(Resource, Default)]
pub struct SelectedFish(pub Option<Entity>);

#[derive(Component)]
struct InspectorText;

#[derive(Component)]
struct PopulationText;

const HINT: &str = "Space: spawn  Tab: select  Delete: release";

fn spawn_ui(mut commands: Commands) {
    commands.spawn((
        Text::new(HINT),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        InspectorText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        PopulationText,
    ));
}

/// Next entity after `current` in registry order (wraps around)
pub fn next_selection(entities: &[Entity], current: Option<Entity>) -> Option<Entity> {
    let position = current.and_then(|entity| entities.iter().position(|&e| e == entity));
    match position {
        Some(index) => entities.get((index + 1) % entities.len()).copied(),
        None => entities.first().copied(),
    }
}

fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    registry: Res<FishRegistry>,
    mut selected: ResMut<SelectedFish>,
    mut spawn_requests: EventWriter<SpawnFish>,
    mut release_requests: EventWriter<ReleaseFish>,
) {
    if keys.just_pressed(KeyCode::Space) {
        spawn_requests.write(SpawnFish::default());
    }

    if keys.just_pressed(KeyCode::Tab) {
        selected.0 = next_selection(&registry.entities(), selected.0);
    }

    if keys.just_pressed(KeyCode::Delete) {
        if let Some(entity) = selected.0.take() {
            log_info(&format!("UI: release requested for {:?}", entity));
            release_requests.write(ReleaseFish { entity });
        }
    }
}

/// Selection pointing at a despawned fish → None
fn drop_stale_selection(mut selected: ResMut<SelectedFish>, fish: Query<(), With<Fish>>) {
    if let Some(entity) = selected.0 {
        if fish.get(entity).is_err() {
            selected.0 = None;
        }
    }
}

fn update_inspector_text(
    selected: Res<SelectedFish>,
    fish: Query<&Fish>,
    mut text: Query<&mut Text, With<InspectorText>>,
) {
    let Ok(mut text) = text.single_mut() else {
        return;
    };

    let content = match selected.0.and_then(|entity| fish.get(entity).ok()) {
        Some(fish) => format!("{}\n\n{}", FishInspection::from(&fish.descriptor), HINT),
        None => HINT.to_string(),
    };

    if text.0 != content {
        text.0 = content;
    }
}

fn update_population_text(
    registry: Res<FishRegistry>,
    mut text: Query<&mut Text, With<PopulationText>>,
) {
    if !registry.is_changed() {
        return;
    }
    let Ok(mut text) = text.single_mut() else {
        return;
    };

    let mut content = format!("Fish: {}", registry.total());
    for tier in RarityTier::ALL {
        content.push_str(&format!("\n{}: {}", tier, registry.count(tier)));
    }
    text.0 = content;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_selection_cycles() {
        let entities = [Entity::from_raw(3), Entity::from_raw(5), Entity::from_raw(9)];

        assert_eq!(next_selection(&entities, None), Some(entities[0]));
        assert_eq!(next_selection(&entities, Some(entities[0])), Some(entities[1]));
        assert_eq!(next_selection(&entities, Some(entities[2])), Some(entities[0]));
        // Unknown entity restarts from the first fish
        assert_eq!(next_selection(&entities, Some(Entity::from_raw(42))), Some(entities[0]));
        assert_eq!(next_selection(&[], None), None);
    }
}
