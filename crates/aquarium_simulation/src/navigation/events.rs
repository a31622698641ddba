//! Navigation events

use bevy::prelude::*;

/// Event: fish dropped its waypoint and picked a new one
///
/// Генерируется: navigate_fish (reach или deadline)
/// Читается: headless runner (retarget stats)
#[derive(Event, Debug, Clone)]
pub struct FishRetargeted {
    pub entity: Entity,
    pub target: Vec3,
    /// Simulation time of the next forced retarget
    pub deadline: f32,
}
