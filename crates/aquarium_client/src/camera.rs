use bevy::prelude::*;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use aquarium_simulation::TankBounds;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (
            orbit_camera_controls,
            update_camera_transform,
        ).chain());
    }
}

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.1;
/// Arrow keys orbit speed (radians per second)
const KEY_ORBIT_SPEED: f32 = 1.2;

/// Orbit camera вокруг аквариума
#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 15.0,
            yaw: 0.0,
            pitch: std::f32::consts::FRAC_PI_8,
            min_distance: 2.0,
            max_distance: 50.0,
            sensitivity: 0.005,
            zoom_speed: 1.0,
        }
    }
}

impl OrbitCamera {
    /// Front view with the whole tank in frame
    pub fn framing(bounds: &TankBounds) -> Self {
        let extent = bounds.size.max_element().max(1.0);
        Self {
            focus: bounds.center,
            distance: extent * 1.6,
            min_distance: extent * 0.3,
            max_distance: extent * 5.0,
            ..default()
        }
    }

    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.focus + Vec3::new(x, y, z)
    }
}

/// Right mouse drag / arrows: orbit, wheel: zoom
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    let mut delta = Vec2::ZERO;
    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in mouse_motion.read() {
            delta += motion.delta * camera.sensitivity;
        }
    } else {
        mouse_motion.clear();
    }

    let key_step = KEY_ORBIT_SPEED * time.delta_secs();
    if keys.pressed(KeyCode::ArrowLeft) {
        delta.x -= key_step;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        delta.x += key_step;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        delta.y -= key_step;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        delta.y += key_step;
    }

    if delta != Vec2::ZERO {
        camera.yaw -= delta.x;
        camera.pitch = (camera.pitch - delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    for wheel in mouse_wheel.read() {
        let (min, max) = (camera.min_distance, camera.max_distance);
        camera.distance = (camera.distance - wheel.y * camera.zoom_speed).clamp(min, max);
    }
}

fn update_camera_transform(
    mut query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>,
) {
    for (camera, mut transform) in query.iter_mut() {
        *transform = Transform::from_translation(camera.position())
            .looking_at(camera.focus, Vec3::Y);
    }
}
