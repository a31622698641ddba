//! Waypoint navigation: fish swim between random points in the tank
//!
//! # Architecture
//!
//! `WaypointNavigator` is a component that owns one fish's navigation state
//! (target, speed, deadline). `WaypointNavigator::tick` is pure apart from the
//! RNG handle: position + orientation in, position + orientation out.
//! The `navigate_fish` system only feeds it `Time<Fixed>` and writes the
//! result back into `Transform`.
//!
//! States: Seeking (always) + implicit Retarget transition. Retarget fires when
//! the waypoint is reached OR the deadline passes. The deadline is the liveness
//! bound: turn-rate lag can make a fish orbit its target without ever
//! closing in, the deadline caps how long that can last.

use bevy::prelude::*;
use rand::Rng;

use crate::components::TankBounds;
use crate::config::NavigationConfig;
use crate::DeterministicRng;

pub mod events;

pub use events::FishRetargeted;

/// Offsets shorter than this have no usable direction
pub const DIRECTION_EPSILON: f32 = 1e-4;

/// Output of one navigator tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorStep {
    pub position: Vec3,
    pub orientation: Quat,
    pub retargeted: bool,
}

/// Per-fish navigation state
///
/// Инвариант: после retarget `current_target` лежит внутри `bounds`,
/// `retarget_deadline - now ∈ [min_waypoint_time, max_waypoint_time]`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WaypointNavigator {
    bounds: TankBounds,
    speed: f32,
    current_target: Vec3,
    /// Simulation time (seconds) at which the target is dropped regardless
    retarget_deadline: f32,
    /// `current_target` is stale (fresh navigator or new envelope)
    needs_target: bool,
    config: NavigationConfig,
}

impl Default for WaypointNavigator {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

impl WaypointNavigator {
    /// Uninitialized navigator: zero envelope, retargets on first tick
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            bounds: TankBounds::new(Vec3::ZERO, Vec3::ZERO),
            speed: 0.0,
            current_target: Vec3::ZERO,
            retarget_deadline: f32::NEG_INFINITY,
            needs_target: true,
            config,
        }
    }

    /// Set the movement envelope
    ///
    /// Can be called again to move the fish into another region; the next
    /// tick picks a waypoint inside the new box before moving.
    pub fn initialize(&mut self, bounds_center: Vec3, bounds_size: Vec3) {
        self.bounds = TankBounds::new(bounds_center, bounds_size);
        self.retarget_deadline = f32::NEG_INFINITY;
        self.needs_target = true;
    }

    /// Speed in units/second. Current target is kept.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Override the waypoint (editor/debug, tests)
    pub fn set_target(&mut self, target: Vec3, deadline: f32) {
        self.current_target = target;
        self.retarget_deadline = deadline;
        self.needs_target = false;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn bounds(&self) -> TankBounds {
        self.bounds
    }

    pub fn current_target(&self) -> Vec3 {
        self.current_target
    }

    pub fn retarget_deadline(&self) -> f32 {
        self.retarget_deadline
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Drop the current waypoint and draw a new one + new deadline
    pub fn retarget<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) -> Vec3 {
        self.current_target = self.bounds.random_point(rng);
        self.needs_target = false;

        let min = self.config.min_waypoint_time;
        let span = (self.config.max_waypoint_time - min).max(0.0);
        self.retarget_deadline = now + min + span * rng.gen::<f32>();

        self.current_target
    }

    /// Advance one tick
    ///
    /// 0. stale target (fresh / re-initialized) → retarget before moving
    /// 1. direction к target (skip turning when the offset is ~zero)
    /// 2. move by `speed * dt`, capped at the remaining distance (no overshoot)
    /// 3. slerp heading toward the direction, factor `rotation_gain * dt`
    /// 4. retarget if reached or deadline passed
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        now: f32,
        position: Vec3,
        orientation: Quat,
        rng: &mut R,
    ) -> NavigatorStep {
        let mut retargeted = false;
        if self.needs_target {
            self.retarget(now, rng);
            retargeted = true;
        }

        let offset = self.current_target - position;
        let distance = offset.length();

        let mut new_position = position;
        let mut new_orientation = orientation;

        if distance > DIRECTION_EPSILON {
            let direction = offset / distance;
            let step = (self.speed * dt).clamp(0.0, distance);
            new_position = position + direction * step;

            let facing = look_rotation(direction);
            let t = (self.config.rotation_gain * dt).clamp(0.0, 1.0);
            new_orientation = orientation.slerp(facing, t).normalize();
        }

        let reached = new_position.distance(self.current_target) < self.config.reach_threshold;
        let expired = now >= self.retarget_deadline;

        if reached || expired {
            self.retarget(now, rng);
            retargeted = true;
        }

        NavigatorStep {
            position: new_position,
            orientation: new_orientation,
            retargeted,
        }
    }
}

/// Rotation whose forward (-Z) points along `direction`, +Y up
///
/// `direction` must be non-zero; vertical directions pick another up axis.
pub fn look_rotation(direction: Vec3) -> Quat {
    Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation
}

// ============================================================================
// Systems
// ============================================================================

/// Система: advance every fish navigator (FixedUpdate)
pub fn navigate_fish(
    mut fish: Query<(Entity, &mut Transform, &mut WaypointNavigator)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut retargeted: EventWriter<FishRetargeted>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    for (entity, mut transform, mut navigator) in fish.iter_mut() {
        let step = navigator.tick(dt, now, transform.translation, transform.rotation, &mut rng.rng);

        transform.translation = step.position;
        transform.rotation = step.orientation;

        if step.retargeted {
            retargeted.write(FishRetargeted {
                entity,
                target: navigator.current_target(),
                deadline: navigator.retarget_deadline(),
            });
        }
    }
}

/// Navigation plugin
///
/// Регистрирует navigate_fish в FixedUpdate (детерминизм: fixed dt).
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FishRetargeted>()
            .register_type::<WaypointNavigator>()
            .add_systems(FixedUpdate, navigate_fish);
    }
}
