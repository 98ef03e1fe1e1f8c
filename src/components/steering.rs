//! Seek steering toward a target point.
//!
//! Each tick the controller sums a seek force (full `max_force` toward the
//! target) with an optional avoidance force, rescales the sum to at most
//! `max_force`, and integrates it into the body's velocity, which is then
//! rescaled to at most the speed given to [`SteeringController::seek`].
//!
//! Avoidance is pluggable through [`AvoidanceSteering`]. [`NoAvoidance`]
//! never contributes.

use std::fmt::Debug;

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::rigidbody::RigidBody;

/// Another moving body near the steered one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Secondary steering contribution that keeps a body clear of others.
pub trait AvoidanceSteering: Debug + Send + Sync {
    /// Force to add to the seek force, or `None` when nothing threatens.
    fn avoidance(&self, position: Vec2, velocity: Vec2, neighbors: &[Neighbor]) -> Option<Vec2>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoAvoidance;

impl AvoidanceSteering for NoAvoidance {
    fn avoidance(&self, _position: Vec2, _velocity: Vec2, _neighbors: &[Neighbor]) -> Option<Vec2> {
        None
    }
}

/// Where a body moving at constant `velocity` will be after `time` seconds.
pub fn predicted_position(position: Vec2, velocity: Vec2, time: f32) -> Vec2 {
    position + velocity * time
}

/// Time at which two bodies moving at constant velocity are closest.
///
/// Bodies with equal velocities keep their distance forever; that yields `None`.
pub fn time_of_closest_approach(a: &Neighbor, b: &Neighbor) -> Option<f32> {
    let offset = a.position - b.position;
    let relative = a.velocity - b.velocity;
    let speed_sq = relative.length_squared();
    if speed_sq == 0.0 {
        return None;
    }
    Some(-offset.dot(relative) / speed_sq)
}

/// Vectors drawn by debug overlays: seek (scaled by 0.1), avoidance
/// (scaled by 0.1) and the resulting velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringDebug {
    pub seek: Vec2,
    pub avoidance: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Component)]
pub struct SteeringController {
    target: Option<Vec2>,
    max_speed: f32,
    pub max_force: f32,
    pub avoidance: Box<dyn AvoidanceSteering>,
    pub debug: SteeringDebug,
}

impl SteeringController {
    pub fn new(max_force: f32, max_speed: f32) -> Self {
        Self {
            target: None,
            max_speed,
            max_force,
            avoidance: Box::new(NoAvoidance),
            debug: SteeringDebug::default(),
        }
    }

    pub fn with_avoidance(mut self, avoidance: impl AvoidanceSteering + 'static) -> Self {
        self.avoidance = Box::new(avoidance);
        self
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Head for `target`, never exceeding `speed`.
    pub fn seek(&mut self, target: Vec2, speed: f32) {
        self.target = Some(target);
        self.max_speed = speed;
    }

    /// Forget the target and halt the body at once.
    pub fn stop(&mut self, body: &mut RigidBody) {
        self.target = None;
        self.debug = SteeringDebug::default();
        body.halt();
    }

    pub fn is_stopped(&self) -> bool {
        self.target.is_none()
    }

    /// Force of magnitude `max_force` pointing at the target.
    ///
    /// Zero when stopped or already exactly on the target.
    pub fn seek_force(&self, position: Vec2) -> Vec2 {
        let Some(target) = self.target else {
            return Vec2::ZERO;
        };
        let offset = target - position;
        let distance = offset.length();
        if distance == 0.0 {
            return Vec2::ZERO;
        }
        offset * (self.max_force / distance)
    }

    /// Seek plus avoidance, rescaled to at most `max_force`.
    pub fn steering_force(&self, position: Vec2, velocity: Vec2, neighbors: &[Neighbor]) -> Vec2 {
        let avoidance = self.avoidance.avoidance(position, velocity, neighbors);
        self.combine(self.seek_force(position), avoidance)
    }

    fn combine(&self, seek: Vec2, avoidance: Option<Vec2>) -> Vec2 {
        let mut force = seek;
        if let Some(avoid) = avoidance {
            force += avoid;
        }
        let magnitude = force.length();
        if magnitude > self.max_force {
            force *= self.max_force / magnitude;
        }
        force
    }

    /// Advance the body's velocity by one tick of `dt` seconds.
    ///
    /// Does nothing while stopped. Debug vectors are recorded only when
    /// `record_debug` is set.
    pub fn integrate(
        &mut self,
        body: &mut RigidBody,
        position: Vec2,
        neighbors: &[Neighbor],
        dt: f32,
        record_debug: bool,
    ) {
        if self.is_stopped() {
            self.debug = SteeringDebug::default();
            return;
        }
        let seek = self.seek_force(position);
        let avoidance = self.avoidance.avoidance(position, body.velocity, neighbors);
        body.accelerate(self.combine(seek, avoidance), dt, self.max_speed);

        if record_debug {
            self.debug = SteeringDebug {
                seek: 0.1 * seek,
                avoidance: 0.1 * avoidance.unwrap_or(Vec2::ZERO),
                velocity: body.velocity,
            };
        }
    }
}
