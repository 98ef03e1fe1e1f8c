//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity of a movable entity. It is
//! written by the steering controller (or directly by game logic) and read by
//! the movement system, which integrates it into
//! [`MapPosition`](super::mapposition::MapPosition).

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity in world units per second.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_velocity(velocity: Vec2) -> Self {
        Self { velocity }
    }

    /// Set the velocity of the RigidBody.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Get the current velocity.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// True when any velocity component is non-zero.
    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Zero the velocity immediately.
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Add `acceleration * dt` to the velocity, then rescale so the speed does
    /// not exceed `max_speed`.
    pub fn accelerate(&mut self, acceleration: Vec2, dt: f32, max_speed: f32) {
        let velocity = self.velocity + acceleration * dt;
        let speed = velocity.length();
        self.velocity = if speed > max_speed && speed > 0.0 {
            velocity * (max_speed / speed)
        } else {
            velocity
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn test_new_is_at_rest() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity(), Vec2::ZERO);
        assert!(!rb.is_moving());
    }

    #[test]
    fn test_halt() {
        let mut rb = RigidBody::with_velocity(Vec2::new(3.0, -4.0));
        assert!(rb.is_moving());
        assert!(approx_eq(rb.speed(), 5.0));
        rb.halt();
        assert!(!rb.is_moving());
    }

    #[test]
    fn test_accelerate_below_limit() {
        let mut rb = RigidBody::new();
        rb.accelerate(Vec2::new(10.0, 0.0), 0.5, 50.0);
        assert!(vec_approx_eq(rb.velocity, Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn test_accelerate_clamps_to_max_speed() {
        let mut rb = RigidBody::new();
        rb.accelerate(Vec2::new(0.0, 1000.0), 1.0, 50.0);
        assert!(vec_approx_eq(rb.velocity, Vec2::new(0.0, 50.0)));
        assert!(approx_eq(rb.speed(), 50.0));
    }

    #[test]
    fn test_accelerate_with_zero_limit_stops() {
        let mut rb = RigidBody::with_velocity(Vec2::new(1.0, 1.0));
        rb.accelerate(Vec2::new(1.0, 0.0), 1.0, 0.0);
        assert!(vec_approx_eq(rb.velocity, Vec2::ZERO));
    }
}
