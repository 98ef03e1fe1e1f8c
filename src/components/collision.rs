use bevy_ecs::prelude::*;

/// Outcome of the last movement step of an entity.
///
/// Written by the movement system only; readers see last tick's result until
/// the movement phase of the current tick has run.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionState {
    /// The last move was rolled back.
    pub is_blocked: bool,
    /// First movable object found overlapping the attempted move.
    pub dynamic_obstacle: Option<Entity>,
}

impl CollisionState {
    pub fn block(&mut self, obstacle: Option<Entity>) {
        self.is_blocked = true;
        self.dynamic_obstacle = obstacle;
    }

    pub fn clear(&mut self) {
        self.is_blocked = false;
        self.dynamic_obstacle = None;
    }

    pub fn is_blocked_by_dynamic_object(&self) -> bool {
        self.dynamic_obstacle.is_some()
    }
}
