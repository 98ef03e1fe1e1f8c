//! Directional walking animations for characters.

use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};

/// The four walking animations of a character, resolved at spawn time.
///
/// A direction whose animation was missing from the sheet is `None`; the
/// character idles instead of walking in that direction.
#[derive(Debug, Clone, Default, PartialEq, Component)]
pub struct CharacterAnimations {
    pub north: Option<String>,
    pub south: Option<String>,
    pub east: Option<String>,
    pub west: Option<String>,
    /// Unit step of the dominant axis of the last movement, zero when at rest.
    pub direction: IVec2,
}

impl CharacterAnimations {
    /// Animation for a cardinal `direction` (y grows downwards, so +y is south).
    pub fn for_direction(&self, direction: IVec2) -> Option<&str> {
        let name = if direction.x > 0 {
            &self.east
        } else if direction.x < 0 {
            &self.west
        } else if direction.y < 0 {
            &self.north
        } else if direction.y > 0 {
            &self.south
        } else {
            return None;
        };
        name.as_deref()
    }
}

/// Cardinal step along the dominant axis of `v`.
///
/// The horizontal axis wins ties; the zero vector maps to zero.
pub fn dominant_direction(v: Vec2) -> IVec2 {
    if v == Vec2::ZERO {
        IVec2::ZERO
    } else if v.x.abs() >= v.y.abs() {
        IVec2::new(v.x.signum() as i32, 0)
    } else {
        IVec2::new(0, v.y.signum() as i32)
    }
}
