use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::Renderable;
use crate::geometry::{TilePosition, WorldRect};

/// Sprite is identified by a sheet key, its size in world units and the cell
/// of the sheet currently shown.
/// The origin is the pivot (in pixels) relative to the sprite's top-left, so
/// the bounding box sits at `position - origin`.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub sheet_key: String,
    pub width: f32,
    pub height: f32,
    pub origin: Vec2,
    pub frame: TilePosition,
}

impl Sprite {
    pub fn new(sheet_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            sheet_key: sheet_key.into(),
            width,
            height,
            origin: Vec2::ZERO,
            frame: TilePosition::default(),
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_frame(mut self, frame: TilePosition) -> Self {
        self.frame = frame;
        self
    }
}

impl Renderable for Sprite {
    fn bounding_box(&self, position: Vec2) -> WorldRect {
        WorldRect::new(
            position.x - self.origin.x,
            position.y - self.origin.y,
            self.width,
            self.height,
        )
    }

    fn frame(&self) -> TilePosition {
        self.frame
    }
}
