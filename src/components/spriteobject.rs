//! Physical presence of an entity on the tile grid.
//!
//! A [`SpriteObject`] carries two rectangles relative to the entity's
//! position: the footprint it occupies for collision and occupancy, and the
//! docking area other characters walk to when they interact with it. Both are
//! derived from the current position on demand and never stored in world
//! space.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::Collidable;
use crate::geometry::WorldRect;
use crate::resources::tileset::TileType;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct SpriteObject {
    /// Footprint offset from the entity position.
    pub footprint: WorldRect,
    /// Docking area offset from the entity position.
    pub docking: WorldRect,
    /// Static objects never move and claim their cells at world build time.
    pub is_static: bool,
    pub tile_type: TileType,
}

impl SpriteObject {
    /// Movable object whose footprint is `footprint` (relative to the
    /// position) and whose docking area is the footprint itself.
    pub fn new(footprint: WorldRect) -> Self {
        Self {
            footprint,
            docking: footprint,
            is_static: false,
            tile_type: TileType::Freespace,
        }
    }

    /// Static object stamping `tile_type` onto the cells under its footprint.
    pub fn fixed(footprint: WorldRect, tile_type: TileType) -> Self {
        Self {
            is_static: true,
            tile_type,
            ..Self::new(footprint)
        }
    }

    pub fn with_docking(mut self, docking: WorldRect) -> Self {
        self.docking = docking;
        self
    }

    pub fn with_tile_type(mut self, tile_type: TileType) -> Self {
        self.tile_type = tile_type;
        self
    }

    /// Docking area in world space for an entity at `position`.
    pub fn docking_rect(&self, position: Vec2) -> WorldRect {
        self.docking.shift(position)
    }
}

impl Collidable for SpriteObject {
    fn footprint_rect(&self, position: Vec2) -> WorldRect {
        self.footprint.shift(position)
    }

    fn is_static(&self) -> bool {
        self.is_static
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_follows_position() {
        let obj = SpriteObject::new(WorldRect::new(-8.0, -4.0, 16.0, 4.0));
        let rect = obj.footprint_rect(Vec2::new(50.0, 20.0));
        assert_eq!(rect, WorldRect::new(42.0, 16.0, 16.0, 4.0));
        assert!(!obj.is_static());
    }

    #[test]
    fn test_docking_defaults_to_footprint() {
        let obj = SpriteObject::new(WorldRect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(obj.docking_rect(Vec2::new(10.0, 10.0)), obj.footprint_rect(Vec2::new(10.0, 10.0)));

        let obj = obj.with_docking(WorldRect::new(0.0, 32.0, 32.0, 16.0));
        assert_eq!(obj.docking_rect(Vec2::ZERO), WorldRect::new(0.0, 32.0, 32.0, 16.0));
    }

    #[test]
    fn test_fixed_object() {
        let obj = SpriteObject::fixed(WorldRect::new(0.0, 0.0, 32.0, 32.0), TileType::Furniture);
        assert!(obj.is_static());
        assert_eq!(obj.tile_type, TileType::Furniture);
    }
}
