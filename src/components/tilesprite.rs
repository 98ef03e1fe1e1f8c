use bevy_ecs::prelude::Component;

use crate::geometry::TilePosition;

/// Static object drawn with a catalog tile.
///
/// `tile` is the anchor of the catalog entry; the object's footprint covers
/// the entry's width and height in cells.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSprite {
    pub tile: TilePosition,
}
