//! Overlap queries over sprite objects and static footprint stamping.
//!
//! There is no spatial index: every query is a linear scan of the live sprite
//! objects, which is plenty for tile-sized scenes. Overlap counts rects that
//! only touch along an edge.
//!
//! Two forms are offered. [`SpriteObjects`] is a read-only system parameter
//! for systems and callers that do not move anything. [`Footprint`] slices
//! are snapshots for the movement system, which has to keep querying while
//! it writes positions.

use bevy_ecs::prelude::*;
use bevy_ecs::system::{SystemParam, SystemState};
use smallvec::SmallVec;

use crate::components::Collidable;
use crate::components::mapposition::MapPosition;
use crate::components::spriteobject::SpriteObject;
use crate::geometry::{TileRect, WorldRect};
use crate::resources::tilemap::TileMap;

/// World-space footprint of one sprite object at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub entity: Entity,
    pub rect: WorldRect,
    pub is_static: bool,
}

/// Movable objects in `footprints` overlapping `rect`, other than `exclude`.
///
/// Lazy and restartable: each call walks the slice again.
pub fn dynamic_overlaps<'a>(
    footprints: &'a [Footprint],
    rect: WorldRect,
    exclude: Option<Entity>,
) -> impl Iterator<Item = Entity> + 'a {
    footprints
        .iter()
        .filter(move |f| Some(f.entity) != exclude && !f.is_static && rect.overlaps(&f.rect))
        .map(|f| f.entity)
}

#[derive(SystemParam)]
pub struct SpriteObjects<'w, 's> {
    objects: Query<'w, 's, (Entity, &'static MapPosition, &'static SpriteObject)>,
}

impl<'w, 's> SpriteObjects<'w, 's> {
    /// Objects whose footprint overlaps `rect`, other than `exclude`.
    pub fn overlapping(
        &self,
        rect: WorldRect,
        include_static: bool,
        exclude: Option<Entity>,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.objects
            .iter()
            .filter(move |(entity, position, object)| {
                Some(*entity) != exclude
                    && (include_static || !object.is_static())
                    && rect.overlaps(&object.footprint_rect(position.pos))
            })
            .map(|(entity, _, _)| entity)
    }

    /// Movable objects overlapping `rect`, lazily.
    pub fn dynamic_obstacles(&self, rect: WorldRect, exclude: Option<Entity>) -> impl Iterator<Item = Entity> + '_ {
        self.overlapping(rect, false, exclude)
    }

    /// Stops at the first movable object found.
    pub fn contains_dynamic_obstacle(&self, rect: WorldRect, exclude: Option<Entity>) -> bool {
        self.dynamic_obstacles(rect, exclude).next().is_some()
    }

    pub fn find_objects(
        &self,
        rect: WorldRect,
        include_static: bool,
        exclude: Option<Entity>,
    ) -> SmallVec<[Entity; 8]> {
        self.overlapping(rect, include_static, exclude).collect()
    }

    /// Every sprite object, in world iteration order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.objects.iter().map(|(entity, _, _)| entity)
    }

    pub fn footprint(&self, entity: Entity) -> Option<WorldRect> {
        self.objects
            .get(entity)
            .ok()
            .map(|(_, position, object)| object.footprint_rect(position.pos))
    }

    pub fn docking(&self, entity: Entity) -> Option<WorldRect> {
        self.objects
            .get(entity)
            .ok()
            .map(|(_, position, object)| object.docking_rect(position.pos))
    }

    /// Cells under the footprint of `entity`.
    pub fn footprint_tiles(&self, map: &TileMap, entity: Entity) -> Option<TileRect> {
        self.footprint(entity).map(|rect| map.tile_region(&rect))
    }

    /// Cells under the docking area of `entity`.
    pub fn docking_tiles(&self, map: &TileMap, entity: Entity) -> Option<TileRect> {
        self.docking(entity).map(|rect| map.tile_region(&rect))
    }
}

/// Stamp each static object's tile type onto the cells under its footprint.
///
/// A one-time pass run when the world is built; later moves or despawns of
/// static objects are not reflected. Returns the number of cells claimed.
pub fn stamp_static_footprints(world: &mut World) -> usize {
    let mut state = SystemState::<Query<(&MapPosition, &SpriteObject)>>::new(world);
    let claims: Vec<_> = {
        let Some(map) = world.get_resource::<TileMap>() else {
            return 0;
        };
        let query = state.get(world);
        query
            .iter()
            .filter(|(_, object)| object.is_static())
            .map(|(position, object)| {
                (
                    map.tile_region(&object.footprint_rect(position.pos)),
                    object.tile_type,
                )
            })
            .collect()
    };

    let mut map = world.resource_mut::<TileMap>();
    let mut claimed = 0;
    for (region, tile_type) in claims {
        for cell in &region {
            if map.claim(cell, tile_type) {
                claimed += 1;
            }
        }
    }
    claimed
}
