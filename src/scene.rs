//! Scene assembly.
//!
//! Builds a ready-to-run world from a configuration, a tile map and the
//! animation sheets, spawns the standard kinds of objects, and advances the
//! simulation one tick at a time.
//!
//! # Lifecycle
//!
//! 1. [`build_world`] inserts the resources
//! 2. spawn static objects ([`spawn_object`], [`spawn_tile_sprite`]) and
//!    characters ([`spawn_character`])
//! 3. [`initialize`] stamps static footprints onto the grid
//! 4. call [`step`] with [`tick_schedule`] once per tick
//!
//! Objects are added and removed between ticks only.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{error, info};

use crate::components::animation::AnimationPlayer;
use crate::components::character::CharacterAnimations;
use crate::components::collision::CollisionState;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::spriteobject::SpriteObject;
use crate::components::steering::SteeringController;
use crate::components::tilesprite::TileSprite;
use crate::error::{SimError, SimResult};
use crate::geometry::{TilePosition, WorldRect};
use crate::pathing::{GridPlanner, Planner};
use crate::resources::animationstore::AnimationStore;
use crate::resources::debugmode::DebugMode;
use crate::resources::draworder::DrawOrder;
use crate::resources::simconfig::SimConfig;
use crate::resources::tilemap::TileMap;
use crate::resources::tileset::TileType;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{sample_animation_frames, update_character_animation};
use crate::systems::collision::stamp_static_footprints;
use crate::systems::draworder::sort_draw_order;
use crate::systems::movement::movement;
use crate::systems::pathfollow::{follow_paths, wander};
use crate::systems::steering::steering;
use crate::systems::time::update_world_time;

const DIRECTIONS: [&str; 4] = ["north", "south", "east", "west"];

/// World holding every resource the tick schedule needs.
///
/// The grid planner is installed; replace the [`Planner`] resource to use
/// another one.
pub fn build_world(config: SimConfig, map: TileMap, animations: AnimationStore) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::with_time_scale(config.time_scale));
    if config.debug {
        world.insert_resource(DebugMode);
    }
    info!(
        "Building world: {}x{} cells, {} animation sheets",
        map.columns(),
        map.rows(),
        animations.sheets.len()
    );
    world.insert_resource(map);
    world.insert_resource(animations);
    world.insert_resource(DrawOrder::default());
    world.insert_resource(Planner::new(GridPlanner));
    world.insert_resource(config);
    world
}

/// One-time pass after the static objects are spawned.
///
/// Returns the number of cells claimed by static footprints.
pub fn initialize(world: &mut World) -> usize {
    let claimed = stamp_static_footprints(world);
    let mut schedule = Schedule::default();
    schedule.add_systems(sort_draw_order);
    schedule.run(world);
    info!("Initialized world: {} cells claimed by static objects", claimed);
    claimed
}

/// Systems of one tick, in order: wander, follow paths, steering, movement,
/// character animation, frame sampling, draw order.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            wander,
            follow_paths,
            steering,
            movement,
            update_character_animation,
            sample_animation_frames,
            sort_draw_order,
        )
            .chain(),
    );
    schedule
}

/// Advance the world by `dt` unscaled seconds.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

/// Spawn a walking character drawn from animation sheet `sheet`.
///
/// The sprite takes the sheet's cell size. Missing directional animations
/// are logged and leave the character idle in that direction; a missing or
/// zero-sized sheet is an error.
pub fn spawn_character(
    world: &mut World,
    sheet: &str,
    position: Vec2,
    footprint: WorldRect,
) -> SimResult<Entity> {
    let store = world
        .get_resource::<AnimationStore>()
        .ok_or(SimError::MissingResource("AnimationStore"))?;
    let animation_sheet = store
        .sheet(sheet)
        .ok_or_else(|| SimError::MissingSheet(sheet.to_string()))?;
    let (width, height) = match animation_sheet.sheet.tile_size() {
        Ok(size) => size,
        Err(e) => {
            error!("Cannot spawn character: {}", e);
            return Err(e);
        }
    };

    let mut resolved = DIRECTIONS.iter().map(|name| match store.require(sheet, name) {
        Ok(animation) => Some(animation.name.clone()),
        Err(e) => {
            error!("{}", e);
            None
        }
    });
    let character = CharacterAnimations {
        north: resolved.next().flatten(),
        south: resolved.next().flatten(),
        east: resolved.next().flatten(),
        west: resolved.next().flatten(),
        direction: Default::default(),
    };

    let mut player = AnimationPlayer::new(sheet);
    if let Some(idle) = [&character.south, &character.east, &character.west, &character.north]
        .into_iter()
        .find_map(|a| a.clone())
    {
        player.start_idle(idle);
    }

    let (max_force, max_speed) = world
        .get_resource::<SimConfig>()
        .map(|c| (c.max_force, c.max_speed))
        .unwrap_or_else(|| {
            let c = SimConfig::default();
            (c.max_force, c.max_speed)
        });

    let entity = world
        .spawn((
            MapPosition::from_vec(position),
            RigidBody::new(),
            Sprite::new(sheet, width as f32, height as f32),
            SpriteObject::new(footprint).with_tile_type(TileType::Character),
            CollisionState::default(),
            player,
            character,
            SteeringController::new(max_force, max_speed),
        ))
        .id();
    Ok(entity)
}

/// Spawn a sprite object, drawn with `sprite` when given.
///
/// Movable objects also get a [`CollisionState`].
pub fn spawn_object(world: &mut World, position: Vec2, object: SpriteObject, sprite: Option<Sprite>) -> Entity {
    let mut entity = world.spawn((MapPosition::from_vec(position), object));
    if !object.is_static {
        entity.insert(CollisionState::default());
    }
    if let Some(sprite) = sprite {
        entity.insert(sprite);
    }
    entity.id()
}

/// Spawn the catalog tile anchored at `anchor` as a static object whose
/// upper-left corner sits on map cell `cell`.
///
/// The footprint spans the tile's width and height in cells and claims its
/// tile type once [`initialize`] runs.
pub fn spawn_tile_sprite(world: &mut World, anchor: TilePosition, cell: TilePosition) -> SimResult<Entity> {
    let (position, size, tile_type, sheet) = {
        let map = world
            .get_resource::<TileMap>()
            .ok_or(SimError::MissingResource("TileMap"))?;
        let tile = map
            .tileset()
            .get(anchor)
            .ok_or(SimError::UnknownTile(anchor))?;
        let size = map.tile_size() * Vec2::new(tile.width as f32, tile.height as f32);
        (
            map.tile_screen_rect(cell).min(),
            size,
            tile.tile_type,
            map.tileset().sheet.name.clone(),
        )
    };
    let footprint = WorldRect::new(0.0, 0.0, size.x, size.y);
    let entity = world
        .spawn((
            MapPosition::from_vec(position),
            SpriteObject::fixed(footprint, tile_type),
            Sprite::new(sheet, size.x, size.y).with_frame(anchor),
            TileSprite { tile: anchor },
        ))
        .id();
    Ok(entity)
}

/// Remove `entity` from the world and from the draw order.
pub fn despawn(world: &mut World, entity: Entity) -> bool {
    if let Some(mut order) = world.get_resource_mut::<DrawOrder>() {
        order.remove(entity);
    }
    match world.get_entity_mut(entity) {
        Ok(e) => {
            e.despawn();
            true
        }
        Err(_) => false,
    }
}
