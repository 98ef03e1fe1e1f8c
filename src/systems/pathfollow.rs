//! Navigation: path following, goto, facing and wandering.
//!
//! [`goto`] plans a path for an entity and attaches a
//! [`PathFollower`]; [`follow_paths`] drives every follower one step per tick
//! by issuing `seek` calls on the entity's steering controller, and stops the
//! controller when the path ends for any reason.

use bevy_ecs::prelude::*;
use log::{debug, error};

use crate::components::Collidable;
use crate::components::mapposition::MapPosition;
use crate::components::pathfollow::{FollowStep, PathFollower};
use crate::components::rigidbody::RigidBody;
use crate::components::spriteobject::SpriteObject;
use crate::components::steering::SteeringController;
use crate::components::wander::Wander;
use crate::error::{SimError, SimResult};
use crate::pathing::Planner;
use crate::resources::simconfig::SimConfig;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::face_direction;
use crate::systems::collision::SpriteObjects;

/// Advance every path follower by one tick.
pub fn follow_paths(
    mut query: Query<(
        Entity,
        &MapPosition,
        &mut PathFollower,
        &mut SteeringController,
        &mut RigidBody,
    )>,
    time: Res<WorldTime>,
) {
    for (entity, position, mut follower, mut steering, mut body) in query.iter_mut() {
        let speed = follower.speed;
        match follower.step(position.pos, time.delta) {
            FollowStep::Seek(waypoint) => steering.seek(waypoint, speed),
            FollowStep::Finished(status) => {
                steering.stop(&mut body);
                debug!("{:?} finished its path: {:?}", entity, status);
            }
            FollowStep::Idle => {}
        }
    }
}

fn component<'a, T: Component>(world: &'a World, entity: Entity, name: &'static str) -> SimResult<&'a T> {
    world
        .get::<T>(entity)
        .ok_or(SimError::MissingComponent { entity, component: name })
}

/// Plan a path from `entity`'s cell to the docking cells of `target` and
/// start following it at `speed`.
///
/// A failed plan is logged and returned as [`SimError::NoPath`]. The entity
/// then abandons any path it was following and stands still.
pub fn goto(world: &mut World, entity: Entity, target: Entity, speed: f32) -> SimResult<()> {
    match plan_goto(world, entity, target, speed) {
        Ok(follower) => {
            world.entity_mut(entity).insert(follower);
            Ok(())
        }
        Err(e) => {
            if matches!(e, SimError::NoPath { .. } | SimError::NoPlanner) {
                halt(world, entity);
            }
            Err(e)
        }
    }
}

fn plan_goto(world: &World, entity: Entity, target: Entity, speed: f32) -> SimResult<PathFollower> {
    let position = component::<MapPosition>(world, entity, "MapPosition")?.pos;
    component::<SteeringController>(world, entity, "SteeringController")?;
    let target_position = component::<MapPosition>(world, target, "MapPosition")?.pos;
    let docking = component::<SpriteObject>(world, target, "SpriteObject")?.docking_rect(target_position);

    let map = world
        .get_resource::<TileMap>()
        .ok_or(SimError::MissingResource("TileMap"))?;
    let planner = world.get_resource::<Planner>().ok_or(SimError::NoPlanner)?;
    let arrival_radius = world
        .get_resource::<SimConfig>()
        .map(|c| c.arrival_radius)
        .unwrap_or_else(|| SimConfig::default().arrival_radius);

    let start = map.tile_position(position);
    let goal = map.tile_region(&docking);
    let Some(path) = planner.plan(map, start, &goal) else {
        error!("No path for {:?} from {} to {}", entity, start, goal);
        return Err(SimError::NoPath { start, goal });
    };
    Ok(path.follow(map, speed, arrival_radius))
}

/// Cancel the entity's path, if any, and stop its steering.
fn halt(world: &mut World, entity: Entity) {
    let mut state =
        world.query::<(&mut SteeringController, &mut RigidBody, Option<&mut PathFollower>)>();
    if let Ok((mut steering, mut body, follower)) = state.get_mut(world, entity) {
        if let Some(mut follower) = follower {
            follower.cancel();
        }
        steering.stop(&mut body);
    }
}

/// Abandon the path `entity` is following, if any.
///
/// The controller is stopped by [`follow_paths`] on the next tick.
pub fn cancel_path(world: &mut World, entity: Entity) -> bool {
    match world.get_mut::<PathFollower>(entity) {
        Some(mut follower) => {
            follower.cancel();
            true
        }
        None => false,
    }
}

/// Stop `entity` and turn it toward the footprint of `target`.
///
/// Faces nowhere in particular (idles in place) unless the entity's cell
/// shares a row or column band with the target's footprint cells.
pub fn face_target(world: &mut World, entity: Entity, target: Entity) -> SimResult<()> {
    let direction = {
        let position = component::<MapPosition>(world, entity, "MapPosition")?.pos;
        let target_position = component::<MapPosition>(world, target, "MapPosition")?.pos;
        let footprint = component::<SpriteObject>(world, target, "SpriteObject")?.footprint_rect(target_position);
        let map = world
            .get_resource::<TileMap>()
            .ok_or(SimError::MissingResource("TileMap"))?;
        map.tile_region(&footprint)
            .facing_direction(map.tile_position(position))
    };
    face_direction(world, entity, direction.as_vec2())
}

/// Send idle wanderers to a randomly chosen other sprite object.
///
/// A wanderer is idle when it has no path or its path has ended. Unreachable
/// picks are skipped; another is tried on the next tick.
pub fn wander(
    mut commands: Commands,
    mut wanderers: Query<(Entity, &MapPosition, &mut Wander, Option<&PathFollower>)>,
    objects: SpriteObjects,
    map: Option<Res<TileMap>>,
    planner: Option<Res<Planner>>,
    config: Option<Res<SimConfig>>,
) {
    let (Some(map), Some(planner)) = (map, planner) else {
        return;
    };
    let arrival_radius = config
        .map(|c| c.arrival_radius)
        .unwrap_or_else(|| SimConfig::default().arrival_radius);

    for (entity, position, mut wander, follower) in wanderers.iter_mut() {
        if follower.is_some_and(|f| !f.is_finished()) {
            continue;
        }
        let candidates: Vec<Entity> = objects.entities().filter(|e| *e != entity).collect();
        if candidates.is_empty() {
            continue;
        }
        let target = candidates[wander.rng.usize(..candidates.len())];
        let Some(goal) = objects.docking_tiles(&map, target) else {
            continue;
        };
        let start = map.tile_position(position.pos);
        match planner.plan(&map, start, &goal) {
            Some(path) => {
                commands
                    .entity(entity)
                    .insert(path.follow(&map, wander.speed, arrival_radius));
            }
            None => debug!("{:?} cannot reach {:?}, will pick again", entity, target),
        }
    }
}

