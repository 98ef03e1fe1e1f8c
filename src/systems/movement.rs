//! Kinematic integration with rollback on collision.
//!
//! Each movable sprite object, in turn:
//! 1. remembers its position,
//! 2. moves by `velocity * delta` when its velocity is non-zero,
//! 3. is blocked when its new footprint overlaps another movable object's
//!    footprint, or covers any cell that is not freespace,
//! 4. when blocked, goes back to the remembered position.
//!
//! Objects are processed one after another against a snapshot of every
//! footprint that is updated as each object settles, so later objects see
//! where earlier ones ended up this tick. Static objects never move.
//! Bodies without a [`SpriteObject`] just integrate their velocity.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::Collidable;
use crate::components::collision::CollisionState;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::spriteobject::SpriteObject;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{Footprint, dynamic_overlaps};

pub fn movement(
    mut objects: Query<(
        Entity,
        &mut MapPosition,
        &SpriteObject,
        Option<&RigidBody>,
        Option<&mut CollisionState>,
    )>,
    mut bodies: Query<(&mut MapPosition, &RigidBody), Without<SpriteObject>>,
    map: Option<Res<TileMap>>,
    time: Res<WorldTime>,
) {
    for (mut position, rigidbody) in bodies.iter_mut() {
        if rigidbody.is_moving() {
            position.pos += rigidbody.velocity * time.delta;
        }
    }

    let mut footprints: Vec<Footprint> = objects
        .iter()
        .map(|(entity, position, object, _, _)| Footprint {
            entity,
            rect: object.footprint_rect(position.pos),
            is_static: object.is_static(),
        })
        .collect();

    for i in 0..footprints.len() {
        if footprints[i].is_static {
            continue;
        }
        let entity = footprints[i].entity;
        let Ok((_, mut position, object, rigidbody, collision)) = objects.get_mut(entity) else {
            continue;
        };

        let saved = position.pos;
        if let Some(rb) = rigidbody.filter(|rb| rb.is_moving()) {
            position.pos += rb.velocity * time.delta;
        }

        let rect = object.footprint_rect(position.pos);
        let obstacle = dynamic_overlaps(&footprints, rect, Some(entity)).next();
        let blocked = obstacle.is_some() || map.as_ref().is_some_and(|m| !m.is_freespace_rect(&rect));

        if blocked {
            if position.pos != saved {
                debug!(
                    "{:?} blocked at {:?} (obstacle: {:?}), rolled back to {:?}",
                    entity, position.pos, obstacle, saved
                );
            }
            position.pos = saved;
        }
        if let Some(mut state) = collision {
            if blocked {
                state.block(obstacle);
            } else {
                state.clear();
            }
        }
        footprints[i].rect = object.footprint_rect(position.pos);
    }
}
