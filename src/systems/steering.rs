use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::steering::{Neighbor, SteeringController};
use crate::resources::debugmode::DebugMode;
use crate::resources::worldtime::WorldTime;

/// Integrate every steering controller into its body's velocity.
///
/// Each controller sees the other steered bodies as they were at the start
/// of the tick. Debug vectors are only recorded while [`DebugMode`] exists.
pub fn steering(
    mut query: Query<(Entity, &MapPosition, &mut RigidBody, &mut SteeringController)>,
    time: Res<WorldTime>,
    debug: Option<Res<DebugMode>>,
) {
    let bodies: Vec<(Entity, Neighbor)> = query
        .iter()
        .map(|(entity, position, body, _)| {
            (
                entity,
                Neighbor {
                    position: position.pos,
                    velocity: body.velocity,
                },
            )
        })
        .collect();

    for (entity, position, mut body, mut controller) in query.iter_mut() {
        if controller.is_stopped() {
            controller.integrate(&mut body, position.pos, &[], time.delta, debug.is_some());
            continue;
        }
        let neighbors: Vec<Neighbor> = bodies
            .iter()
            .filter(|(other, _)| *other != entity)
            .map(|(_, n)| *n)
            .collect();
        controller.integrate(&mut body, position.pos, &neighbors, time.delta, debug.is_some());
    }
}
