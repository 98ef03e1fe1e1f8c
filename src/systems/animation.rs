//! Animation systems.
//!
//! - [`update_character_animation`] picks the walking animation of each
//!   character from its velocity.
//! - [`sample_animation_frames`] writes the frame of every playing animation
//!   into the entity's [`Sprite`].
//!
//! # Animation Flow
//!
//! 1. Animation data is defined in [`AnimationStore`]
//! 2. Entities have an [`AnimationPlayer`] naming the current animation and its mode
//! 3. Characters switch animations as their dominant direction of motion changes
//! 4. The displayed frame is derived from time or distance each tick
//!
//! [`face`] and [`face_direction`] turn a character on demand.

use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};

use crate::components::Animatable;
use crate::components::animation::AnimationPlayer;
use crate::components::character::{CharacterAnimations, dominant_direction};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::error::{SimError, SimResult};
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Select each character's walking animation from its velocity.
///
/// At rest the current animation idles on its first frame. Moving selects the
/// animation of the dominant direction (horizontal wins ties) and restarts it
/// in distance mode from the current position, unless it is already walking
/// that animation, in which case the phase carries on.
pub fn update_character_animation(
    mut query: Query<(
        &RigidBody,
        &MapPosition,
        &mut CharacterAnimations,
        &mut AnimationPlayer,
    )>,
) {
    for (body, position, mut character, mut player) in query.iter_mut() {
        let direction = dominant_direction(body.velocity);
        character.direction = direction;
        if direction == IVec2::ZERO {
            player.stop();
            continue;
        }
        match character.for_direction(direction) {
            Some(name) => {
                if !player.is_playing(name) || player.is_stopped() {
                    player.start_positional(name, position.pos, direction.as_vec2());
                }
            }
            None => player.stop(),
        }
    }
}

/// Copy the current frame of every animation into its sprite.
pub fn sample_animation_frames(
    mut query: Query<(&AnimationPlayer, &MapPosition, &mut Sprite)>,
    store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (player, position, mut sprite) in query.iter_mut() {
        let frame = player.current_frame(&store, position.pos, time.elapsed);
        if sprite.frame != frame {
            sprite.frame = frame;
        }
    }
}

/// Halt a character and turn it toward `direction`.
///
/// A zero direction idles whatever animation is current; otherwise the idle
/// frame of the dominant direction's animation is shown.
pub fn face(
    player: &mut AnimationPlayer,
    character: &mut CharacterAnimations,
    body: Option<&mut RigidBody>,
    direction: Vec2,
) {
    if let Some(body) = body {
        body.halt();
    }
    character.direction = IVec2::ZERO;
    let dominant = dominant_direction(direction);
    match character.for_direction(dominant) {
        Some(name) => player.start_idle(name),
        None => player.stop(),
    }
}

/// [`face`] for an entity in `world`.
pub fn face_direction(world: &mut World, entity: Entity, direction: Vec2) -> SimResult<()> {
    let mut state = world.query::<(
        &mut AnimationPlayer,
        &mut CharacterAnimations,
        Option<&mut RigidBody>,
    )>();
    let (mut player, mut character, body) =
        state
            .get_mut(world, entity)
            .map_err(|_| SimError::MissingComponent {
                entity,
                component: "CharacterAnimations",
            })?;
    face(&mut player, &mut character, body.map(|b| b.into_inner()), direction);
    Ok(())
}
