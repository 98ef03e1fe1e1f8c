//! ECS components for simulated entities.
//!
//! Entities are plain records of optional capabilities instead of a class
//! hierarchy: anything with a [`Sprite`](sprite::Sprite) can be drawn,
//! anything with a [`SpriteObject`](spriteobject::SpriteObject) takes part in
//! collision and occupancy, anything with an
//! [`AnimationPlayer`](animation::AnimationPlayer) has its frame derived from
//! its motion. The small traits below are the seams systems dispatch through.
//!
//! Submodules overview:
//! - [`animation`] – playback mode of the animation currently shown
//! - [`character`] – four directional walking animations
//! - [`collision`] – blocked flag and obstacle left by the last move
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`pathfollow`] – resumable path-following task
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`sprite`] – sheet cell and box used for drawing and picking
//! - [`spriteobject`] – footprint, docking area and static flag
//! - [`steering`] – seek steering controller
//! - [`tilesprite`] – static object drawn with a catalog tile
//! - [`wander`] – idle characters walk to random objects

use glam::Vec2;

use crate::geometry::{TilePosition, WorldRect};
use crate::resources::animationstore::AnimationStore;

pub mod animation;
pub mod character;
pub mod collision;
pub mod mapposition;
pub mod pathfollow;
pub mod rigidbody;
pub mod sprite;
pub mod spriteobject;
pub mod steering;
pub mod tilesprite;
pub mod wander;

/// Something drawn as a sheet cell inside a box.
pub trait Renderable {
    fn bounding_box(&self, position: Vec2) -> WorldRect;
    fn frame(&self) -> TilePosition;

    fn hit_test(&self, position: Vec2, point: Vec2) -> bool {
        self.bounding_box(position).contains_point(point)
    }
}

/// Something occupying a footprint on the grid.
pub trait Collidable {
    fn footprint_rect(&self, position: Vec2) -> WorldRect;
    fn is_static(&self) -> bool;

    fn overlaps(&self, position: Vec2, other: &dyn Collidable, other_position: Vec2) -> bool {
        self.footprint_rect(position)
            .overlaps(&other.footprint_rect(other_position))
    }
}

/// Something whose displayed frame is derived from time and motion.
pub trait Animatable {
    fn current_frame(&self, store: &AnimationStore, position: Vec2, now: f32) -> TilePosition;
}
