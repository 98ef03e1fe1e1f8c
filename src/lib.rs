//! Tile-grid world simulation.
//!
//! Movable and static objects live on a tile map; each tick steering
//! controllers update velocities, movement integrates positions and rolls
//! back moves that collide, and animations derive their display frame from
//! time or distance travelled. Rendering is left to the host, which reads
//! [`Sprite`](components::sprite::Sprite) frames in
//! [`DrawOrder`](resources::draworder::DrawOrder).
//!
//! The crate is built on `bevy_ecs`; [`scene`] assembles a ready-to-run world.

pub mod components;
pub mod error;
pub mod geometry;
pub mod pathing;
pub mod resources;
pub mod scene;
pub mod systems;
