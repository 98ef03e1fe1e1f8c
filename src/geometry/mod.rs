//! Coordinate algebra.
//!
//! Pure value types shared by every other module:
//! - [`tileposition`] – integer (column, row) cell coordinates
//! - [`tilerect`] – inclusive rectangular regions of cells
//! - [`worldrect`] – pixel-space rectangles with inclusive overlap

pub mod tileposition;
pub mod tilerect;
pub mod worldrect;

pub use tileposition::TilePosition;
pub use tilerect::{TileRect, TileRectIter};
pub use worldrect::WorldRect;
