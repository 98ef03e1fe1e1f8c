//! Geometry of a sheet image cut into a regular grid of cells.
//!
//! Both tile catalogs and animation sheets are laid out this way. The cell
//! size is derived from the image size and the row/column counts with integer
//! division, so a sheet whose cells would be narrower than one pixel reports
//! a cell size of 0. That zero is the misconfiguration signal checked by
//! [`SpriteSheet::tile_size`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::geometry::{TilePosition, WorldRect};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    /// Name used in diagnostics and as a store key.
    pub name: String,
    /// Width of the source image in pixels.
    pub image_width: u32,
    /// Height of the source image in pixels.
    pub image_height: u32,
    /// Number of cell columns in the image.
    pub columns: u32,
    /// Number of cell rows in the image.
    pub rows: u32,
}

impl SpriteSheet {
    pub fn new(
        name: impl Into<String>,
        image_width: u32,
        image_height: u32,
        columns: u32,
        rows: u32,
    ) -> Self {
        Self {
            name: name.into(),
            image_width,
            image_height,
            columns,
            rows,
        }
    }

    /// Width of one cell in pixels, 0 when misconfigured.
    pub fn tile_width(&self) -> u32 {
        if self.columns == 0 {
            return 0;
        }
        self.image_width / self.columns
    }

    /// Height of one cell in pixels, 0 when misconfigured.
    pub fn tile_height(&self) -> u32 {
        if self.rows == 0 {
            return 0;
        }
        self.image_height / self.rows
    }

    /// Cell size, or [`SimError::ZeroTileSize`] when either side is 0.
    pub fn tile_size(&self) -> SimResult<(u32, u32)> {
        let (w, h) = (self.tile_width(), self.tile_height());
        if w == 0 || h == 0 {
            return Err(SimError::ZeroTileSize {
                sheet: self.name.clone(),
                width: self.image_width,
                height: self.image_height,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok((w, h))
    }

    /// Pixel rect covered by cell `p` when cell (0, 0) sits at the origin.
    pub fn tile_screen_rect(&self, p: TilePosition) -> WorldRect {
        let (w, h) = (self.tile_width() as f32, self.tile_height() as f32);
        WorldRect::new(p.column as f32 * w, p.row as f32 * h, w, h)
    }

    /// Cell under the pixel `v`, given the pixel position of cell (0, 0).
    ///
    /// Uses floor division, so points left of or above `upper_left` land on
    /// negative cells. A zero-sized sheet maps everything to (-1, -1), which
    /// no map treats as inside its bounds.
    pub fn tile_position(&self, v: Vec2, upper_left: Vec2) -> TilePosition {
        let (w, h) = (self.tile_width(), self.tile_height());
        if w == 0 || h == 0 {
            return TilePosition::new(-1, -1);
        }
        let local = v - upper_left;
        TilePosition::new(
            (local.x / w as f32).floor() as i32,
            (local.y / h as f32).floor() as i32,
        )
    }
}
