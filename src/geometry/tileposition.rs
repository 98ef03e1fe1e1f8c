//! Integer grid coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tilerect::TileRect;

/// Position of a cell on a map or inside a sheet.
///
/// Column 0 is the leftmost column and row 0 the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePosition {
    pub column: i32,
    pub row: i32,
}

impl TilePosition {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// The cell above this one.
    pub const fn up(self) -> Self {
        Self::new(self.column, self.row - 1)
    }

    /// The cell below this one.
    pub const fn down(self) -> Self {
        Self::new(self.column, self.row + 1)
    }

    /// The cell to the left of this one.
    pub const fn left(self) -> Self {
        Self::new(self.column - 1, self.row)
    }

    /// The cell to the right of this one.
    pub const fn right(self) -> Self {
        Self::new(self.column + 1, self.row)
    }

    /// Euclidean distance in cells (not pixels) between two positions.
    pub fn distance(self, other: TilePosition) -> f32 {
        let dc = (self.column - other.column) as f32;
        let dr = (self.row - other.row) as f32;
        (dc * dc + dr * dr).sqrt()
    }

    /// Distance from this position to the closest cell of `rect`.
    ///
    /// Zero when inside. When the position lies within the rect's column band
    /// (or row band) the answer is the distance to the nearer horizontal
    /// (or vertical) edge; otherwise it is the smallest of the four corner
    /// distances.
    pub fn distance_to_rect(self, rect: &TileRect) -> f32 {
        if rect.contains(self) {
            return 0.0;
        }
        if rect.c_min <= self.column && self.column <= rect.c_max {
            return (self.row - rect.r_min)
                .abs()
                .min((self.row - rect.r_max).abs()) as f32;
        }
        if rect.r_min <= self.row && self.row <= rect.r_max {
            return (self.column - rect.c_min)
                .abs()
                .min((self.column - rect.c_max).abs()) as f32;
        }
        let corners = [
            TilePosition::new(rect.c_min, rect.r_min),
            TilePosition::new(rect.c_min, rect.r_max),
            TilePosition::new(rect.c_max, rect.r_min),
            TilePosition::new(rect.c_max, rect.r_max),
        ];
        corners
            .iter()
            .map(|corner| self.distance(*corner))
            .fold(f32::INFINITY, f32::min)
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}
