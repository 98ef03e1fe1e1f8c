//! Rectangular regions of cells.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::tileposition::TilePosition;

/// Inclusive rectangle of cells, `c_min..=c_max` by `r_min..=r_max`.
///
/// A rect whose max is below its min on either axis contains no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub c_min: i32,
    pub c_max: i32,
    pub r_min: i32,
    pub r_max: i32,
}

impl TileRect {
    /// A rect containing no cells.
    pub const EMPTY: TileRect = TileRect::new(0, 0, 0, 0);

    /// Build a rect from its upper-left cell and its size in cells.
    ///
    /// A width or height of zero (or less) yields an empty rect.
    pub const fn new(c_min: i32, r_min: i32, width: i32, height: i32) -> Self {
        Self {
            c_min,
            c_max: c_min + width - 1,
            r_min,
            r_max: r_min + height - 1,
        }
    }

    /// Smallest rect that includes both positions, in any order.
    pub fn from_corners(a: TilePosition, b: TilePosition) -> Self {
        Self {
            c_min: a.column.min(b.column),
            c_max: a.column.max(b.column),
            r_min: a.row.min(b.row),
            r_max: a.row.max(b.row),
        }
    }

    /// Rect made of a single cell.
    pub fn single(p: TilePosition) -> Self {
        Self::from_corners(p, p)
    }

    pub fn width(&self) -> i32 {
        1 + self.c_max - self.c_min
    }

    pub fn height(&self) -> i32 {
        1 + self.r_max - self.r_min
    }

    pub fn is_singleton(&self) -> bool {
        self.width() == 1 && self.height() == 1
    }

    pub fn is_empty(&self) -> bool {
        self.c_min > self.c_max || self.r_min > self.r_max
    }

    pub fn contains(&self, p: TilePosition) -> bool {
        self.c_min <= p.column && p.column <= self.c_max && self.r_min <= p.row && p.row <= self.r_max
    }

    /// Upper-left cell.
    pub fn origin(&self) -> TilePosition {
        TilePosition::new(self.c_min, self.r_min)
    }

    /// Iterate every contained cell in row-major order.
    ///
    /// The iterator borrows nothing, so calling this again restarts the walk.
    pub fn iter(&self) -> TileRectIter {
        TileRectIter {
            rect: *self,
            next: (!self.is_empty()).then(|| self.origin()),
        }
    }

    /// Cardinal direction from `p` that faces this rect.
    ///
    /// Zero when `p` is inside, or when it shares neither a row nor a column
    /// band with the rect.
    pub fn facing_direction(&self, p: TilePosition) -> IVec2 {
        if self.contains(p) {
            return IVec2::ZERO;
        }
        if self.r_min <= p.row && p.row <= self.r_max {
            return IVec2::new((self.c_min - p.column).signum(), 0);
        }
        if self.c_min <= p.column && p.column <= self.c_max {
            return IVec2::new(0, (self.r_min - p.row).signum());
        }
        IVec2::ZERO
    }
}

impl Default for TileRect {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for TileRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..={}, {}..={}]",
            self.c_min, self.c_max, self.r_min, self.r_max
        )
    }
}

impl<'a> IntoIterator for &'a TileRect {
    type Item = TilePosition;
    type IntoIter = TileRectIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major walk over the cells of a [`TileRect`].
#[derive(Debug, Clone)]
pub struct TileRectIter {
    rect: TileRect,
    next: Option<TilePosition>,
}

impl Iterator for TileRectIter {
    type Item = TilePosition;

    fn next(&mut self) -> Option<TilePosition> {
        let current = self.next?;
        self.next = if current.column < self.rect.c_max {
            Some(current.right())
        } else if current.row < self.rect.r_max {
            Some(TilePosition::new(self.rect.c_min, current.row + 1))
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            None => 0,
            Some(p) => {
                let width = self.rect.width() as usize;
                let rows_after = (self.rect.r_max - p.row) as usize;
                (self.rect.c_max - p.column + 1) as usize + rows_after * width
            }
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileRectIter {}
