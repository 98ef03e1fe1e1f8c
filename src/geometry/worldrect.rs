use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world (pixel) space, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WorldRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x_min(&self) -> f32 {
        self.x
    }

    pub fn y_min(&self) -> f32 {
        self.y
    }

    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// The same rect moved by `offset`.
    pub fn shift(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x_min()
            && point.x <= self.x_max()
            && point.y >= self.y_min()
            && point.y <= self.y_max()
    }

    /// Overlap test that counts rects sharing only an edge as overlapping.
    pub fn overlaps(&self, other: &WorldRect) -> bool {
        self.x_min() <= other.x_max()
            && self.y_min() <= other.y_max()
            && self.x_max() >= other.x_min()
            && self.y_max() >= other.y_min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_disjoint() {
        let a = WorldRect::new(0.0, 0.0, 10.0, 10.0);
        let b = WorldRect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_overlap_touching_edges_counts() {
        let a = WorldRect::new(0.0, 0.0, 10.0, 10.0);
        let right = WorldRect::new(10.0, 0.0, 10.0, 10.0);
        let below = WorldRect::new(0.0, 10.0, 10.0, 10.0);
        let corner = WorldRect::new(10.0, 10.0, 5.0, 5.0);
        assert!(a.overlaps(&right));
        assert!(a.overlaps(&below));
        assert!(a.overlaps(&corner));
    }

    #[test]
    fn test_overlap_nested() {
        let outer = WorldRect::new(0.0, 0.0, 100.0, 100.0);
        let inner = WorldRect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_shift() {
        let r = WorldRect::new(1.0, 2.0, 3.0, 4.0).shift(Vec2::new(10.0, -2.0));
        assert_eq!(r, WorldRect::new(11.0, 0.0, 3.0, 4.0));
        assert_eq!(r.x_max(), 14.0);
        assert_eq!(r.y_max(), 4.0);
    }

    #[test]
    fn test_contains_point_inclusive() {
        let r = WorldRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(0.0, 0.0)));
        assert!(r.contains_point(Vec2::new(10.0, 10.0)));
        assert!(!r.contains_point(Vec2::new(10.1, 5.0)));
    }
}
