//! Path planning contract.
//!
//! Planning is consumed through the [`PathPlanner`] trait: given the map, a
//! start cell and a goal region, return the cells to walk through, or `None`
//! when the goal cannot be reached. The planner in use lives in the
//! [`Planner`] resource. [`GridPlanner`] is a 4-connected A* over freespace
//! cells.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::components::pathfollow::PathFollower;
use crate::geometry::{TilePosition, TileRect};
use crate::resources::tilemap::TileMap;

/// Ordered tile waypoints from start to goal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Path {
    pub waypoints: Vec<TilePosition>,
}

impl Path {
    pub fn new(waypoints: Vec<TilePosition>) -> Self {
        Self { waypoints }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Last cell of the path.
    pub fn destination(&self) -> Option<TilePosition> {
        self.waypoints.last().copied()
    }

    /// Resumable task walking through the centers of the path's cells.
    pub fn follow(&self, map: &TileMap, speed: f32, arrival_radius: f32) -> PathFollower {
        let points = self.waypoints.iter().map(|p| map.tile_center(*p)).collect();
        PathFollower::new(points, speed, arrival_radius)
    }
}

pub trait PathPlanner: Send + Sync {
    fn plan(&self, map: &TileMap, start: TilePosition, goal: &TileRect) -> Option<Path>;
}

/// The planner used by [`goto`](crate::systems::pathfollow::goto).
#[derive(Resource)]
pub struct Planner(pub Box<dyn PathPlanner>);

impl Planner {
    pub fn new(planner: impl PathPlanner + 'static) -> Self {
        Self(Box::new(planner))
    }

    pub fn plan(&self, map: &TileMap, start: TilePosition, goal: &TileRect) -> Option<Path> {
        self.0.plan(map, start, goal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenNode {
    position: TilePosition,
    f_cost: f32,
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    // Reversed so the heap pops the cheapest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
    }
}

/// A* over freespace cells with unit step cost.
///
/// The start cell may be occupied (a character standing on it); every other
/// cell of the path is freespace. The heuristic is the distance to the goal
/// region, which never overestimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPlanner;

impl GridPlanner {
    fn reconstruct(came_from: &FxHashMap<TilePosition, TilePosition>, mut current: TilePosition) -> Path {
        let mut waypoints = vec![current];
        while let Some(&parent) = came_from.get(&current) {
            current = parent;
            waypoints.push(current);
        }
        waypoints.reverse();
        Path::new(waypoints)
    }
}

impl PathPlanner for GridPlanner {
    fn plan(&self, map: &TileMap, start: TilePosition, goal: &TileRect) -> Option<Path> {
        if goal.is_empty() {
            return None;
        }
        if goal.contains(start) {
            return Some(Path::new(vec![start]));
        }

        let mut open = BinaryHeap::new();
        let mut closed = FxHashSet::default();
        let mut came_from = FxHashMap::default();
        let mut g_score = FxHashMap::default();

        g_score.insert(start, 0.0f32);
        open.push(OpenNode {
            position: start,
            f_cost: start.distance_to_rect(goal),
        });

        while let Some(OpenNode { position: current, .. }) = open.pop() {
            if goal.contains(current) {
                return Some(Self::reconstruct(&came_from, current));
            }
            if !closed.insert(current) {
                continue;
            }
            let g = g_score.get(&current).copied().unwrap_or(f32::INFINITY);
            for next in [current.up(), current.down(), current.left(), current.right()] {
                if closed.contains(&next) || !map.is_freespace(next) {
                    continue;
                }
                let tentative = g + 1.0;
                if tentative < g_score.get(&next).copied().unwrap_or(f32::INFINITY) {
                    came_from.insert(next, current);
                    g_score.insert(next, tentative);
                    open.push(OpenNode {
                        position: next,
                        f_cost: tentative + next.distance_to_rect(goal),
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::spritesheet::SpriteSheet;
    use crate::resources::tileset::{Tile, TileSet, TileType};

    fn map(columns: i32, rows: i32) -> TileMap {
        let tileset = TileSet::new(SpriteSheet::new("terrain", 64, 64, 2, 2))
            .with_tile(Tile::new("wall", TilePosition::new(1, 0)).with_type(TileType::Wall));
        TileMap::new(tileset, columns, rows).unwrap()
    }

    fn is_connected(path: &Path) -> bool {
        path.waypoints
            .windows(2)
            .all(|w| (w[0].column - w[1].column).abs() + (w[0].row - w[1].row).abs() == 1)
    }

    #[test]
    fn test_straight_path() {
        let map = map(5, 5);
        let path = GridPlanner
            .plan(&map, TilePosition::new(0, 0), &TileRect::single(TilePosition::new(3, 0)))
            .unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.destination(), Some(TilePosition::new(3, 0)));
        assert!(is_connected(&path));
    }

    #[test]
    fn test_start_inside_goal() {
        let map = map(5, 5);
        let path = GridPlanner
            .plan(&map, TilePosition::new(1, 1), &TileRect::new(0, 0, 3, 3))
            .unwrap();
        assert_eq!(path.waypoints, vec![TilePosition::new(1, 1)]);
    }

    #[test]
    fn test_routes_around_wall() {
        let mut map = map(5, 5);
        let wall = TileRect::new(2, 0, 1, 4);
        map.set_region_tiles(&wall, Some(TilePosition::new(1, 0))).unwrap();
        let path = GridPlanner
            .plan(&map, TilePosition::new(0, 0), &TileRect::single(TilePosition::new(4, 0)))
            .unwrap();
        assert!(is_connected(&path));
        assert!(path.waypoints.iter().all(|p| !wall.contains(*p)));
        assert!(path.waypoints.contains(&TilePosition::new(2, 4)));
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn test_unreachable_goal() {
        let mut map = map(5, 5);
        map.set_region_tiles(&TileRect::new(2, 0, 1, 5), Some(TilePosition::new(1, 0)))
            .unwrap();
        let plan = GridPlanner.plan(&map, TilePosition::new(0, 0), &TileRect::single(TilePosition::new(4, 0)));
        assert!(plan.is_none());
        assert!(GridPlanner.plan(&map, TilePosition::new(0, 0), &TileRect::EMPTY).is_none());
    }

    #[test]
    fn test_follow_uses_cell_centers() {
        let map = map(5, 5);
        let path = Path::new(vec![TilePosition::new(0, 0), TilePosition::new(1, 0)]);
        let follower = path.follow(&map, 40.0, 2.0);
        assert_eq!(follower.waypoints(), &[glam::Vec2::new(16.0, 16.0), glam::Vec2::new(48.0, 16.0)]);
        assert_eq!(follower.speed, 40.0);
    }
}
