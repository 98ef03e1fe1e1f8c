//! Tile grid world.
//!
//! [`TileMap`] owns one [`MapSector`] per cell plus the persisted tile
//! assignment the sectors are rebuilt from. It answers the per-tick
//! freespace queries and converts between world rectangles and cell regions.
//!
//! Mutation (`set_tile` and friends) is an edit-time operation. Queries never
//! fail: cells outside the map are simply not freespace.

use glam::Vec2;
use log::warn;
use rustc_hash::FxHashSet;
use bevy_ecs::prelude::Resource;

use crate::error::{SimError, SimResult};
use crate::geometry::{TilePosition, TileRect, WorldRect};
use crate::resources::tilemapdata::{CellAssignment, TileMapData};
use crate::resources::tileset::{Tile, TileSet, TileType};

/// Runtime state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapSector {
    /// Index of the placed tile in the catalog.
    pub tile: Option<usize>,
    /// Resolved classification used for freespace queries.
    pub tile_type: TileType,
    /// Classification stamped by a static object, if any.
    pub claim: Option<TileType>,
}

impl MapSector {
    fn resolve(&mut self, tileset: &TileSet) {
        let own = self
            .tile
            .and_then(|i| tileset.tile(i))
            .map(|t| t.tile_type)
            .unwrap_or_default();
        self.tile_type = self.claim.unwrap_or(own);
    }
}

fn cell_count(columns: i32, rows: i32) -> SimResult<usize> {
    columns
        .checked_mul(rows)
        .map(|n| n as usize)
        .ok_or_else(|| SimError::Config(format!("map of {}x{} cells is too large", columns, rows)))
}

/// Identity of a debug overlay drawn on top of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u32);

#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    tileset: TileSet,
    columns: i32,
    rows: i32,
    /// World position of the upper-left corner of cell (0, 0).
    origin: Vec2,
    tile_width: f32,
    tile_height: f32,
    sectors: Vec<MapSector>,
    assignments: Vec<Option<TilePosition>>,
    overlays: FxHashSet<OverlayHandle>,
}

impl TileMap {
    /// Empty map of `columns` x `rows` cells.
    ///
    /// Fails when the catalog's sheet yields zero-sized tiles or the cell
    /// count does not fit in an `i32`.
    pub fn new(tileset: TileSet, columns: i32, rows: i32) -> SimResult<Self> {
        let (tile_width, tile_height) = tileset.sheet.tile_size()?;
        let (columns, rows) = (columns.max(0), rows.max(0));
        let count = cell_count(columns, rows)?;
        let mut map = Self {
            tileset,
            columns,
            rows,
            origin: Vec2::ZERO,
            tile_width: tile_width as f32,
            tile_height: tile_height as f32,
            sectors: Vec::new(),
            assignments: vec![None; count],
            overlays: FxHashSet::default(),
        };
        map.build_sectors();
        Ok(map)
    }

    /// Rebuild a map from its persisted assignment.
    ///
    /// Entries outside the map are skipped with a warning; entries naming an
    /// anchor missing from the catalog leave the cell empty.
    pub fn from_data(tileset: TileSet, data: &TileMapData) -> SimResult<Self> {
        let mut map = Self::new(tileset, data.columns, data.rows)?;
        for entry in &data.cells {
            match map.index(entry.cell()) {
                Some(i) => map.assignments[i] = Some(entry.tile()),
                None => warn!("Ignoring assignment for {} outside the map", entry.cell()),
            }
        }
        map.build_sectors();
        Ok(map)
    }

    /// Persisted form of the current assignment, in row-major order.
    pub fn to_data(&self) -> TileMapData {
        let cells = self
            .assignments
            .iter()
            .enumerate()
            .filter_map(|(i, tile)| tile.map(|t| CellAssignment::new(self.position_of(i), t)))
            .collect();
        TileMapData {
            columns: self.columns,
            rows: self.rows,
            cells,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Resolve every sector from the persisted assignment, dropping static claims.
    pub fn build_sectors(&mut self) {
        let tileset = &self.tileset;
        self.sectors = self
            .assignments
            .iter()
            .map(|anchor| {
                let tile = anchor.and_then(|p| {
                    let index = tileset.index_of(p);
                    if index.is_none() {
                        warn!("Tile {} is not in catalog '{}'", p, tileset.sheet.name);
                    }
                    index
                });
                let mut sector = MapSector {
                    tile,
                    ..MapSector::default()
                };
                sector.resolve(tileset);
                sector
            })
            .collect();
    }

    /// Change the map size. A different cell count discards the assignment.
    ///
    /// A size whose cell count overflows is refused and the map is left as it was.
    pub fn resize(&mut self, columns: i32, rows: i32) -> SimResult<()> {
        let (columns, rows) = (columns.max(0), rows.max(0));
        let count = cell_count(columns, rows)?;
        if count != self.assignments.len() {
            self.assignments = vec![None; count];
        }
        self.columns = columns;
        self.rows = rows;
        self.build_sectors();
        Ok(())
    }

    pub fn tileset(&self) -> &TileSet {
        &self.tileset
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Size of one cell in pixels.
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width, self.tile_height)
    }

    /// Map width in pixels.
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_width
    }

    /// Map height in pixels.
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_height
    }

    pub fn in_bounds(&self, p: TilePosition) -> bool {
        p.column >= 0 && p.row >= 0 && p.column < self.columns && p.row < self.rows
    }

    fn index(&self, p: TilePosition) -> Option<usize> {
        self.in_bounds(p)
            .then(|| (p.row * self.columns + p.column) as usize)
    }

    fn position_of(&self, index: usize) -> TilePosition {
        let i = index as i32;
        TilePosition::new(i % self.columns, i / self.columns)
    }

    pub fn sector(&self, p: TilePosition) -> Option<&MapSector> {
        self.index(p).map(|i| &self.sectors[i])
    }

    /// Catalog entry drawn at `p`.
    pub fn tile_at(&self, p: TilePosition) -> Option<&Tile> {
        self.sector(p)
            .and_then(|s| s.tile)
            .and_then(|i| self.tileset.tile(i))
    }

    // ==================== COORDINATE CONVERSIONS ====================

    /// Cell under the world point `v` (floor division).
    pub fn tile_position(&self, v: Vec2) -> TilePosition {
        let local = v - self.origin;
        TilePosition::new(
            (local.x / self.tile_width).floor() as i32,
            (local.y / self.tile_height).floor() as i32,
        )
    }

    /// Cells touched by a world rect.
    ///
    /// The upper-left corner is floored onto the grid and the extent is
    /// rounded up from that aligned corner, so partially covered cells are
    /// always included.
    pub fn tile_region(&self, rect: &WorldRect) -> TileRect {
        let upper_left = self.tile_position(rect.min());
        let aligned = self.origin
            + Vec2::new(
                upper_left.column as f32 * self.tile_width,
                upper_left.row as f32 * self.tile_height,
            );
        let width = ((rect.x_max() - aligned.x) / self.tile_width).ceil() as i32;
        let height = ((rect.y_max() - aligned.y) / self.tile_height).ceil() as i32;
        TileRect::new(upper_left.column, upper_left.row, width, height)
    }

    /// World position of the center of cell `p`.
    pub fn tile_center(&self, p: TilePosition) -> Vec2 {
        self.origin
            + Vec2::new(
                (p.column as f32 + 0.5) * self.tile_width,
                (p.row as f32 + 0.5) * self.tile_height,
            )
    }

    /// World rect covered by cell `p`.
    pub fn tile_screen_rect(&self, p: TilePosition) -> WorldRect {
        WorldRect::new(
            self.origin.x + p.column as f32 * self.tile_width,
            self.origin.y + p.row as f32 * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }

    // ==================== FREESPACE QUERIES ====================

    /// Cells outside the map are never freespace.
    pub fn is_freespace(&self, p: TilePosition) -> bool {
        self.sector(p)
            .is_some_and(|s| s.tile_type == TileType::Freespace)
    }

    pub fn is_freespace_region(&self, region: &TileRect) -> bool {
        region.iter().all(|p| self.is_freespace(p))
    }

    pub fn is_freespace_rect(&self, rect: &WorldRect) -> bool {
        self.is_freespace_region(&self.tile_region(rect))
    }

    pub fn is_freespace_point(&self, v: Vec2) -> bool {
        self.is_freespace(self.tile_position(v))
    }

    /// Stamp a static object's classification onto cell `p`.
    ///
    /// Returns false when `p` is outside the map.
    pub fn claim(&mut self, p: TilePosition, tile_type: TileType) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let sector = &mut self.sectors[i];
        sector.claim = Some(tile_type);
        sector.resolve(&self.tileset);
        true
    }

    // ==================== EDITING ====================

    /// Place the catalog tile anchored at `anchor` in cell `p`, or clear the
    /// cell when `anchor` is `None`.
    pub fn set_tile(&mut self, p: TilePosition, anchor: Option<TilePosition>) -> SimResult<()> {
        let i = self.index(p).ok_or(SimError::OutOfBounds(p))?;
        let tile = match anchor {
            Some(a) => Some(self.tileset.index_of(a).ok_or(SimError::UnknownTile(a))?),
            None => None,
        };
        self.assignments[i] = anchor;
        let sector = &mut self.sectors[i];
        sector.tile = tile;
        sector.resolve(&self.tileset);
        Ok(())
    }

    /// Fill every cell of `region` with the same tile.
    pub fn set_region_tiles(&mut self, region: &TileRect, anchor: Option<TilePosition>) -> SimResult<()> {
        for p in region {
            self.set_tile(p, anchor)?;
        }
        Ok(())
    }

    /// Fill `region` from a grid indexed `[row][column]` relative to its corner.
    pub fn set_region_tile_grid(
        &mut self,
        region: &TileRect,
        grid: &[Vec<Option<TilePosition>>],
    ) -> SimResult<()> {
        let got_width = grid.first().map_or(0, Vec::len);
        let ragged = grid.iter().any(|row| row.len() != got_width);
        if ragged
            || grid.len() as i32 != region.height().max(0)
            || got_width as i32 != region.width().max(0)
        {
            return Err(SimError::RegionSizeMismatch {
                region: *region,
                width: region.width(),
                height: region.height(),
                got_width,
                got_height: grid.len(),
            });
        }
        for p in region {
            let anchor = grid[(p.row - region.r_min) as usize][(p.column - region.c_min) as usize];
            self.set_tile(p, anchor)?;
        }
        Ok(())
    }

    /// Tiles of `region` as a grid indexed `[row][column]`; cells outside the
    /// map come back empty.
    pub fn get_region_tiles(&self, region: &TileRect) -> Vec<Vec<Option<&Tile>>> {
        (region.r_min..=region.r_max)
            .map(|row| {
                (region.c_min..=region.c_max)
                    .map(|column| self.tile_at(TilePosition::new(column, row)))
                    .collect()
            })
            .collect()
    }

    // ==================== DEBUG OVERLAYS ====================

    /// Returns false if the overlay was already shown.
    pub fn add_overlay(&mut self, overlay: OverlayHandle) -> bool {
        self.overlays.insert(overlay)
    }

    pub fn remove_overlay(&mut self, overlay: OverlayHandle) -> bool {
        self.overlays.remove(&overlay)
    }

    pub fn remove_all_overlays(&mut self) {
        self.overlays.clear();
    }

    pub fn has_overlay(&self, overlay: OverlayHandle) -> bool {
        self.overlays.contains(&overlay)
    }

    /// Active overlays, in no particular order.
    pub fn overlays(&self) -> impl Iterator<Item = OverlayHandle> + '_ {
        self.overlays.iter().copied()
    }
}
