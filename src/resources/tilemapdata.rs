//! Persisted per-cell tile assignment.
//!
//! This is the only serialized form of a map: its size plus an ordered list
//! mapping map cells to catalog anchors. Cells without an entry are empty.
//!
//! ```json
//! {
//!   "columns": 2,
//!   "rows": 1,
//!   "cells": [
//!     { "column": 0, "row": 0, "tile_column": 1, "tile_row": 0 }
//!   ]
//! }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::geometry::TilePosition;

/// One map cell and the catalog anchor drawn there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAssignment {
    /// Map column.
    pub column: i32,
    /// Map row.
    pub row: i32,
    /// Column of the tile's anchor in the catalog sheet.
    pub tile_column: i32,
    /// Row of the tile's anchor in the catalog sheet.
    pub tile_row: i32,
}

impl CellAssignment {
    pub fn new(cell: TilePosition, tile: TilePosition) -> Self {
        Self {
            column: cell.column,
            row: cell.row,
            tile_column: tile.column,
            tile_row: tile.row,
        }
    }

    pub fn cell(&self) -> TilePosition {
        TilePosition::new(self.column, self.row)
    }

    pub fn tile(&self) -> TilePosition {
        TilePosition::new(self.tile_column, self.tile_row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileMapData {
    /// Map width in cells.
    pub columns: i32,
    /// Map height in cells.
    pub rows: i32,
    #[serde(default)]
    pub cells: Vec<CellAssignment>,
}

impl TileMapData {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let data = Self::from_json(&std::fs::read_to_string(path)?)?;
        info!(
            "Loaded map data {:?}: {}x{} cells, {} assignments",
            path,
            data.columns,
            data.rows,
            data.cells.len()
        );
        Ok(data)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!("Saved map data to {:?}", path);
        Ok(())
    }
}
