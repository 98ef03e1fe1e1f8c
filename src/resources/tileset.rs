//! Tile catalog.
//!
//! A [`TileSet`] owns the [`Tile`] entries cut from one sheet image. Maps
//! refer to catalog entries by their anchor position in the sheet and never
//! own them.

use serde::{Deserialize, Serialize};

use crate::geometry::TilePosition;
use crate::resources::spritesheet::SpriteSheet;

/// Gameplay classification of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    /// Open ground; nothing blocks passage.
    #[default]
    Freespace,
    Wall,
    Furniture,
    Character,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub name: String,
    #[serde(default)]
    pub tile_type: TileType,
    /// Width in cells, for entries that are really groups of cells.
    #[serde(default = "one")]
    pub width: i32,
    /// Height in cells, for entries that are really groups of cells.
    #[serde(default = "one")]
    pub height: i32,
    /// Column of the anchor cell in the sheet.
    pub column: i32,
    /// Row of the anchor cell in the sheet.
    pub row: i32,
}

fn one() -> i32 {
    1
}

impl Tile {
    /// A single-cell freespace tile anchored at `position`.
    pub fn new(name: impl Into<String>, position: TilePosition) -> Self {
        Self {
            name: name.into(),
            tile_type: TileType::Freespace,
            width: 1,
            height: 1,
            column: position.column,
            row: position.row,
        }
    }

    pub fn with_type(mut self, tile_type: TileType) -> Self {
        self.tile_type = tile_type;
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Anchor cell in the sheet.
    pub fn position(&self) -> TilePosition {
        TilePosition::new(self.column, self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSet {
    pub sheet: SpriteSheet,
    #[serde(default)]
    pub tiles: Vec<Tile>,
}

impl TileSet {
    pub fn new(sheet: SpriteSheet) -> Self {
        Self {
            sheet,
            tiles: Vec::new(),
        }
    }

    pub fn with_tile(mut self, tile: Tile) -> Self {
        self.tiles.push(tile);
        self
    }

    /// Index of the entry anchored at `position`.
    pub fn index_of(&self, position: TilePosition) -> Option<usize> {
        self.tiles.iter().position(|t| t.position() == position)
    }

    /// Entry anchored at `position`.
    pub fn get(&self, position: TilePosition) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.position() == position)
    }

    /// First entry with the given name.
    pub fn by_name(&self, name: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.name == name)
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Get the entry anchored at `position`, adding a default one if missing.
    pub fn create_tile(&mut self, position: TilePosition) -> &mut Tile {
        let index = match self.index_of(position) {
            Some(index) => index,
            None => {
                self.tiles.push(Tile::new("New Tile", position));
                self.tiles.len() - 1
            }
        };
        &mut self.tiles[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TileSet {
        TileSet::new(SpriteSheet::new("terrain", 128, 128, 4, 4))
            .with_tile(Tile::new("grass", TilePosition::new(0, 0)))
            .with_tile(Tile::new("wall", TilePosition::new(1, 0)).with_type(TileType::Wall))
            .with_tile(
                Tile::new("table", TilePosition::new(0, 2))
                    .with_type(TileType::Furniture)
                    .with_size(2, 1),
            )
    }

    #[test]
    fn test_lookup_by_anchor() {
        let set = catalog();
        assert_eq!(set.get(TilePosition::new(1, 0)).unwrap().name, "wall");
        assert_eq!(set.index_of(TilePosition::new(0, 2)), Some(2));
        assert!(set.get(TilePosition::new(3, 3)).is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        let set = catalog();
        let table = set.by_name("table").unwrap();
        assert_eq!(table.tile_type, TileType::Furniture);
        assert_eq!((table.width, table.height), (2, 1));
        assert!(set.by_name("lava").is_none());
    }

    #[test]
    fn test_create_tile_is_get_or_insert() {
        let mut set = catalog();
        set.create_tile(TilePosition::new(1, 0)).name = "stone wall".into();
        assert_eq!(set.tiles.len(), 3);
        assert_eq!(set.get(TilePosition::new(1, 0)).unwrap().name, "stone wall");

        set.create_tile(TilePosition::new(3, 3)).tile_type = TileType::Wall;
        assert_eq!(set.tiles.len(), 4);
        assert_eq!(set.get(TilePosition::new(3, 3)).unwrap().tile_type, TileType::Wall);
    }

    #[test]
    fn test_tile_defaults_from_json() {
        let tile: Tile = serde_json::from_str(r#"{"name":"dirt","column":2,"row":1}"#).unwrap();
        assert_eq!(tile.tile_type, TileType::Freespace);
        assert_eq!((tile.width, tile.height), (1, 1));
        assert_eq!(tile.position(), TilePosition::new(2, 1));
    }
}
