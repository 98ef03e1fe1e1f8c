//! Crate error type.
//!
//! Only conditions that leave a caller without a required reference are
//! reported through [`SimError`]: misconfigured sheets, missing animations,
//! failed path plans, bad config files. Geometry and grid queries never fail;
//! they degrade to boundary answers instead (not freespace, empty region).

use bevy_ecs::prelude::Entity;
use thiserror::Error;

use crate::geometry::{TilePosition, TileRect};

#[derive(Debug, Error)]
pub enum SimError {
    /// The sheet's image does not divide into at least one pixel per cell.
    #[error(
        "sheet '{sheet}' has zero-sized tiles ({columns}x{rows} cells over a {width}x{height} image)"
    )]
    ZeroTileSize {
        sheet: String,
        width: u32,
        height: u32,
        columns: u32,
        rows: u32,
    },

    #[error("animation '{name}' not found in sheet '{sheet}'")]
    MissingAnimation { sheet: String, name: String },

    #[error("animation sheet '{0}' not found")]
    MissingSheet(String),

    #[error("no path from {start} to {goal}")]
    NoPath { start: TilePosition, goal: TileRect },

    #[error("no path planner installed in the world")]
    NoPlanner,

    #[error("resource {0} is not in the world")]
    MissingResource(&'static str),

    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("tile grid is {got_width}x{got_height} but region {region} is {width}x{height}")]
    RegionSizeMismatch {
        region: TileRect,
        width: i32,
        height: i32,
        got_width: usize,
        got_height: usize,
    },

    #[error("no tile anchored at {0} in the catalog")]
    UnknownTile(TilePosition),

    #[error("tile position {0} is outside the map")]
    OutOfBounds(TilePosition),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
