//! ECS resources shared by systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the tile grid, asset catalogs,
//! timing and configuration.
//!
//! Overview
//! - `animationstore` – animation sheets reused across entities
//! - `debugmode` – presence enables steering debug vectors
//! - `draworder` – entities sorted back to front
//! - `simconfig` – INI-backed tunables
//! - `spritesheet` – cell geometry of a sheet image
//! - `tilemap` – the tile grid world and its freespace queries
//! - `tilemapdata` – persisted per-cell tile assignment
//! - `tileset` – tile catalog and tile classifications
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod debugmode;
pub mod draworder;
pub mod simconfig;
pub mod spritesheet;
pub mod tilemap;
pub mod tilemapdata;
pub mod tileset;
pub mod worldtime;
