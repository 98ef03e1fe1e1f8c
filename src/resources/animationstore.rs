//! Animation resource registry.
//!
//! This module provides the store of animation sheets shared by every
//! animated entity. A sheet owns its [`SpriteAnimation`]s; entities refer to
//! them by sheet key and animation name and never own them.
//!
//! An animation is an ordered list of frame cells in the sheet image. It can
//! be sampled by elapsed time (one cycle every `seconds`) or by distance
//! travelled (one cycle every `stride` world units). In both cases
//! `phase = (value / period) mod 1` and the frame index is
//! `round(phase * frame_count)`, wrapped back into range.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::geometry::TilePosition;
use crate::resources::spritesheet::SpriteSheet;

/// Immutable description of one animation within a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteAnimation {
    pub name: String,
    /// Frame cells in playback order.
    pub frames: Vec<TilePosition>,
    /// Length of one cycle in seconds, for time-driven playback.
    #[serde(default)]
    pub seconds: f32,
    /// Distance covered by one cycle, for motion-driven playback.
    #[serde(default)]
    pub stride: f32,
}

impl SpriteAnimation {
    pub fn new(name: impl Into<String>, frames: Vec<TilePosition>, seconds: f32, stride: f32) -> Self {
        Self {
            name: name.into(),
            frames,
            seconds,
            stride,
        }
    }

    /// Animation occupying one full row of a sheet with `columns` frames.
    pub fn row(name: impl Into<String>, row: i32, columns: u32, seconds: f32, stride: f32) -> Self {
        let frames = (0..columns as i32).map(|c| TilePosition::new(c, row)).collect();
        Self::new(name, frames, seconds, stride)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Sheet cell of frame `index`, wrapping past the last frame.
    ///
    /// An animation without frames always answers (0, 0).
    pub fn frame(&self, index: usize) -> TilePosition {
        if self.frames.is_empty() {
            return TilePosition::default();
        }
        self.frames[index % self.frames.len()]
    }

    /// Frame index `value / period` of the way through one cycle.
    ///
    /// A non-positive period has no cycle to speak of and yields frame 0.
    pub fn frame_index_at_phase(&self, value: f32, period: f32) -> usize {
        let count = self.frames.len();
        if count == 0 || period <= 0.0 || !value.is_finite() {
            return 0;
        }
        let phase = (value / period).rem_euclid(1.0);
        let index = (phase * count as f32 + 0.5).floor() as usize;
        index % count
    }

    pub fn frame_at_phase(&self, value: f32, period: f32) -> TilePosition {
        self.frame(self.frame_index_at_phase(value, period))
    }

    /// Frame `time` seconds into a timed cycle.
    pub fn frame_at_time(&self, time: f32) -> TilePosition {
        self.frame_at_phase(time, self.seconds)
    }

    /// Frame after travelling `distance` along a positional cycle.
    pub fn frame_at_distance(&self, distance: f32) -> TilePosition {
        self.frame_at_phase(distance, self.stride)
    }
}

/// Sheet image holding the frames of one kind of object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSheet {
    pub sheet: SpriteSheet,
    #[serde(default)]
    pub animations: Vec<SpriteAnimation>,
}

impl AnimationSheet {
    pub fn new(sheet: SpriteSheet) -> Self {
        Self {
            sheet,
            animations: Vec::new(),
        }
    }

    pub fn with_animation(mut self, animation: SpriteAnimation) -> Self {
        self.animations.push(animation);
        self
    }

    /// Sheet where each row is one animation spanning every column.
    pub fn rows(sheet: SpriteSheet, rows: &[(&str, f32, f32)]) -> Self {
        let columns = sheet.columns;
        let animations = rows
            .iter()
            .enumerate()
            .map(|(row, (name, seconds, stride))| {
                SpriteAnimation::row(*name, row as i32, columns, *seconds, *stride)
            })
            .collect();
        Self { sheet, animations }
    }

    pub fn name(&self) -> &str {
        &self.sheet.name
    }

    pub fn get(&self, name: &str) -> Option<&SpriteAnimation> {
        self.animations.iter().find(|a| a.name == name)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Central registry of animation sheets keyed by sheet name.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub sheets: FxHashMap<String, AnimationSheet>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sheet under its own name, replacing any previous one.
    pub fn insert(&mut self, sheet: AnimationSheet) {
        self.sheets.insert(sheet.name().to_string(), sheet);
    }

    pub fn sheet(&self, key: &str) -> Option<&AnimationSheet> {
        self.sheets.get(key)
    }

    pub fn get(&self, sheet: &str, animation: &str) -> Option<&SpriteAnimation> {
        self.sheets.get(sheet).and_then(|s| s.get(animation))
    }

    /// Like [`AnimationStore::get`] but says which reference is missing.
    pub fn require(&self, sheet: &str, animation: &str) -> SimResult<&SpriteAnimation> {
        let s = self
            .sheets
            .get(sheet)
            .ok_or_else(|| SimError::MissingSheet(sheet.to_string()))?;
        s.get(animation).ok_or_else(|| SimError::MissingAnimation {
            sheet: sheet.to_string(),
            name: animation.to_string(),
        })
    }

    pub fn clear(&mut self) {
        self.sheets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> SpriteAnimation {
        SpriteAnimation::row("walk", 2, 4, 1.0, 40.0)
    }

    #[test]
    fn test_row_animation_frames() {
        let a = walk();
        assert_eq!(a.frame_count(), 4);
        assert_eq!(a.frame(0), TilePosition::new(0, 2));
        assert_eq!(a.frame(3), TilePosition::new(3, 2));
        assert_eq!(a.frame(4), TilePosition::new(0, 2));
    }

    #[test]
    fn test_half_stride_is_middle_frame() {
        let a = walk();
        assert_eq!(a.frame_index_at_phase(20.0, 40.0), 2);
        assert_eq!(a.frame_at_distance(20.0), TilePosition::new(2, 2));
    }

    #[test]
    fn test_full_period_wraps_to_first_frame() {
        for frames in 1..6u32 {
            let a = SpriteAnimation::row("a", 0, frames, 2.0, 12.5);
            assert_eq!(a.frame_at_phase(2.0, 2.0), a.frame_at_phase(0.0, 2.0));
            assert_eq!(a.frame_at_phase(12.5, 12.5), a.frame(0));
            assert_eq!(a.frame_at_phase(25.0, 12.5), a.frame(0));
        }
    }

    #[test]
    fn test_rounding_half_up() {
        let a = walk();
        // phase 0.1 -> 0.4 -> frame 0; phase 0.125 -> 0.5 -> frame 1.
        assert_eq!(a.frame_index_at_phase(0.1, 1.0), 0);
        assert_eq!(a.frame_index_at_phase(0.125, 1.0), 1);
        // phase 0.9 -> 3.6 rounds to 4, which wraps back to frame 0.
        assert_eq!(a.frame_index_at_phase(0.9, 1.0), 0);
    }

    #[test]
    fn test_negative_values_stay_in_range() {
        let a = walk();
        // -10 / 40 -> phase 0.75 -> frame 3.
        assert_eq!(a.frame_index_at_phase(-10.0, 40.0), 3);
    }

    #[test]
    fn test_degenerate_period_or_frames() {
        let a = walk();
        assert_eq!(a.frame_index_at_phase(5.0, 0.0), 0);
        assert_eq!(a.frame_index_at_phase(5.0, -1.0), 0);
        let empty = SpriteAnimation::new("none", Vec::new(), 1.0, 1.0);
        assert_eq!(empty.frame_at_time(0.3), TilePosition::new(0, 0));
    }

    #[test]
    fn test_time_sampling() {
        let a = walk();
        assert_eq!(a.frame_at_time(0.0), TilePosition::new(0, 2));
        assert_eq!(a.frame_at_time(0.25), TilePosition::new(1, 2));
        assert_eq!(a.frame_at_time(1.5), TilePosition::new(2, 2));
    }

    #[test]
    fn test_store_lookup() {
        let mut store = AnimationStore::new();
        store.insert(AnimationSheet::rows(
            SpriteSheet::new("hero", 128, 128, 4, 4),
            &[("north", 1.0, 32.0), ("south", 1.0, 32.0)],
        ));
        let south = store.get("hero", "south").unwrap();
        assert_eq!(south.frame(1), TilePosition::new(1, 1));
        assert!(store.get("hero", "east").is_none());
        assert!(matches!(
            store.require("hero", "east"),
            Err(SimError::MissingAnimation { .. })
        ));
        assert!(matches!(
            store.require("villain", "north"),
            Err(SimError::MissingSheet(_))
        ));
    }

    #[test]
    fn test_sheet_from_json() {
        let json = r#"{
            "sheet": { "name": "slime", "image_width": 64, "image_height": 16, "columns": 4, "rows": 1 },
            "animations": [
                { "name": "bounce", "frames": [ {"column":0,"row":0}, {"column":1,"row":0} ], "seconds": 0.5 }
            ]
        }"#;
        let sheet = AnimationSheet::from_json(json).unwrap();
        assert_eq!(sheet.name(), "slime");
        let bounce = sheet.get("bounce").unwrap();
        assert_eq!(bounce.stride, 0.0);
        assert_eq!(bounce.frame_at_time(0.25), TilePosition::new(1, 0));
    }
}
