//! Animation playback state.
//!
//! An [`AnimationPlayer`] names the animation currently shown (by sheet key
//! and animation name; the data lives in
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore)) and
//! how its phase is measured. The mode only changes through explicit calls.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::Animatable;
use crate::geometry::TilePosition;
use crate::resources::animationstore::AnimationStore;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimationMode {
    /// Frozen on the first frame.
    #[default]
    Stopped,
    /// Phase follows simulation time since `start_time`.
    Time { start_time: f32 },
    /// Phase follows the displacement since `start`, projected on `direction`.
    Distance { start: Vec2, direction: Vec2 },
}

#[derive(Debug, Clone, PartialEq, Component)]
pub struct AnimationPlayer {
    /// Key of the sheet in the animation store.
    pub sheet: String,
    /// Current animation, if one was ever selected.
    pub animation: Option<String>,
    pub mode: AnimationMode,
}

impl AnimationPlayer {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            animation: None,
            mode: AnimationMode::Stopped,
        }
    }

    pub fn is_playing(&self, animation: &str) -> bool {
        self.animation.as_deref() == Some(animation)
    }

    pub fn is_stopped(&self) -> bool {
        self.mode == AnimationMode::Stopped
    }

    /// Halt the current animation, whatever it is.
    pub fn stop(&mut self) {
        self.mode = AnimationMode::Stopped;
    }

    /// Switch to the first frame of `animation` and stay there.
    pub fn start_idle(&mut self, animation: impl Into<String>) {
        self.animation = Some(animation.into());
        self.mode = AnimationMode::Stopped;
    }

    /// Play `animation` against simulation time, starting at `now`.
    pub fn start_timed(&mut self, animation: impl Into<String>, now: f32) {
        self.animation = Some(animation.into());
        self.mode = AnimationMode::Time { start_time: now };
    }

    /// Play `animation` against distance travelled from `position` along
    /// the unit vector `direction`.
    pub fn start_positional(&mut self, animation: impl Into<String>, position: Vec2, direction: Vec2) {
        self.animation = Some(animation.into());
        self.mode = AnimationMode::Distance {
            start: position,
            direction,
        };
    }
}

impl Animatable for AnimationPlayer {
    fn current_frame(&self, store: &AnimationStore, position: Vec2, now: f32) -> TilePosition {
        let Some(animation) = self
            .animation
            .as_deref()
            .and_then(|name| store.get(&self.sheet, name))
        else {
            return TilePosition::default();
        };
        match self.mode {
            AnimationMode::Stopped => animation.frame(0),
            AnimationMode::Time { start_time } => animation.frame_at_time(now - start_time),
            AnimationMode::Distance { start, direction } => {
                animation.frame_at_distance((position - start).dot(direction))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::AnimationSheet;
    use crate::resources::spritesheet::SpriteSheet;

    fn store() -> AnimationStore {
        let mut store = AnimationStore::new();
        store.insert(AnimationSheet::rows(
            SpriteSheet::new("hero", 128, 128, 4, 4),
            &[("north", 1.0, 40.0), ("south", 1.0, 40.0), ("east", 1.0, 40.0), ("west", 1.0, 40.0)],
        ));
        store
    }

    #[test]
    fn test_no_animation_shows_origin_cell() {
        let player = AnimationPlayer::new("hero");
        assert_eq!(player.current_frame(&store(), Vec2::ZERO, 3.0), TilePosition::new(0, 0));
    }

    #[test]
    fn test_unknown_sheet_shows_origin_cell() {
        let mut player = AnimationPlayer::new("ghost");
        player.start_timed("east", 0.0);
        assert_eq!(player.current_frame(&store(), Vec2::ZERO, 0.5), TilePosition::new(0, 0));
    }

    #[test]
    fn test_idle_is_frozen_on_first_frame() {
        let store = store();
        let mut player = AnimationPlayer::new("hero");
        player.start_idle("south");
        assert!(player.is_stopped());
        assert_eq!(player.current_frame(&store, Vec2::new(13.0, 7.0), 0.6), TilePosition::new(0, 1));
    }

    #[test]
    fn test_timed_playback_counts_from_start() {
        let store = store();
        let mut player = AnimationPlayer::new("hero");
        player.start_timed("east", 10.0);
        assert_eq!(player.current_frame(&store, Vec2::ZERO, 10.0), TilePosition::new(0, 2));
        assert_eq!(player.current_frame(&store, Vec2::ZERO, 10.25), TilePosition::new(1, 2));
    }

    #[test]
    fn test_positional_playback_projects_on_direction() {
        let store = store();
        let mut player = AnimationPlayer::new("hero");
        player.start_positional("east", Vec2::new(100.0, 50.0), Vec2::X);
        // Only the x displacement counts; 20 of a 40 stride is frame 2.
        let frame = player.current_frame(&store, Vec2::new(120.0, 80.0), 0.0);
        assert_eq!(frame, TilePosition::new(2, 2));
    }

    #[test]
    fn test_stop_keeps_animation() {
        let mut player = AnimationPlayer::new("hero");
        player.start_timed("west", 0.0);
        player.stop();
        assert!(player.is_stopped());
        assert!(player.is_playing("west"));
    }
}
