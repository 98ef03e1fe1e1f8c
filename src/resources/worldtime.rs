//! Simulation clock.
//!
//! Time-mode animations measure their phase against `elapsed`; kinematics and
//! steering integrate over `delta`.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Scaled seconds since the world was built.
    pub elapsed: f32,
    /// Scaled duration of the current tick in seconds.
    pub delta: f32,
    pub time_scale: f32,
    /// Number of ticks advanced so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(time_scale: f32) -> Self {
        Self {
            time_scale,
            ..Self::default()
        }
    }
}
