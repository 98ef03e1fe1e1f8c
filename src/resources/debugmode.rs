//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that debug diagnostics should
//! be collected (steering vectors, map overlays). Remove it to disable them.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may record debug vectors and overlays.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DebugMode;
