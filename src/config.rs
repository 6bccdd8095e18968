//! Runtime world configuration knobs.

use serde::{Deserialize, Serialize};

/// Tunable world behavior, consumed by the streamer and meshing passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// View radius in superchunk grid steps around the viewpoint.
    pub view_radius: i32,
    /// Whether occlusion culling is applied while meshing.
    pub occlusion_culling: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            view_radius: 2,
            occlusion_culling: true,
        }
    }
}
