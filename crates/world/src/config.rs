use serde::{Deserialize, Serialize};

use crate::height::NoiseSettings;
use crate::heightmap::HeightValidation;

/// World streaming settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Chunks kept loaded around the player, per axis, in each direction.
    pub render_distance: i32,
    /// Generation worker threads. Zero drains the queue on the caller's thread.
    pub worker_threads: usize,
    /// Upper bound on jobs handed to workers and not yet collected.
    pub max_in_flight: usize,
    /// Extra chunks beyond the render distance before a chunk is unloaded.
    /// Unset disables unloading.
    pub unload_margin: Option<i32>,
    /// Height maps kept in the LRU cache.
    pub height_map_capacity: usize,
    /// Bound applied to sampled terrain heights.
    pub height_validation: HeightValidation,
    /// Terrain noise.
    pub noise: NoiseSettings,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            render_distance: 2,
            worker_threads: 0,
            max_in_flight: 32,
            unload_margin: None,
            height_map_capacity: 256,
            height_validation: HeightValidation::Literal,
            noise: NoiseSettings::default(),
        }
    }
}

impl StreamingConfig {
    /// Chebyshev chunk distance past which loaded chunks are dropped.
    pub fn unload_distance(&self) -> Option<i32> {
        self.unload_margin
            .map(|margin| self.render_distance.max(0) + margin.max(0))
    }
}
