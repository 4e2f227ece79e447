#![warn(missing_docs)]
//! Core primitives shared across the workspace: chunk extents, coordinate
//! spaces, range checks and the occupancy query used by spatial algorithms.

pub mod coords;
mod error;
mod occupancy;
pub mod range;

use serde::{Deserialize, Serialize};

pub use coords::{
    to_chunk_origin, to_chunk_origin_f, to_local, voxel_at, ChunkPos, ColumnPos, Extents,
    LocalPos, CHUNK_EXTENTS, CHUNK_VOLUME,
};
pub use error::WorldError;
pub use occupancy::Occupancy;
pub use range::{in_range_1d, in_range_3d};

/// Fixed tick counter driven by the world update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}
