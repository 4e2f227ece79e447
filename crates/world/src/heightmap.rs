//! Per-column terrain heights.
//!
//! A height map is generated once per (X, Z) column and shared by every chunk
//! stacked in that column. Under [`HeightValidation::Literal`] heights rejected
//! by the bound are replaced with [`NO_SURFACE`]. Under
//! [`HeightValidation::ChunkExtent`] the raw samples are kept and each chunk
//! takes the surfaces inside its own Y range when it generates.

use serde::{Deserialize, Serialize};
use voxelstream_core::{in_range_1d, ChunkPos, ColumnPos, CHUNK_EXTENTS};

use crate::height::HeightFunction;

/// Column count along X.
pub const MAP_WIDTH: usize = CHUNK_EXTENTS.width as usize;
/// Column count along Z.
pub const MAP_DEPTH: usize = CHUNK_EXTENTS.depth as usize;

/// Sentinel height for a column with no surface block.
pub const NO_SURFACE: i32 = -1;

/// Bound applied to sampled heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightValidation {
    /// Keep `h` iff `origin.y <= h < origin.y + h`.
    ///
    /// The upper bound grows with the sample itself, so this only accepts
    /// heights when `origin.y > 0`. A chunk at `y = 0` gets no terrain.
    #[default]
    Literal,
    /// Keep `h` for a chunk iff `origin.y <= h < origin.y + CHUNK_HEIGHT`.
    ///
    /// The column map stores raw samples, so every chunk in the column sees
    /// the same surface no matter which one built the map.
    ChunkExtent,
}

impl HeightValidation {
    /// Whether `height` survives for a chunk whose origin is at `origin_y`.
    pub fn accepts(self, height: i32, origin_y: i32) -> bool {
        match self {
            HeightValidation::Literal => in_range_1d(height, origin_y, origin_y + height),
            HeightValidation::ChunkExtent => {
                in_range_1d(height, origin_y, origin_y + CHUNK_EXTENTS.height)
            }
        }
    }

    /// Whether the check runs once, when the column map is built.
    fn applies_to_map(self) -> bool {
        matches!(self, HeightValidation::Literal)
    }
}

/// Heightmap for a single chunk column (16x16).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    column: ColumnPos,
    origin_y: i32,
    validation: HeightValidation,
    /// Indexed as heights[z][x] for cache-friendly iteration.
    heights: [[i32; MAP_WIDTH]; MAP_DEPTH],
}

impl HeightMap {
    /// Sample `height_fn` for every column of the chunk at `origin`.
    ///
    /// Only the chunk's X and Z select the samples. Under the literal bound its
    /// Y also decides which heights are kept; chunk-extent maps keep them all.
    pub fn generate<H>(origin: ChunkPos, height_fn: &H, validation: HeightValidation) -> Self
    where
        H: HeightFunction + ?Sized,
    {
        let mut heights = [[NO_SURFACE; MAP_WIDTH]; MAP_DEPTH];
        let width = CHUNK_EXTENTS.width as f64;
        let depth = CHUNK_EXTENTS.depth as f64;

        for (local_z, row) in heights.iter_mut().enumerate() {
            for (local_x, cell) in row.iter_mut().enumerate() {
                let offset_x = (origin.x + local_x as i32) as f64 / width - 0.5;
                let offset_z = (origin.z + local_z as i32) as f64 / depth - 0.5;

                let height = height_fn.height_at(offset_x, offset_z);
                let keep = !validation.applies_to_map() || validation.accepts(height, origin.y);
                *cell = if keep { height } else { NO_SURFACE };
            }
        }

        Self {
            column: origin.column(),
            origin_y: origin.y,
            validation,
            heights,
        }
    }

    /// Column this map covers.
    pub fn column(&self) -> ColumnPos {
        self.column
    }

    /// Y origin of the chunk that generated the map.
    pub fn origin_y(&self) -> i32 {
        self.origin_y
    }

    /// Validation the map was built with.
    pub fn validation(&self) -> HeightValidation {
        self.validation
    }

    /// Height at local `(x, z)`, possibly [`NO_SURFACE`].
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    pub fn get(&self, local_x: usize, local_z: usize) -> i32 {
        self.heights[local_z][local_x]
    }

    /// Surface height at local `(x, z)`.
    ///
    /// Literal maps report `None` for the sentinel. Chunk-extent maps hold raw
    /// samples, so every cell has a surface, including one at `y = -1`.
    pub fn surface(&self, local_x: usize, local_z: usize) -> Option<i32> {
        let height = self.get(local_x, local_z);
        (!self.validation.applies_to_map() || height != NO_SURFACE).then_some(height)
    }

    /// Surface height at local `(x, z)` if it lies inside the chunk whose
    /// origin is at `origin_y`.
    pub fn surface_in(&self, local_x: usize, local_z: usize, origin_y: i32) -> Option<i32> {
        self.surface(local_x, local_z)
            .filter(|height| in_range_1d(*height, origin_y, origin_y + CHUNK_EXTENTS.height))
    }

    /// Raw height array, indexed as [z][x].
    pub fn heights(&self) -> &[[i32; MAP_WIDTH]; MAP_DEPTH] {
        &self.heights
    }

    /// Number of columns holding a surface.
    pub fn surface_count(&self) -> usize {
        (0..MAP_DEPTH)
            .flat_map(|z| (0..MAP_WIDTH).map(move |x| (x, z)))
            .filter(|&(x, z)| self.surface(x, z).is_some())
            .count()
    }
}
