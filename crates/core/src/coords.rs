//! Coordinate spaces and conversions.
//!
//! Three integer spaces are in play:
//! - *world* voxel coordinates (any `i32` triple, or a float position floored to one),
//! - *chunk* coordinates, a world position snapped down to the chunk origin,
//! - *local* coordinates inside a chunk, always within [`CHUNK_EXTENTS`].
//!
//! Snapping uses floor division so negative positions stay on a contiguous grid.

use std::fmt;

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::range::in_range_3d;

/// Size of a chunk along each axis, in voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extents {
    /// X extent.
    pub width: i32,
    /// Y extent.
    pub height: i32,
    /// Z extent.
    pub depth: i32,
}

impl Extents {
    /// Total number of cells.
    pub const fn volume(self) -> usize {
        (self.width * self.height * self.depth) as usize
    }

    /// Extents as a vector (width, height, depth).
    pub const fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.width, self.height, self.depth)
    }
}

/// Chunk extents shared by every component.
pub const CHUNK_EXTENTS: Extents = Extents {
    width: 16,
    height: 16,
    depth: 16,
};

/// Voxel count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_EXTENTS.volume();

/// Chunk coordinate: the world-space origin of a chunk.
///
/// Every component is a multiple of the matching chunk extent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkPos {
    /// Origin X in world voxels.
    pub x: i32,
    /// Origin Y in world voxels.
    pub y: i32,
    /// Origin Z in world voxels.
    pub z: i32,
}

impl ChunkPos {
    /// Wrap an already aligned origin.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk containing the given world voxel.
    pub fn containing(world: IVec3) -> Self {
        to_chunk_origin(world)
    }

    /// Origin as a vector.
    pub const fn origin(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// The (X, Z) column this chunk stands in.
    pub const fn column(self) -> ColumnPos {
        ColumnPos::new(self.x, self.z)
    }

    /// Chunk `dx, dy, dz` chunk steps away.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx * CHUNK_EXTENTS.width,
            y: self.y + dy * CHUNK_EXTENTS.height,
            z: self.z + dz * CHUNK_EXTENTS.depth,
        }
    }

    /// Chebyshev distance to `other`, measured in chunks.
    pub fn chunk_distance(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs() / CHUNK_EXTENTS.width;
        let dy = (self.y - other.y).abs() / CHUNK_EXTENTS.height;
        let dz = (self.z - other.z).abs() / CHUNK_EXTENTS.depth;
        dx.max(dy).max(dz)
    }

    /// World position of a local cell in this chunk.
    pub fn global(self, local: LocalPos) -> IVec3 {
        self.origin() + local.as_ivec3()
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Column coordinate: the (X, Z) projection of a chunk origin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ColumnPos {
    /// Origin X in world voxels.
    pub x: i32,
    /// Origin Z in world voxels.
    pub z: i32,
}

impl ColumnPos {
    /// Wrap an aligned column origin.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ColumnPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Chunk-local position (X, Y, Z), always inside [`CHUNK_EXTENTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    /// Local X.
    pub x: usize,
    /// Local Y.
    pub y: usize,
    /// Local Z.
    pub z: usize,
}

impl LocalPos {
    /// Build a local position; components must be within the chunk extents.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Checked conversion from a signed vector; `None` outside the chunk.
    pub fn from_ivec3(pos: IVec3) -> Option<Self> {
        if in_range_3d(
            pos,
            CHUNK_EXTENTS.width,
            CHUNK_EXTENTS.height,
            CHUNK_EXTENTS.depth,
        ) {
            Some(Self::new(pos.x as usize, pos.y as usize, pos.z as usize))
        } else {
            None
        }
    }

    /// Signed vector form.
    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x as i32, self.y as i32, self.z as i32)
    }

    /// Linear index into flat chunk storage, `(y * depth + z) * width + x`.
    pub fn index(self) -> usize {
        let width = CHUNK_EXTENTS.width as usize;
        let height = CHUNK_EXTENTS.height as usize;
        let depth = CHUNK_EXTENTS.depth as usize;
        debug_assert!(self.x < width);
        debug_assert!(self.y < height);
        debug_assert!(self.z < depth);
        (self.y * depth + self.z) * width + self.x
    }
}

/// Snap a world voxel down to the origin of the chunk containing it.
pub fn to_chunk_origin(world: IVec3) -> ChunkPos {
    let extents = CHUNK_EXTENTS;
    ChunkPos::new(
        world.x.div_euclid(extents.width) * extents.width,
        world.y.div_euclid(extents.height) * extents.height,
        world.z.div_euclid(extents.depth) * extents.depth,
    )
}

/// Float variant of [`to_chunk_origin`].
pub fn to_chunk_origin_f(world: Vec3) -> ChunkPos {
    to_chunk_origin(voxel_at(world))
}

/// Position of a world voxel relative to its chunk origin.
pub fn to_local(world: IVec3) -> LocalPos {
    let extents = CHUNK_EXTENTS;
    LocalPos::new(
        world.x.rem_euclid(extents.width) as usize,
        world.y.rem_euclid(extents.height) as usize,
        world.z.rem_euclid(extents.depth) as usize,
    )
}

/// Voxel containing a float world position (per-axis floor).
pub fn voxel_at(world: Vec3) -> IVec3 {
    world.floor().as_ivec3()
}
