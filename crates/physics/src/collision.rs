//! Axis-separated AABB collision against voxel occupancy.
//!
//! Motion is resolved one axis at a time (X, then Y, then Z). Each axis either
//! accepts the proposed coordinate or keeps the current one, which is what
//! lets a box slide along walls and come to rest on floors.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use voxelstream_core::{voxel_at, Occupancy};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis (up).
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// Resolution order used by [`resolve_motion`].
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a vector.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis-aligned bounding box used for collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Box of `size` centered on `center`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Tests intersection with another AABB.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Same box moved by `delta` along a single axis.
    pub fn offset_axis(&self, axis: Axis, delta: f32) -> Self {
        let mut shift = Vec3::ZERO;
        shift[axis.index()] = delta;
        Self::new(self.min + shift, self.max + shift)
    }

    /// Every voxel from `floor(min)` to `floor(max)` inclusive on each axis.
    ///
    /// A box face lying exactly on a voxel boundary still touches the voxel
    /// beyond it on the max side.
    pub fn voxels(&self) -> impl Iterator<Item = IVec3> {
        let lo = voxel_at(self.min);
        let hi = voxel_at(self.max);
        (lo.x..=hi.x).flat_map(move |x| {
            (lo.y..=hi.y).flat_map(move |y| (lo.z..=hi.z).map(move |z| IVec3::new(x, y, z)))
        })
    }
}

/// Box corners relative to an entity position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxExtents {
    /// Offset of the minimum corner.
    pub min: Vec3,
    /// Offset of the maximum corner.
    pub max: Vec3,
}

impl BoxExtents {
    /// Upright box with its feet at the position, centered in X and Z.
    pub fn player(width: f32, height: f32) -> Self {
        let half = width * 0.5;
        Self {
            min: Vec3::new(-half, 0.0, -half),
            max: Vec3::new(half, height, half),
        }
    }

    /// World-space box for an entity standing at `position`.
    pub fn at(&self, position: Vec3) -> Aabb {
        Aabb::new(position + self.min, position + self.max)
    }
}

/// Returns true if any voxel touched by `aabb` is occupied.
pub fn is_colliding<O>(aabb: &Aabb, occupancy: &O) -> bool
where
    O: Occupancy + ?Sized,
{
    aabb.voxels().any(|voxel| occupancy.is_occupied(voxel))
}

/// Result of resolving one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisResolution {
    /// Coordinate the axis ends up at: the target when free, else the original.
    pub value: f32,
    /// True when the proposed move hit an occupied voxel.
    pub blocked: bool,
}

/// Try moving from `position` to `target` along `axis` only.
pub fn resolve_axis<O>(
    position: Vec3,
    target: Vec3,
    axis: Axis,
    extents: &BoxExtents,
    occupancy: &O,
) -> AxisResolution
where
    O: Occupancy + ?Sized,
{
    let i = axis.index();
    let moved = extents.at(position).offset_axis(axis, target[i] - position[i]);
    if is_colliding(&moved, occupancy) {
        AxisResolution {
            value: position[i],
            blocked: true,
        }
    } else {
        AxisResolution {
            value: target[i],
            blocked: false,
        }
    }
}

/// Outcome of a full three-axis move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Resolved position.
    pub position: Vec3,
    /// Standing on something: Y was blocked while moving down or holding still.
    pub grounded: bool,
    /// Per-axis blocked flags, indexed like [`Axis::index`].
    pub blocked: [bool; 3],
}

/// Resolve X, then Y, then Z, each starting from the already resolved position.
pub fn resolve_motion<O>(position: Vec3, target: Vec3, extents: &BoxExtents, occupancy: &O) -> Motion
where
    O: Occupancy + ?Sized,
{
    let mut current = position;
    let mut blocked = [false; 3];
    let mut grounded = false;

    for axis in Axis::ALL {
        let i = axis.index();
        let resolution = resolve_axis(current, target, axis, extents, occupancy);
        current[i] = resolution.value;
        blocked[i] = resolution.blocked;
        if axis == Axis::Y {
            grounded = resolution.blocked && target.y <= position.y;
        }
    }

    Motion {
        position: current,
        grounded,
        blocked,
    }
}
