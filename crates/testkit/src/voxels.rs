use std::collections::HashSet;

use glam::IVec3;
use voxelstream_core::Occupancy;

/// Sparse set of solid voxels for driving spatial queries in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxelSet {
    solid: HashSet<IVec3>,
}

impl VoxelSet {
    /// Empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a voxel solid. Returns false if it already was.
    pub fn insert(&mut self, voxel: IVec3) -> bool {
        self.solid.insert(voxel)
    }

    /// Clear a voxel. Returns false if it was empty.
    pub fn remove(&mut self, voxel: IVec3) -> bool {
        self.solid.remove(&voxel)
    }

    /// Builder-style [`VoxelSet::insert`].
    pub fn with(mut self, voxel: IVec3) -> Self {
        self.insert(voxel);
        self
    }

    /// Fill every voxel in the inclusive box `min..=max`.
    pub fn fill(mut self, min: IVec3, max: IVec3) -> Self {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.solid.insert(IVec3::new(x, y, z));
                }
            }
        }
        self
    }

    /// Square floor slab at height `y` spanning `-radius..=radius` in X and Z.
    pub fn floor(y: i32, radius: i32) -> Self {
        Self::new().fill(IVec3::new(-radius, y, -radius), IVec3::new(radius, y, radius))
    }

    /// Number of solid voxels.
    pub fn len(&self) -> usize {
        self.solid.len()
    }

    /// True when nothing is solid.
    pub fn is_empty(&self) -> bool {
        self.solid.is_empty()
    }
}

impl Occupancy for VoxelSet {
    fn is_occupied(&self, voxel: IVec3) -> bool {
        self.solid.contains(&voxel)
    }
}
