use glam::IVec3;

/// Answers whether a world voxel holds a solid block.
///
/// Ray casting and collision only ever ask this one question, so anything from
/// a loaded world to a closure over a test grid can stand in.
pub trait Occupancy {
    /// True when the voxel at `voxel` is occupied.
    fn is_occupied(&self, voxel: IVec3) -> bool;
}

impl<F> Occupancy for F
where
    F: Fn(IVec3) -> bool,
{
    fn is_occupied(&self, voxel: IVec3) -> bool {
        self(voxel)
    }
}
