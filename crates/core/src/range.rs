//! Half-open bounds checks.

use glam::IVec3;

/// Returns true when `lower <= value < upper`.
#[inline]
pub fn in_range_1d(value: i32, lower: i32, upper: i32) -> bool {
    value >= lower && value < upper
}

/// Returns true when `position` lies inside `[0, width) x [0, height) x [0, depth)`.
#[inline]
pub fn in_range_3d(position: IVec3, width: i32, height: i32, depth: i32) -> bool {
    in_range_1d(position.x, 0, width)
        && in_range_1d(position.y, 0, height)
        && in_range_1d(position.z, 0, depth)
}
